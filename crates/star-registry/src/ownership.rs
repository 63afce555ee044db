//! Proof of ownership: time-bounded challenges signed by a wallet.
//!
//! A challenge is the token `address:issued_at:domain_tag`. Nothing is
//! stored server-side; the embedded timestamp is the only state, so the same
//! unexpired token can be submitted more than once.

use std::fmt;
use std::sync::Arc;

use star_registry_core::{Block, BlockDraft, Claim, SignatureVerifier};
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

const DELIMITER: char = ':';

/// A decoded challenge token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub address: String,
    /// Unix seconds.
    pub issued_at: i64,
    pub domain_tag: String,
}

impl Challenge {
    /// Create a challenge.
    pub fn new(address: impl Into<String>, issued_at: i64, domain_tag: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            issued_at,
            domain_tag: domain_tag.into(),
        }
    }

    /// Parse a token. The address is everything before the last two delimiters.
    pub fn parse(token: &str) -> Result<Self> {
        let mut parts = token.rsplitn(3, DELIMITER);
        let (Some(domain_tag), Some(issued_at), Some(address)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(LedgerError::InvalidChallenge(format!(
                "expected address{DELIMITER}timestamp{DELIMITER}tag, got {token:?}"
            )));
        };

        if address.is_empty() || domain_tag.is_empty() {
            return Err(LedgerError::InvalidChallenge(format!("empty field in {token:?}")));
        }

        let issued_at = issued_at
            .parse::<i64>()
            .map_err(|e| LedgerError::InvalidChallenge(format!("bad timestamp: {e}")))?;

        Ok(Self::new(address, issued_at, domain_tag))
    }

    /// The wire token.
    pub fn token(&self) -> String {
        self.to_string()
    }

    /// Seconds since issue, or None when the difference does not fit in an i64.
    pub fn elapsed(&self, now: i64) -> Option<i64> {
        now.checked_sub(self.issued_at)
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.address, self.issued_at, self.domain_tag
        )
    }
}

/// Issues challenges and checks signed responses.
#[derive(Clone)]
pub struct OwnershipProof {
    window_secs: u64,
    domain_tag: String,
    verifier: Arc<dyn SignatureVerifier>,
}

impl OwnershipProof {
    /// Create from config and a signature verifier.
    pub fn new(config: &RegistryConfig, verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            window_secs: config.validation_window_secs,
            domain_tag: config.domain_tag.clone(),
            verifier,
        }
    }

    /// Issue a challenge token for `address` at time `now`.
    pub fn request_challenge(&self, address: &str, now: i64) -> String {
        let token = Challenge::new(address, now, self.domain_tag.as_str()).token();
        debug!(address, issued_at = now, "issued ownership challenge");
        token
    }

    /// Check a signed challenge for `address` at time `now`.
    ///
    /// The window is inclusive: a claim exactly `window_secs` after issue
    /// is accepted.
    pub fn verify(&self, address: &str, token: &str, signature: &str, now: i64) -> Result<Challenge> {
        let challenge = Challenge::parse(token)?;

        if challenge.address != address {
            return Err(LedgerError::InvalidChallenge(format!(
                "challenge issued for {}, submitted by {address}",
                challenge.address
            )));
        }
        if challenge.domain_tag != self.domain_tag {
            return Err(LedgerError::InvalidChallenge(format!(
                "unknown domain tag {:?}",
                challenge.domain_tag
            )));
        }

        let elapsed = challenge.elapsed(now).ok_or_else(|| {
            LedgerError::InvalidChallenge(format!(
                "timestamp {} is out of range",
                challenge.issued_at
            ))
        })?;
        if elapsed < 0 {
            return Err(LedgerError::InvalidChallenge(format!(
                "issued {}s in the future",
                elapsed.unsigned_abs()
            )));
        }
        if elapsed as u64 > self.window_secs {
            warn!(address, elapsed, window = self.window_secs, "challenge expired");
            return Err(LedgerError::ExpiredChallenge {
                elapsed,
                window: self.window_secs,
            });
        }

        if !self.verifier.verify(token.as_bytes(), address, signature) {
            warn!(address, "signature verification failed");
            return Err(LedgerError::InvalidSignature(address.to_string()));
        }

        Ok(challenge)
    }

    /// Verify a signed challenge and append the claim to `ledger`.
    ///
    /// The append's own result, including an integrity rejection, is
    /// returned unchanged.
    pub fn submit_claim(
        &self,
        ledger: &mut Ledger,
        address: &str,
        token: &str,
        signature: &str,
        star: serde_json::Value,
        now: i64,
    ) -> Result<Block> {
        self.verify(address, token, signature, now)?;
        let draft = BlockDraft::for_claim(&Claim::new(address, star))?;
        ledger.append(draft, now)
    }
}

impl fmt::Debug for OwnershipProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnershipProof")
            .field("window_secs", &self.window_secs)
            .field("domain_tag", &self.domain_tag)
            .finish_non_exhaustive()
    }
}
