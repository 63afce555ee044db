//! The Registry: the consumer-facing operation set.
//!
//! Wraps a [`Ledger`] in a reader/writer lock. Appends take the write guard,
//! so only one is in flight at a time; lookups and validation share read
//! guards and always see a consistent snapshot.

use std::sync::Arc;

use star_registry_core::{
    Block, BlockHash, ChainViolation, Claim, Ed25519Verifier, SignatureVerifier,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::ownership::OwnershipProof;

/// A star registry backed by an in-memory ledger.
pub struct Registry {
    ledger: RwLock<Ledger>,
    proof: OwnershipProof,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl Registry {
    /// Create a registry using wall-clock time and Ed25519 signatures.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_parts(config, Arc::new(SystemClock), Arc::new(Ed25519Verifier))
    }

    /// Create a registry with an explicit clock and signature verifier.
    pub fn with_parts(
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        let ledger = Ledger::new(&config.genesis_data, clock.now_secs())?;
        Ok(Self::from_ledger(ledger, config, clock, verifier))
    }

    /// Serve an existing ledger.
    pub fn from_ledger(
        ledger: Ledger,
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        info!(height = ledger.height(), "registry ready");
        Self {
            ledger: RwLock::new(ledger),
            proof: OwnershipProof::new(&config, verifier),
            clock,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Height of the chain (-1 when empty).
    pub async fn chain_height(&self) -> i64 {
        self.ledger.read().await.height()
    }

    /// Issue an ownership challenge for `address`.
    pub fn request_message_ownership_verification(&self, address: &str) -> String {
        self.proof.request_challenge(address, self.clock.now_secs())
    }

    /// Register a star for `address` after checking the signed challenge.
    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: serde_json::Value,
    ) -> Result<Block> {
        let mut ledger = self.ledger.write().await;
        let now = self.clock.now_secs();
        self.proof
            .submit_claim(&mut ledger, address, message, signature, star, now)
    }

    /// Look up a block by hash.
    pub async fn block_by_hash(&self, hash: &BlockHash) -> Result<Block> {
        self.ledger.read().await.by_hash(hash).cloned()
    }

    /// Look up a block by height.
    pub async fn block_by_height(&self, height: u64) -> Result<Block> {
        self.ledger.read().await.by_height(height).cloned()
    }

    /// All stars registered by `address`, in append order.
    pub async fn stars_by_wallet_address(&self, address: &str) -> Vec<Claim> {
        self.ledger.read().await.by_owner(address)
    }

    /// Audit the whole chain. An empty list means it is valid.
    pub async fn validate_chain(&self) -> Vec<ChainViolation> {
        self.ledger.read().await.validate()
    }

    /// A copy of every block, in height order.
    pub async fn snapshot(&self) -> Vec<Block> {
        self.ledger.read().await.blocks().to_vec()
    }
}
