//! Error types for the registry.

use star_registry_core::{ChainViolation, CoreError};
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Lookup miss.
    #[error("not found: {0}")]
    NotFound(String),

    /// The challenge is older than the validation window.
    #[error("challenge expired: {elapsed}s elapsed, window is {window}s")]
    ExpiredChallenge { elapsed: i64, window: u64 },

    /// The signature does not prove control of the address.
    #[error("invalid signature for address {0}")]
    InvalidSignature(String),

    /// The challenge token is malformed or was not issued for this claim.
    #[error("invalid challenge: {0}")]
    InvalidChallenge(String),

    /// The chain failed validation; the append was rejected.
    #[error("chain integrity violation: {}", summarize(.0))]
    ChainIntegrityViolation(Vec<ChainViolation>),

    /// Encoding or decoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

fn summarize(violations: &[ChainViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
