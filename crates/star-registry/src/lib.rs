//! # Star Registry
//!
//! A private, append-only ledger of ownership claims. Each block commits to
//! its predecessor by hash, so any edit to a committed block is detectable.
//!
//! ## Overview
//!
//! - **Ledger**: owns the block sequence; genesis is created on construction
//!   and every later block goes through the same append path
//! - **Validation**: a full-chain pass runs inside every append and rejects
//!   it on any violation; it is also available standalone for audits
//! - **Ownership proof**: a wallet signs a time-stamped challenge and has
//!   five minutes (by default) to submit its claim
//! - **Queries**: by hash, by height, and by owner
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_registry::{Registry, RegistryConfig};
//! use star_registry::core::Keypair;
//! use serde_json::json;
//!
//! async fn example() {
//!     let registry = Registry::new(RegistryConfig::default()).unwrap();
//!     let wallet = Keypair::generate();
//!     let address = wallet.address();
//!
//!     let challenge = registry.request_message_ownership_verification(&address);
//!     let signature = wallet.sign_hex(&challenge);
//!
//!     let block = registry
//!         .submit_star(&address, &challenge, &signature, json!({"ra": "16h 29m 1.0s"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod ownership;
pub mod query;
pub mod registry;

pub use star_registry_core as core;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RegistryConfig;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use ownership::{Challenge, OwnershipProof};
pub use registry::Registry;

pub use star_registry_core::{
    Block, BlockDraft, BlockHash, ChainViolation, Claim, Keypair, SignatureVerifier,
    ViolationKind,
};
