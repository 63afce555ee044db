//! # Star Registry Testkit
//!
//! Testing utilities for the Star Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a wallet, a manual clock, and a registry wired together
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! ```rust
//! use star_registry_testkit::fixtures::TestFixture;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fixture = TestFixture::new();
//! let block = fixture.register(json!({"story": "first light"})).await.unwrap();
//! assert_eq!(block.height, 1);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use star_registry_testkit::{claims, ledger_with_claims};
//!
//! proptest! {
//!     #[test]
//!     fn fresh_ledgers_validate(claims in claims(10)) {
//!         prop_assert!(ledger_with_claims(&claims).validate().is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{ledger_with_claims, wallets, TestFixture, FIXTURE_EPOCH};
pub use generators::{block_hash, claims, keypair, owner, payload, star_record};
