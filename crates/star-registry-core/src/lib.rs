//! # Star Registry Core
//!
//! Pure primitives for the Star Registry: blocks, canonical hashing, wallet
//! signatures, and chain validation.
//!
//! This crate contains no I/O, no locking, no clocks. It is pure computation
//! over hash-linked blocks.
//!
//! ## Key Types
//!
//! - [`Block`] - A sealed, hash-linked ledger entry
//! - [`BlockDraft`] - A payload waiting to be linked and sealed
//! - [`BlockHash`] - Content-addressed identifier (Blake3 hash)
//! - [`Claim`] - The decoded ownership record carried by a block
//! - [`SignatureVerifier`] - The `verify(message, address, signature)` seam
//!
//! ## Canonicalization
//!
//! Block content is hashed over deterministic CBOR. See [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validation;

pub use block::{Block, BlockDraft, BlockRecord, Claim, GenesisRecord};
pub use canonical::{canonical_content_bytes, content_hash};
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Ed25519Verifier, Keypair, SignatureVerifier};
pub use error::CoreError;
pub use types::BlockHash;
pub use validation::{validate_chain, ChainViolation, ViolationKind};
