//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use star_registry_core::{BlockHash, Keypair};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a star record with coordinates and a short story.
pub fn star_record() -> impl Strategy<Value = Value> {
    (0u8..24, 0u8..60, -90i8..=90, "[a-zA-Z ]{0,40}").prop_map(|(h, m, dec, story)| {
        json!({
            "ra": format!("{h}h {m}m 0.0s"),
            "dec": format!("{dec}° 0' 0.0"),
            "story": story,
        })
    })
}

/// Generate an owner drawn from a small pool, so owners repeat.
pub fn owner(pool: u8) -> impl Strategy<Value = String> {
    (0..pool).prop_map(|i| format!("owner-{i}"))
}

/// Generate a sequence of (owner, star) claims.
pub fn claims(max_len: usize) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((owner(4), star_record()), 0..=max_len)
}
