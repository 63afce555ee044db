//! Chain validation: link checks and per-block content-hash integrity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::Block;
use crate::types::BlockHash;

/// The kind of integrity violation found at a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// `previous_hash` does not commit to the predecessor.
    BrokenLink,
    /// Recorded hash differs from the recomputed content hash.
    TamperedHash,
    /// Recorded height differs from the block's position.
    HeightMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::BrokenLink => write!(f, "broken link"),
            ViolationKind::TamperedHash => write!(f, "tampered hash"),
            ViolationKind::HeightMismatch => write!(f, "height mismatch"),
        }
    }
}

/// A single integrity violation detected during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainViolation {
    /// Position of the offending block.
    pub height: u64,
    pub kind: ViolationKind,
    pub detail: String,
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at height {}: {}", self.kind, self.height, self.detail)
    }
}

/// Validate a whole chain in a single forward pass.
///
/// Every violation is collected; an empty result means the chain is valid.
///
/// A link is intact when `previous_hash` matches either the predecessor's
/// recorded hash or its recomputed hash. For an untampered predecessor the
/// two are equal; when the predecessor is itself tampered, that block is
/// already reported and its successor is not blamed for it.
pub fn validate_chain<'a, I>(blocks: I) -> Vec<ChainViolation>
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut violations = Vec::new();
    let mut predecessor: Option<(BlockHash, BlockHash)> = None;

    for (index, block) in blocks.into_iter().enumerate() {
        let position = index as u64;
        let computed = block.compute_hash();

        if block.height != position {
            violations.push(ChainViolation {
                height: position,
                kind: ViolationKind::HeightMismatch,
                detail: format!("expected height {position}, found {}", block.height),
            });
        }

        match (&predecessor, &block.previous_hash) {
            (None, None) => {}
            (None, Some(prev)) => violations.push(ChainViolation {
                height: position,
                kind: ViolationKind::BrokenLink,
                detail: format!("genesis links to {prev}"),
            }),
            (Some(_), None) => violations.push(ChainViolation {
                height: position,
                kind: ViolationKind::BrokenLink,
                detail: "missing previous hash".into(),
            }),
            (Some((recorded, recomputed)), Some(prev)) => {
                if prev != recorded && prev != recomputed {
                    violations.push(ChainViolation {
                        height: position,
                        kind: ViolationKind::BrokenLink,
                        detail: format!("previous hash {prev} does not match block {}", position - 1),
                    });
                }
            }
        }

        if computed != block.hash {
            violations.push(ChainViolation {
                height: position,
                kind: ViolationKind::TamperedHash,
                detail: format!("recorded {}, computed {computed}", block.hash),
            });
        }

        predecessor = Some((block.hash, computed));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockDraft;

    fn build_chain(len: usize) -> Vec<Block> {
        let mut chain: Vec<Block> = Vec::with_capacity(len);
        for i in 0..len {
            let previous_hash = chain.last().map(|b| b.hash);
            let draft = BlockDraft::new(format!("block-{i}").into_bytes());
            chain.push(draft.seal(i as u64, 1_700_000_000 + i as i64, previous_hash));
        }
        chain
    }

    fn heights(violations: &[ChainViolation]) -> Vec<u64> {
        let mut hs: Vec<u64> = violations.iter().map(|v| v.height).collect();
        hs.dedup();
        hs
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&Vec::<Block>::new()).is_empty());
    }

    #[test]
    fn test_untouched_chain_is_valid() {
        let chain = build_chain(5);
        assert!(validate_chain(&chain).is_empty());
    }

    #[test]
    fn test_tampered_payload_reported() {
        let mut chain = build_chain(4);
        chain[2].payload = b"forged".to_vec().into();

        let violations = validate_chain(&chain);
        assert_eq!(heights(&violations), vec![2]);
        assert_eq!(violations[0].kind, ViolationKind::TamperedHash);
    }

    #[test]
    fn test_corrupted_hash_blames_only_that_block() {
        let mut chain = build_chain(4);
        chain[1].hash = BlockHash::from_bytes([0xee; 32]);

        let violations = validate_chain(&chain);
        assert_eq!(heights(&violations), vec![1]);
        assert_eq!(violations[0].kind, ViolationKind::TamperedHash);
    }

    #[test]
    fn test_corrupted_previous_hash_blames_only_that_block() {
        let mut chain = build_chain(4);
        chain[2].previous_hash = Some(BlockHash::from_bytes([0xee; 32]));

        let violations = validate_chain(&chain);
        assert_eq!(heights(&violations), vec![2]);
        let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![ViolationKind::BrokenLink, ViolationKind::TamperedHash]);
    }

    #[test]
    fn test_collects_all_violations() {
        let mut chain = build_chain(6);
        chain[1].payload = b"x".to_vec().into();
        chain[4].hash = BlockHash::from_bytes([0x01; 32]);

        let violations = validate_chain(&chain);
        assert_eq!(heights(&violations), vec![1, 4]);
    }

    #[test]
    fn test_removed_block_breaks_link() {
        let mut chain = build_chain(4);
        chain.remove(1);

        let violations = validate_chain(&chain);
        assert!(violations
            .iter()
            .any(|v| v.height == 1 && v.kind == ViolationKind::BrokenLink));
        assert!(violations
            .iter()
            .any(|v| v.height == 1 && v.kind == ViolationKind::HeightMismatch));
    }

    #[test]
    fn test_genesis_with_link_reported() {
        let chain = vec![BlockDraft::new(b"g".to_vec()).seal(0, 1, Some(BlockHash::from_bytes([1; 32])))];

        let violations = validate_chain(&chain);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::BrokenLink);
    }
}
