//! Read-only lookups over a ledger.

use star_registry_core::{Block, BlockHash, Claim};
use tracing::trace;

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

impl Ledger {
    /// Find the block with the given hash.
    pub fn by_hash(&self, hash: &BlockHash) -> Result<&Block> {
        self.blocks()
            .iter()
            .find(|b| &b.hash == hash)
            .ok_or_else(|| LedgerError::NotFound(format!("block with hash {}", hash.to_hex())))
    }

    /// Find the block at the given height.
    pub fn by_height(&self, height: u64) -> Result<&Block> {
        usize::try_from(height)
            .ok()
            .and_then(|i| self.blocks().get(i))
            .ok_or_else(|| LedgerError::NotFound(format!("block at height {height}")))
    }

    /// Collect every claim owned by `address`, in append order.
    ///
    /// Blocks whose payload is not a claim (such as genesis) and claims of
    /// other owners are skipped.
    pub fn by_owner(&self, address: &str) -> Vec<Claim> {
        self.blocks()
            .iter()
            .filter_map(|block| match block.decode_claim() {
                Ok(claim) => Some(claim),
                Err(e) => {
                    trace!(height = block.height, error = %e, "skipping non-claim block");
                    None
                }
            })
            .filter(|claim| claim.owner == address)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use star_registry_core::BlockDraft;

    const T0: i64 = 1_700_000_000;

    fn claim_draft(owner: &str, n: i64) -> BlockDraft {
        BlockDraft::for_claim(&Claim::new(owner, json!({ "n": n }))).unwrap()
    }

    #[test]
    fn test_by_height() {
        let mut ledger = Ledger::new("Genesis Block", T0).unwrap();
        let block = ledger.append(claim_draft("a", 1), T0 + 1).unwrap();

        assert_eq!(ledger.by_height(1).unwrap(), &block);
        assert!(ledger.by_height(0).unwrap().is_genesis());
        assert!(matches!(ledger.by_height(2), Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_by_hash() {
        let mut ledger = Ledger::new("Genesis Block", T0).unwrap();
        let block = ledger.append(claim_draft("a", 1), T0 + 1).unwrap();

        assert_eq!(ledger.by_hash(&block.hash).unwrap(), &block);
        let missing = BlockHash::from_bytes([0x99; 32]);
        assert!(matches!(ledger.by_hash(&missing), Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_by_owner_skips_other_owners_and_genesis() {
        let mut ledger = Ledger::new("Genesis Block", T0).unwrap();
        ledger.append(claim_draft("a", 1), T0 + 1).unwrap();
        ledger.append(claim_draft("b", 2), T0 + 2).unwrap();
        ledger.append(BlockDraft::new(b"not json".to_vec()), T0 + 3).unwrap();
        ledger.append(claim_draft("a", 3), T0 + 4).unwrap();

        let claims = ledger.by_owner("a");
        assert_eq!(
            claims,
            vec![
                Claim::new("a", json!({ "n": 1 })),
                Claim::new("a", json!({ "n": 3 })),
            ]
        );
        assert_eq!(ledger.by_owner("b").len(), 1);
        assert!(ledger.by_owner("nobody").is_empty());
    }
}
