//! The ledger: an owned, append-only sequence of hash-linked blocks.
//!
//! Mutation has one entry point, [`Ledger::append`], which takes `&mut self`.
//! Callers that share a ledger across tasks wrap it in a lock (see
//! [`Registry`](crate::Registry)), so at most one append is ever in flight.

use star_registry_core::{validate_chain, Block, BlockDraft, ChainViolation};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};

/// An in-memory chain of blocks.
#[derive(Debug, Clone)]
pub struct Ledger {
    blocks: Vec<Block>,
}

impl Ledger {
    /// Create a ledger and append its genesis block.
    pub fn new(genesis_data: &str, now: i64) -> Result<Self> {
        let mut ledger = Self { blocks: Vec::new() };
        let genesis = ledger.append(BlockDraft::genesis(genesis_data)?, now)?;
        info!(hash = %genesis.hash, "created genesis block");
        Ok(ledger)
    }

    /// Adopt an externally supplied block sequence as-is.
    ///
    /// Nothing is checked here; run [`Ledger::validate`] to audit it. Appends
    /// onto a sequence that does not validate are rejected.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Index of the last block, or -1 when the chain is empty.
    pub fn height(&self) -> i64 {
        self.blocks.len() as i64 - 1
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks, in height order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The last block, if any.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Link, seal, validate, and commit a draft.
    ///
    /// The chain is validated as it would look with the new block on top.
    /// Any violation rejects the append and leaves the chain untouched.
    pub fn append(&mut self, draft: BlockDraft, now: i64) -> Result<Block> {
        let previous_hash = self.tip().map(|b| b.hash);
        let height = self.blocks.len() as u64;

        let block = draft.seal(height, now, previous_hash);

        let violations = validate_chain(self.blocks.iter().chain(std::iter::once(&block)));
        if !violations.is_empty() {
            warn!(
                height,
                violations = violations.len(),
                "append rejected: chain failed validation"
            );
            return Err(LedgerError::ChainIntegrityViolation(violations));
        }

        debug!(height, hash = %block.hash, "appended block");
        self.blocks.push(block.clone());
        Ok(block)
    }

    /// Validate the whole chain.
    pub fn validate(&self) -> Vec<ChainViolation> {
        validate_chain(&self.blocks)
    }
}
