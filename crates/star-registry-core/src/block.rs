//! Block: one committed entry of the ledger.
//!
//! A block is immutable once sealed. Its hash covers height, timestamp,
//! link hash, and payload; a successor commits to it by recording that hash
//! as its `previous_hash`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::content_hash;
use crate::error::CoreError;
use crate::types::BlockHash;

/// A sealed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BlockRecord", try_from = "BlockRecord")]
pub struct Block {
    /// Position in the chain (genesis is 0).
    pub height: u64,

    /// When the block was sealed (Unix seconds).
    pub timestamp: i64,

    /// Hash of the predecessor (None for genesis).
    pub previous_hash: Option<BlockHash>,

    /// Blake3 hash of the canonical content, as recorded at seal time.
    pub hash: BlockHash,

    /// Opaque payload bytes (JSON-encoded claim or genesis record).
    pub payload: Bytes,
}

impl Block {
    /// Recompute the content hash from the block's current fields.
    pub fn compute_hash(&self) -> BlockHash {
        content_hash(
            self.height,
            self.timestamp,
            self.previous_hash.as_ref(),
            &self.payload,
        )
    }

    /// Check the recorded hash against a freshly recomputed one.
    pub fn has_valid_hash(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_hash.is_none()
    }

    /// Decode the payload as an ownership claim.
    pub fn decode_claim(&self) -> Result<Claim, CoreError> {
        Claim::from_bytes(&self.payload)
    }
}

/// A block before it has been linked and sealed.
///
/// Only the payload is chosen by the caller; the ledger fills in the
/// link and identity fields when it appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    payload: Bytes,
}

impl BlockDraft {
    /// Create a draft carrying an arbitrary payload.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Create a draft carrying an encoded ownership claim.
    pub fn for_claim(claim: &Claim) -> Result<Self, CoreError> {
        Ok(Self::new(claim.to_bytes()?))
    }

    /// Create the genesis draft.
    pub fn genesis(data: &str) -> Result<Self, CoreError> {
        let record = GenesisRecord {
            data: data.to_string(),
        };
        Ok(Self::new(serde_json::to_vec(&record)?))
    }

    /// The payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Fill in link and identity fields and compute the hash.
    pub fn seal(self, height: u64, timestamp: i64, previous_hash: Option<BlockHash>) -> Block {
        let hash = content_hash(height, timestamp, previous_hash.as_ref(), &self.payload);
        Block {
            height,
            timestamp,
            previous_hash,
            hash,
            payload: self.payload,
        }
    }
}

/// An ownership claim: the decoded payload of a non-genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The wallet address that proved ownership.
    pub owner: String,

    /// The registered record (e.g. a star's coordinates and story).
    pub star: serde_json::Value,
}

impl Claim {
    /// Create a claim.
    pub fn new(owner: impl Into<String>, star: serde_json::Value) -> Self {
        Self {
            owner: owner.into(),
            star,
        }
    }

    /// Encode to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Payload of the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisRecord {
    pub data: String,
}

/// At-rest shape of a block.
///
/// `time` is a decimal string of Unix seconds, hashes are lowercase hex,
/// and `body` is the hex-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub height: u64,
    pub time: String,
    pub hash: String,
    pub previous_block_hash: Option<String>,
    pub body: String,
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        Self {
            height: block.height,
            time: block.timestamp.to_string(),
            hash: block.hash.to_hex(),
            previous_block_hash: block.previous_hash.map(|h| h.to_hex()),
            body: hex::encode(&block.payload),
        }
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = CoreError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        let timestamp = record
            .time
            .parse::<i64>()
            .map_err(|e| CoreError::MalformedBlock(format!("invalid time: {e}")))?;

        let hash = BlockHash::from_hex(&record.hash)
            .map_err(|e| CoreError::MalformedBlock(format!("invalid hash: {e}")))?;

        let previous_hash = record
            .previous_block_hash
            .as_deref()
            .map(BlockHash::from_hex)
            .transpose()
            .map_err(|e| CoreError::MalformedBlock(format!("invalid previousBlockHash: {e}")))?;

        let payload = hex::decode(&record.body)
            .map_err(|e| CoreError::MalformedBlock(format!("invalid body: {e}")))?;

        Ok(Block {
            height: record.height,
            timestamp,
            previous_hash,
            hash,
            payload: payload.into(),
        })
    }
}
