//! The payload form of a sequenced L2 block.

use alloc::vec::Vec;
use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::{block::L2Block, raw_tx::RawTransaction};

/// The payload form of a sequenced L2 block: the header fields the batching
/// pipeline needs, plus every transaction in its canonical envelope encoding.
///
/// For a block to be convertible into a batch, the transaction list must be
/// non-empty and lead with the protocol-injected anchor deposit.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPayload {
    /// The block hash.
    pub block_hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block number.
    pub block_number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The transactions, each in canonical EIP-2718 envelope encoding.
    pub transactions: Vec<Bytes>,
}

impl From<L2Block> for BlockPayload {
    fn from(block: L2Block) -> Self {
        let L2Block { header, body } = block;
        Self {
            block_hash: header.hash_slow(),
            parent_hash: header.parent_hash,
            block_number: header.number,
            timestamp: header.timestamp,
            transactions: body.iter().map(|tx| RawTransaction::from_envelope(tx).0).collect(),
        }
    }
}
