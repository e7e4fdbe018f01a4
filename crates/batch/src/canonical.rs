//! The canonical pre-proof batch record.

use alloc::vec::Vec;
use alloy_primitives::BlockHash;
use alloy_rlp::{Encodable, RlpEncodable};
use opda_primitives::{anchor::L1AnchorInfo, raw_tx::RawTransaction};

/// The canonical batch record the availability oracle commits to: one
/// sequenced L2 block reduced to its settlement-relevant fields.
///
/// The RLP encoding of this struct, in this exact field order, is the byte
/// string the oracle signs. Reordering or omitting a field invalidates every
/// previously issued proof, so the layout changes only together with the
/// committee.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable)]
pub struct CanonicalBatch {
    /// Block hash of the previous L2 block.
    pub parent_hash: BlockHash,
    /// The batch epoch number. Same as the anchored L1 block number.
    pub epoch_num: u64,
    /// The hash of the anchored L1 block.
    pub epoch_hash: BlockHash,
    /// The L2 block timestamp of this batch.
    pub timestamp: u64,
    /// The user transactions of this batch, in block order.
    pub transactions: Vec<RawTransaction>,
}

impl CanonicalBatch {
    /// Assembles a batch from a block's parent hash and timestamp, the anchor
    /// it was sequenced against, and its filtered user transactions.
    pub fn new(
        parent_hash: BlockHash,
        anchor: &L1AnchorInfo,
        timestamp: u64,
        transactions: Vec<RawTransaction>,
    ) -> Self {
        Self {
            parent_hash,
            epoch_num: anchor.number,
            epoch_hash: anchor.block_hash,
            timestamp,
            transactions,
        }
    }

    /// The canonical encoding the oracle commits to.
    pub fn encoded(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        out
    }
}
