//! The typed form of a sequenced L2 block.

use alloc::vec::Vec;
use alloy_consensus::Header;
use op_alloy_consensus::OpTxEnvelope;

/// A sequenced L2 block as handed over by the execution engine: a consensus
/// header plus the ordered transaction envelopes it committed to.
///
/// The batching pipeline consumes the payload form ([crate::payload::BlockPayload]);
/// this type exists for callers holding engine output and converts losslessly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L2Block {
    /// Block header.
    pub header: Header,
    /// Transactions in this block.
    pub body: Vec<OpTxEnvelope>,
}
