//! Error types for the batch conversion pipeline.

use alloc::string::String;
use alloy_primitives::B256;
use opda_primitives::{anchor::AnchorInfoError, proof::ProofCodecError};
use thiserror::Error;

/// An error producing a sealed batch from a sequenced block.
///
/// Every variant is terminal for the conversion attempt: no partial batch is
/// ever returned and nothing is retried internally. Retrying means re-fetching
/// the block and converting again, which is the caller's call to make.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchAssemblyError {
    /// The block carries no transactions at all.
    #[error("Block {0} has no transactions")]
    EmptyBlock(B256),
    /// The leading transaction is not the protocol-injected anchor deposit.
    #[error("Block {0} does not lead with an anchor deposit transaction")]
    MissingAnchorTx(B256),
    /// A user transaction has no usable canonical byte form.
    #[error("Cannot encode transaction {index} of block {block_hash}: {cause}")]
    TransactionEncoding {
        /// The position of the offending transaction in the block.
        index: usize,
        /// The hash of the block being converted.
        block_hash: B256,
        /// What made the byte form unusable.
        cause: String,
    },
    /// The anchor deposit's payload did not parse.
    #[error("Anchor parse failure: {0}")]
    AnchorParse(#[from] AnchorInfoError),
    /// The availability proof could not be serialized into its entry form.
    #[error("Proof serialization failure: {0}")]
    ProofSerialization(#[source] ProofCodecError),
}

/// An error reading a sealed batch envelope back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchDecodeError {
    /// The buffer is empty.
    #[error("Empty batch buffer")]
    EmptyBuffer,
    /// The leading version byte is not a known batch version.
    #[error("Unsupported batch version: {0}")]
    UnsupportedVersion(u8),
    /// The RLP body failed to decode.
    #[error("Batch body RLP failure: {0}")]
    Rlp(alloy_rlp::Error),
    /// The batch carries no trailing proof entry.
    #[error("Batch carries no trailing proof entry")]
    MissingProofEntry,
    /// The trailing proof entry is malformed.
    #[error("Malformed trailing proof entry: {0}")]
    ProofEntry(#[from] ProofCodecError),
}
