//! The sealed batch envelope handed to the channel layer.

use alloc::vec::Vec;
use alloy_primitives::BlockHash;
use alloy_rlp::{Buf, Decodable, Encodable, RlpDecodable, RlpEncodable};
use opda_primitives::{
    proof::{DaProof, ProofCodecError},
    raw_tx::RawTransaction,
};

use crate::{canonical::CanonicalBatch, errors::BatchDecodeError};

/// The version byte leading every encoded batch envelope.
pub const OUTPUT_BATCH_VERSION: u8 = 0x00;

/// A sealed batch: the canonical batch metadata plus a transaction list whose
/// final entry is the serialized availability proof.
///
/// The proof rides in the transaction list so the envelope's wire shape never
/// changes; readers recover it through [Self::split_proof], which validates
/// the entry instead of trusting its position blindly.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct OutputBatch {
    /// Block hash of the previous L2 block.
    pub parent_hash: BlockHash,
    /// The batch epoch number. Same as the anchored L1 block number.
    pub epoch_num: u64,
    /// The hash of the anchored L1 block.
    pub epoch_hash: BlockHash,
    /// The L2 block timestamp of this batch.
    pub timestamp: u64,
    /// The user transactions, followed by the trailing proof entry.
    pub transactions: Vec<RawTransaction>,
}

impl OutputBatch {
    /// Seals a canonical batch by appending the serialized proof as the
    /// trailing transaction entry.
    pub fn seal(batch: CanonicalBatch, proof: &DaProof) -> Result<Self, ProofCodecError> {
        let CanonicalBatch { parent_hash, epoch_num, epoch_hash, timestamp, mut transactions } =
            batch;
        transactions.push(proof.to_entry()?);
        Ok(Self { parent_hash, epoch_num, epoch_hash, timestamp, transactions })
    }

    /// Encodes the batch envelope: the version byte followed by the RLP body.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(OUTPUT_BATCH_VERSION);
        Encodable::encode(self, out);
    }

    /// Decodes a batch envelope produced by [Self::encode].
    pub fn decode(r: &mut &[u8]) -> Result<Self, BatchDecodeError> {
        if r.is_empty() {
            return Err(BatchDecodeError::EmptyBuffer);
        }
        let version = r[0];
        if version != OUTPUT_BATCH_VERSION {
            return Err(BatchDecodeError::UnsupportedVersion(version));
        }
        r.advance(1);
        <Self as Decodable>::decode(r).map_err(BatchDecodeError::Rlp)
    }

    /// Splits the transaction list into the user transactions and the
    /// trailing availability proof, validating the proof entry's shape and
    /// widths.
    pub fn split_proof(&self) -> Result<(&[RawTransaction], DaProof), BatchDecodeError> {
        let Some((entry, user)) = self.transactions.split_last() else {
            return Err(BatchDecodeError::MissingProofEntry);
        };
        let proof = DaProof::from_entry(entry)?;
        Ok((user, proof))
    }

    /// The availability proof carried by the trailing entry.
    pub fn proof(&self) -> Result<DaProof, BatchDecodeError> {
        self.split_proof().map(|(_, proof)| proof)
    }

    /// The user transactions, excluding the trailing proof entry.
    pub fn user_transactions(&self) -> Result<&[RawTransaction], BatchDecodeError> {
        self.split_proof().map(|(user, _)| user)
    }

    /// Whether any user transaction entry could never legitimately appear in
    /// a batch: empty, or carrying the deposit type tag.
    pub fn has_invalid_transactions(&self) -> bool {
        // The trailing proof entry is not a transaction and is exempt.
        match self.transactions.split_last() {
            Some((_, user)) => user.iter().any(|tx| tx.is_empty() || tx.is_deposit()),
            None => false,
        }
    }
}
