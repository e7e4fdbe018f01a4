//! The data-availability proof attached to sealed batches.

use alloc::string::{String, ToString};
use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raw_tx::RawTransaction;

/// The exact byte width of a DA commitment.
pub const COMMITMENT_LEN: usize = 50;

/// The exact byte width of a DA committee signature.
pub const SIGNATURE_LEN: usize = 64;

/// A commitment over a canonical batch encoding.
pub type Commitment = FixedBytes<COMMITMENT_LEN>;

/// A committee signature over a canonical batch encoding.
pub type DaSignature = FixedBytes<SIGNATURE_LEN>;

/// An error serializing or parsing a proof entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Proof entry codec failure: {0}")]
pub struct ProofCodecError(pub String);

/// The data-availability proof for a canonical batch: the committee's
/// commitment and its signature over the same encoding.
///
/// The proof travels as the final, synthetic entry of a sealed batch's
/// transaction list, in a field-named encoding so format additions stay
/// backward tolerant. Both widths are hard contracts with the committee;
/// mis-sized material is rejected at decode time, never resized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaProof {
    /// The commitment over the canonical batch encoding.
    pub commitment: Commitment,
    /// The committee signature over the canonical batch encoding.
    pub signature: DaSignature,
}

impl DaProof {
    /// Creates a new proof from its parts.
    pub const fn new(commitment: Commitment, signature: DaSignature) -> Self {
        Self { commitment, signature }
    }

    /// Serializes the proof into the byte form carried as the trailing batch
    /// entry.
    pub fn to_entry(&self) -> Result<RawTransaction, ProofCodecError> {
        let bytes = serde_json::to_vec(self).map_err(|e| ProofCodecError(e.to_string()))?;
        Ok(RawTransaction(bytes.into()))
    }

    /// Parses a trailing batch entry back into a proof.
    pub fn from_entry(entry: &RawTransaction) -> Result<Self, ProofCodecError> {
        serde_json::from_slice(entry.as_ref()).map_err(|e| ProofCodecError(e.to_string()))
    }
}
