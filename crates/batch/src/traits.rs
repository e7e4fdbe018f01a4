//! Traits for the capabilities the pipeline consumes.

use crate::canonical::CanonicalBatch;
use opda_primitives::proof::{Commitment, DaSignature};

/// The data-availability oracle: the injected capability that commits to and
/// signs canonical batches.
///
/// Implementations must be deterministic functions of the canonical batch
/// encoding: byte-identical encodings yield byte-identical output. The
/// pipeline never inspects the returned material; its widths are fixed by
/// [Commitment] and [DaSignature] and re-checked when a sealed batch is read
/// back.
///
/// The oracle call is the only potentially blocking dependency of a
/// conversion; bounding it is the caller's concern.
pub trait DaOracle {
    /// Produces the commitment over the canonical encoding of `batch`.
    fn commitment(&self, batch: &CanonicalBatch) -> Commitment;

    /// Produces the committee signature over the canonical encoding of `batch`.
    fn signature(&self, batch: &CanonicalBatch) -> DaSignature;
}
