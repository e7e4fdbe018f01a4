//! Test utilities for the batch pipeline.

use alloc::{format, string::String, sync::Arc, vec::Vec};
use alloy_primitives::keccak256;
use opda_primitives::proof::{Commitment, DaSignature};
use spin::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

use crate::{canonical::CanonicalBatch, traits::DaOracle};

/// A [DaOracle] returning preconfigured bytes, for driving the pipeline
/// without the committee's crypto.
#[derive(Debug, Clone, Default)]
pub struct TestDaOracle {
    /// The commitment returned for every batch.
    pub commitment: Commitment,
    /// The signature returned for every batch.
    pub signature: DaSignature,
}

impl DaOracle for TestDaOracle {
    fn commitment(&self, _batch: &CanonicalBatch) -> Commitment {
        self.commitment
    }

    fn signature(&self, _batch: &CanonicalBatch) -> DaSignature {
        self.signature
    }
}

/// A [DaOracle] deriving its output from the canonical encoding itself, so
/// identical encodings provably yield identical proofs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoDaOracle;

impl DaOracle for EchoDaOracle {
    fn commitment(&self, batch: &CanonicalBatch) -> Commitment {
        let digest = keccak256(batch.encoded());
        let mut out = Commitment::ZERO;
        out[..32].copy_from_slice(digest.as_slice());
        out
    }

    fn signature(&self, batch: &CanonicalBatch) -> DaSignature {
        let digest = keccak256(batch.encoded());
        let mut out = DaSignature::ZERO;
        out[..32].copy_from_slice(digest.as_slice());
        out[32..].copy_from_slice(digest.as_slice());
        out
    }
}

/// The storage behind a [RecordingLayer]: the events captured so far, with
/// their levels.
#[derive(Debug, Default, Clone)]
pub struct TraceStore(Arc<Mutex<Vec<(Level, String)>>>);

impl TraceStore {
    /// Returns the formatted events captured at `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.0.lock().iter().filter(|(l, _)| *l == level).map(|(_, msg)| msg.clone()).collect()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// A `tracing-subscriber` layer recording every event into a [TraceStore] so
/// tests can assert on emitted diagnostics.
#[derive(Debug, Default)]
pub struct RecordingLayer {
    store: TraceStore,
}

impl RecordingLayer {
    /// Creates a layer recording into `store`.
    pub const fn new(store: TraceStore) -> Self {
        Self { store }
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut events = self.store.0.lock();
        events.push((*event.metadata().level(), format!("{event:?}")));
    }
}
