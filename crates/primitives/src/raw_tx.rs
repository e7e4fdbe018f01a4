//! The raw, opaque byte form of batched transactions.

use alloc::vec::Vec;
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, Encodable};
use op_alloy_consensus::{OpTxEnvelope, OpTxType};

/// A transaction in its canonical EIP-2718 envelope encoding.
///
/// Batch transaction lists carry these opaque byte strings rather than typed
/// envelopes. The leading byte doubles as the envelope type tag, which is the
/// only part of a user transaction the batching pipeline ever inspects.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawTransaction(pub Bytes);

impl RawTransaction {
    /// Encodes a typed envelope into its raw byte form.
    pub fn from_envelope(tx: &OpTxEnvelope) -> Self {
        let mut buf = Vec::with_capacity(tx.encode_2718_len());
        tx.encode_2718(&mut buf);
        Self(buf.into())
    }

    /// Returns `true` if the transaction carries no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the transaction is the protocol-injected deposit variant.
    pub fn is_deposit(&self) -> bool {
        self.0.first().is_some_and(|ty| *ty == OpTxType::Deposit as u8)
    }
}

impl<T: Into<Bytes>> From<T> for RawTransaction {
    fn from(bytes: T) -> Self {
        Self(bytes.into())
    }
}

impl AsRef<[u8]> for RawTransaction {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Encodable for RawTransaction {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.encode(out)
    }
}

impl Decodable for RawTransaction {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Bytes::decode(buf).map(Self)
    }
}
