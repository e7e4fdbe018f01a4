//! The L1 anchor attributes transaction and its calldata codec.

use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, Bytes, FixedBytes, B256};
use op_alloy_consensus::TxDeposit;
use thiserror::Error;

/// The length of the encoded anchor attributes calldata.
const ANCHOR_CALLDATA_LEN: usize = 4 + 8 * 3 + 32 * 2;

/// The 4 byte selector of the anchor attributes update call.
const ANCHOR_TX_SELECTOR: [u8; 4] = [0x2e, 0x97, 0x3c, 0x0d];

/// An error decoding or validating anchor attributes calldata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorInfoError {
    /// The calldata is too short to carry a selector.
    #[error("Anchor calldata too short: {0} bytes")]
    TooShort(usize),
    /// The selector does not match the anchor attributes call.
    #[error("Unrecognized anchor selector: {0}")]
    UnrecognizedSelector(FixedBytes<4>),
    /// The calldata length does not match the anchor attributes layout.
    #[error("Invalid anchor calldata length: {0}")]
    InvalidLength(usize),
    /// The anchor transaction envelope itself failed to decode.
    #[error("Anchor transaction decode failure: {0}")]
    TxDecode(String),
}

/// The L1 anchor attributes carried by the leading deposit transaction of
/// every sequenced block: the view of the base layer the block was built
/// against.
///
/// `number` and `block_hash` anchor the block's epoch; the remaining fields
/// ride along in the calldata and are surfaced for callers that need them.
///
/// Anchor Binary Format
/// +---------+--------------------------+
/// | Bytes   | Field                    |
/// +---------+--------------------------+
/// | 4       | Function signature       |
/// | 8       | Number                   |
/// | 8       | Time                     |
/// | 8       | SequenceNumber           |
/// | 32      | BlockHash                |
/// | 32      | BatcherHash              |
/// +---------+--------------------------+
#[derive(Debug, Clone, Hash, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct L1AnchorInfo {
    /// The anchored L1 block number (the batch epoch).
    pub number: u64,
    /// The anchored L1 block's timestamp.
    pub time: u64,
    /// The distance of the L2 block from the start of its epoch.
    pub sequence_number: u64,
    /// The anchored L1 block's hash (the batch epoch hash).
    pub block_hash: B256,
    /// The address of the batch submitter registered at the anchor.
    pub batcher_address: Address,
}

impl L1AnchorInfo {
    /// Parses the anchor attributes from the calldata of the given deposit
    /// transaction.
    pub fn from_deposit(tx: &TxDeposit) -> Result<Self, AnchorInfoError> {
        Self::decode_calldata(tx.input.as_ref())
    }

    /// Decodes the [L1AnchorInfo] from anchor transaction calldata.
    pub fn decode_calldata(r: &[u8]) -> Result<Self, AnchorInfoError> {
        if r.len() < 4 {
            return Err(AnchorInfoError::TooShort(r.len()));
        }
        if r[0..4] != ANCHOR_TX_SELECTOR {
            return Err(AnchorInfoError::UnrecognizedSelector(FixedBytes::from_slice(&r[0..4])));
        }
        if r.len() != ANCHOR_CALLDATA_LEN {
            return Err(AnchorInfoError::InvalidLength(r.len()));
        }

        let number = u64::from_be_bytes(
            r[4..12].try_into().map_err(|_| AnchorInfoError::InvalidLength(r.len()))?,
        );
        let time = u64::from_be_bytes(
            r[12..20].try_into().map_err(|_| AnchorInfoError::InvalidLength(r.len()))?,
        );
        let sequence_number = u64::from_be_bytes(
            r[20..28].try_into().map_err(|_| AnchorInfoError::InvalidLength(r.len()))?,
        );
        let block_hash = B256::from_slice(&r[28..60]);
        let batcher_address = Address::from_slice(&r[72..92]);

        Ok(Self { number, time, sequence_number, block_hash, batcher_address })
    }

    /// Encodes the [L1AnchorInfo] into anchor transaction calldata.
    pub fn encode_calldata(&self) -> Bytes {
        let mut buf = Vec::with_capacity(ANCHOR_CALLDATA_LEN);
        buf.extend_from_slice(ANCHOR_TX_SELECTOR.as_ref());
        buf.extend_from_slice(self.number.to_be_bytes().as_ref());
        buf.extend_from_slice(self.time.to_be_bytes().as_ref());
        buf.extend_from_slice(self.sequence_number.to_be_bytes().as_ref());
        buf.extend_from_slice(self.block_hash.as_slice());
        buf.extend_from_slice(self.batcher_address.into_word().as_slice());
        buf.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::{address, b256, hex};

    const RAW_ANCHOR_TX: [u8; ANCHOR_CALLDATA_LEN] = hex!("2e973c0d0000000000000064000000006553f1000000000000000004bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb000000000000000000000000b01dfacec0ffee54deb3b94ba47a6f63f3298542");

    #[test]
    fn test_decode_anchor_calldata() {
        let expected = L1AnchorInfo {
            number: 100,
            time: 1_700_000_000,
            sequence_number: 4,
            block_hash: b256!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            batcher_address: address!("b01dfacec0ffee54deb3b94ba47a6f63f3298542"),
        };
        let decoded = L1AnchorInfo::decode_calldata(RAW_ANCHOR_TX.as_ref()).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_anchor_calldata_roundtrip() {
        let decoded = L1AnchorInfo::decode_calldata(RAW_ANCHOR_TX.as_ref()).unwrap();
        assert_eq!(decoded.encode_calldata().as_ref(), RAW_ANCHOR_TX);
    }

    #[test]
    fn test_truncated_anchor_calldata() {
        let err = L1AnchorInfo::decode_calldata(&[0xde]).unwrap_err();
        assert_eq!(err, AnchorInfoError::TooShort(1));
    }

    #[test]
    fn test_unrecognized_anchor_selector() {
        let err = L1AnchorInfo::decode_calldata(&hex!("deadbeef00")).unwrap_err();
        assert_eq!(
            err,
            AnchorInfoError::UnrecognizedSelector(FixedBytes::from_slice(&hex!("deadbeef")))
        );
    }

    #[test]
    fn test_invalid_anchor_calldata_length() {
        let err = L1AnchorInfo::decode_calldata(&RAW_ANCHOR_TX[0..50]).unwrap_err();
        assert_eq!(err, AnchorInfoError::InvalidLength(50));
    }
}
