//! Converts sequenced blocks into sealed, DA-proven batches.

use alloc::{string::ToString, vec::Vec};
use alloy_eips::eip2718::Decodable2718;
use op_alloy_consensus::{OpTxEnvelope, OpTxType};
use opda_primitives::{
    anchor::{AnchorInfoError, L1AnchorInfo},
    payload::BlockPayload,
    proof::DaProof,
    raw_tx::RawTransaction,
};
use tracing::{trace, warn};

use crate::{
    canonical::CanonicalBatch, errors::BatchAssemblyError, output::OutputBatch, traits::DaOracle,
};

/// A sealed batch paired with the anchor it was derived from. The channel
/// layer needs both independently, so they travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWithAnchor {
    /// The sealed output batch.
    pub batch: OutputBatch,
    /// The L1 anchor attributes parsed from the block's leading deposit.
    pub anchor: L1AnchorInfo,
}

/// Converts sequenced L2 blocks into settlement-ready batches, sealed with
/// the availability proof issued by the configured oracle.
#[derive(Debug, Clone)]
pub struct BatchBuilder<O: DaOracle> {
    /// The oracle committing to and signing canonical batches.
    oracle: O,
}

impl<O: DaOracle> BatchBuilder<O> {
    /// Creates a new builder around the given oracle.
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Converts one block payload into a sealed batch plus its anchor.
    ///
    /// The conversion is all-or-nothing: any failure aborts it and nothing
    /// partial is returned. Two conversions of the same payload against the
    /// same oracle produce byte-identical envelopes.
    pub fn build(&self, payload: &BlockPayload) -> Result<BatchWithAnchor, BatchAssemblyError> {
        let anchor = anchor_info(payload)?;
        let transactions = user_transactions(payload)?;

        let batch =
            CanonicalBatch::new(payload.parent_hash, &anchor, payload.timestamp, transactions);
        let proof = DaProof::new(self.oracle.commitment(&batch), self.oracle.signature(&batch));
        let batch =
            OutputBatch::seal(batch, &proof).map_err(BatchAssemblyError::ProofSerialization)?;

        trace!(
            target: "batch_builder",
            block = %payload.block_hash,
            epoch = anchor.number,
            entries = batch.transactions.len(),
            "sealed batch"
        );
        Ok(BatchWithAnchor { batch, anchor })
    }
}

/// Parses the L1 anchor attributes from the payload's leading deposit
/// transaction.
pub fn anchor_info(payload: &BlockPayload) -> Result<L1AnchorInfo, BatchAssemblyError> {
    let Some(leading) = payload.transactions.first() else {
        warn!(target: "batch_builder", block = %payload.block_hash, "refusing to batch an empty block");
        return Err(BatchAssemblyError::EmptyBlock(payload.block_hash));
    };
    if leading.first() != Some(&(OpTxType::Deposit as u8)) {
        warn!(
            target: "batch_builder",
            block = %payload.block_hash,
            "leading transaction is not an anchor deposit"
        );
        return Err(BatchAssemblyError::MissingAnchorTx(payload.block_hash));
    }

    let tx = OpTxEnvelope::decode_2718(&mut leading.as_ref())
        .map_err(|e| BatchAssemblyError::AnchorParse(AnchorInfoError::TxDecode(e.to_string())))?;
    let OpTxEnvelope::Deposit(tx) = tx else {
        return Err(BatchAssemblyError::MissingAnchorTx(payload.block_hash));
    };
    L1AnchorInfo::from_deposit(&tx).map_err(BatchAssemblyError::from)
}

/// Partitions the payload's transactions, keeping the ordered non-deposit
/// subsequence in canonical byte form.
pub fn user_transactions(
    payload: &BlockPayload,
) -> Result<Vec<RawTransaction>, BatchAssemblyError> {
    if payload.transactions.is_empty() {
        return Err(BatchAssemblyError::EmptyBlock(payload.block_hash));
    }

    let mut txs = Vec::with_capacity(payload.transactions.len());
    for (index, tx) in payload.transactions.iter().enumerate() {
        let Some(ty) = tx.first() else {
            return Err(BatchAssemblyError::TransactionEncoding {
                index,
                block_hash: payload.block_hash,
                cause: "empty transaction body".to_string(),
            });
        };
        if *ty == OpTxType::Deposit as u8 {
            continue;
        }
        txs.push(RawTransaction(tx.clone()));
    }
    Ok(txs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{EchoDaOracle, RecordingLayer, TestDaOracle, TraceStore};
    use alloy_primitives::{address, b256, hex, Bytes, B256, U256};
    use op_alloy_consensus::TxDeposit;
    use opda_primitives::proof::{Commitment, DaSignature, COMMITMENT_LEN, SIGNATURE_LEN};
    use proptest::{collection::vec, prelude::any, proptest};
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    const PARENT_HASH: B256 =
        b256!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const EPOCH_HASH: B256 =
        b256!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    const BLOCK_HASH: B256 =
        b256!("cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc");

    fn anchor_deposit_with_input(input: Bytes) -> Bytes {
        let tx = TxDeposit {
            source_hash: B256::ZERO,
            from: address!("b01dfacec0ffee54deb3b94ba47a6f63f3298542"),
            to: Default::default(),
            mint: None,
            value: U256::ZERO,
            gas_limit: 1_000_000,
            is_system_transaction: false,
            input,
        };
        RawTransaction::from_envelope(&OpTxEnvelope::Deposit(tx)).0
    }

    fn anchor_deposit(number: u64, block_hash: B256) -> Bytes {
        let anchor = L1AnchorInfo {
            number,
            time: 1_699_999_988,
            sequence_number: 0,
            block_hash,
            batcher_address: address!("b01dfacec0ffee54deb3b94ba47a6f63f3298542"),
        };
        anchor_deposit_with_input(anchor.encode_calldata())
    }

    fn payload(transactions: Vec<Bytes>) -> BlockPayload {
        BlockPayload {
            block_hash: BLOCK_HASH,
            parent_hash: PARENT_HASH,
            block_number: 7,
            timestamp: 1_700_000_000,
            transactions,
        }
    }

    #[test]
    fn test_empty_block_rejected() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let err = builder.build(&payload(vec![])).unwrap_err();
        assert_eq!(err, BatchAssemblyError::EmptyBlock(BLOCK_HASH));
    }

    #[test]
    fn test_missing_anchor_rejected() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let err = builder.build(&payload(vec![hex!("02aa").into()])).unwrap_err();
        assert_eq!(err, BatchAssemblyError::MissingAnchorTx(BLOCK_HASH));
    }

    #[test]
    fn test_converts_block_to_sealed_batch() {
        let oracle = TestDaOracle {
            commitment: Commitment::repeat_byte(0x11),
            signature: DaSignature::repeat_byte(0x22),
        };
        let builder = BatchBuilder::new(oracle);

        let tx1 = Bytes::from(hex!("02c0ffee"));
        let tx2 = Bytes::from(hex!("02deadbeef"));
        let payload =
            payload(vec![anchor_deposit(100, EPOCH_HASH), tx1.clone(), tx2.clone()]);

        let BatchWithAnchor { batch, anchor } = builder.build(&payload).unwrap();

        assert_eq!(anchor.number, 100);
        assert_eq!(anchor.block_hash, EPOCH_HASH);

        assert_eq!(batch.parent_hash, PARENT_HASH);
        assert_eq!(batch.epoch_num, 100);
        assert_eq!(batch.epoch_hash, EPOCH_HASH);
        assert_eq!(batch.timestamp, 1_700_000_000);

        let (user, proof) = batch.split_proof().unwrap();
        assert_eq!(user, &[RawTransaction(tx1), RawTransaction(tx2)]);
        assert_eq!(proof.commitment, Commitment::repeat_byte(0x11));
        assert_eq!(proof.signature, DaSignature::repeat_byte(0x22));
        assert_eq!(proof.commitment.len(), COMMITMENT_LEN);
        assert_eq!(proof.signature.len(), SIGNATURE_LEN);
    }

    #[test]
    fn test_deposits_never_leak_into_user_payload() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let user1 = Bytes::from(hex!("02aa"));
        let user2 = Bytes::from(hex!("01bb"));
        let payload = payload(vec![
            anchor_deposit(100, EPOCH_HASH),
            user1.clone(),
            anchor_deposit(100, EPOCH_HASH),
            user2.clone(),
        ]);

        let BatchWithAnchor { batch, .. } = builder.build(&payload).unwrap();
        let (user, _) = batch.split_proof().unwrap();
        assert_eq!(user, &[RawTransaction(user1), RawTransaction(user2)]);
    }

    #[test]
    fn test_truncated_anchor_calldata_rejected() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let payload = payload(vec![anchor_deposit_with_input(hex!("de").into())]);
        let err = builder.build(&payload).unwrap_err();
        assert_eq!(err, BatchAssemblyError::AnchorParse(AnchorInfoError::TooShort(1)));
    }

    #[test]
    fn test_undecodable_anchor_envelope_rejected() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let err = builder.build(&payload(vec![hex!("7e01").into()])).unwrap_err();
        assert!(matches!(
            err,
            BatchAssemblyError::AnchorParse(AnchorInfoError::TxDecode(_))
        ));
    }

    #[test]
    fn test_empty_user_transaction_rejected() {
        let builder = BatchBuilder::new(TestDaOracle::default());
        let payload = payload(vec![anchor_deposit(100, EPOCH_HASH), Bytes::new()]);
        let err = builder.build(&payload).unwrap_err();
        assert_eq!(
            err,
            BatchAssemblyError::TransactionEncoding {
                index: 1,
                block_hash: BLOCK_HASH,
                cause: "empty transaction body".to_string(),
            }
        );
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let builder = BatchBuilder::new(EchoDaOracle);
        let payload = payload(vec![
            anchor_deposit(100, EPOCH_HASH),
            hex!("02c0ffee").into(),
            hex!("02deadbeef").into(),
        ]);

        let first = builder.build(&payload).unwrap();
        let second = builder.build(&payload).unwrap();
        assert_eq!(first, second);

        let mut first_buf = Vec::new();
        first.batch.encode(&mut first_buf);
        let mut second_buf = Vec::new();
        second.batch.encode(&mut second_buf);
        assert_eq!(first_buf, second_buf);
    }

    #[test]
    fn test_warns_when_anchor_is_missing() {
        let store = TraceStore::default();
        let subscriber = tracing_subscriber::registry().with(RecordingLayer::new(store.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let builder = BatchBuilder::new(TestDaOracle::default());
        let _ = builder.build(&payload(vec![hex!("02aa").into()]));

        let warnings = store.messages_at(Level::WARN);
        assert!(warnings.iter().any(|msg| msg.contains("anchor deposit")));
    }

    proptest! {
        #[test]
        fn test_filter_excludes_deposits_and_preserves_order(
            entries in vec((any::<bool>(), vec(any::<u8>(), 1..48usize)), 0..12usize)
        ) {
            let mut transactions = vec![anchor_deposit(100, EPOCH_HASH)];
            let mut expected = Vec::new();
            for (is_deposit, mut body) in entries {
                if is_deposit {
                    body.insert(0, OpTxType::Deposit as u8);
                } else {
                    if body[0] == OpTxType::Deposit as u8 {
                        body[0] = 0x02;
                    }
                    expected.push(RawTransaction(Bytes::from(body.clone())));
                }
                transactions.push(Bytes::from(body));
            }

            let got = user_transactions(&payload(transactions)).unwrap();
            assert_eq!(got, expected);
        }
    }
}
