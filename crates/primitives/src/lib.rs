#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod anchor;
pub mod block;
pub mod payload;
pub mod proof;
pub mod raw_tx;

/// The prelude exports common types and traits.
pub mod prelude {
    pub use crate::{
        anchor::{AnchorInfoError, L1AnchorInfo},
        block::L2Block,
        payload::BlockPayload,
        proof::{Commitment, DaProof, DaSignature, ProofCodecError, COMMITMENT_LEN, SIGNATURE_LEN},
        raw_tx::RawTransaction,
    };
}
