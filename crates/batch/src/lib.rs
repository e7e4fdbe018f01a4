#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod builder;
pub mod canonical;
pub mod errors;
pub mod output;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the primitive types the pipeline is built from.
pub use opda_primitives::prelude::*;

/// The prelude exports common types and traits.
pub mod prelude {
    pub use crate::{
        builder::{BatchBuilder, BatchWithAnchor},
        canonical::CanonicalBatch,
        errors::{BatchAssemblyError, BatchDecodeError},
        output::{OutputBatch, OUTPUT_BATCH_VERSION},
        traits::DaOracle,
    };
}
