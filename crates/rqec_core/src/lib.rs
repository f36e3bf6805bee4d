//! Core decoding algorithms for repetition-code memory experiments.
//!
//! This crate provides the minimum-weight single-round decoder, the
//! time-correlated Pauli frame tracker, the majority-vote logical outcome
//! extractor, and the trial orchestrator that runs them over batches of
//! measurement records. Randomness never enters this crate: records come from
//! an injected [`source::MeasurementSource`], so everything here is a
//! deterministic function of its inputs.

#![no_std]

extern crate alloc;

use rqec_common::layout::RecordLayout;
use thiserror::Error;

/// Bit manipulation utilities for packed qubit registers.
pub mod bit_utils;

/// Minimum-weight single-round decoder for the repetition code.
///
/// Finds the lowest-weight data error pattern whose adjacent-pair parities
/// match one round's syndrome difference.
pub mod decoder;

/// Orchestration of many independent trials.
///
/// Drives the measurement source, runs the per-trial decode pipeline, and
/// accumulates run statistics under either a batched or a sequential
/// sampling strategy.
pub mod orchestrator;

/// Logical outcome extraction by majority vote.
pub mod outcome;

/// Validated code parameters.
///
/// Distance, round count, and noise probability are checked once here so
/// that downstream components can assume well-formed inputs.
pub mod params;

/// Pauli frame tracking for bit-flip errors.
///
/// Maintains the accumulated X-type corrections (or, in the sampler, the
/// propagated X errors) on each qubit as a packed bit register.
pub mod pauli_frame;

/// Measurement source interface and sample batches.
pub mod source;

/// Aggregate statistics for a run of trials.
pub mod stats;

/// Time-correlated frame tracker.
///
/// Differences consecutive syndrome rounds, decodes each difference, and
/// XOR-accumulates the per-round corrections into a Pauli frame.
pub mod tracker;

pub use orchestrator::{Strategy, TrialRunner, collect_statistics, run_trials};
pub use outcome::LogicalOutcome;
pub use params::CodeParams;
pub use pauli_frame::PauliFrame;
pub use source::{MeasurementSource, SampleBatch};
pub use stats::{RunStatistics, TrialDetail};

/// Error types returned by decoding and orchestration operations.
///
/// There is no decoding-failure variant: every syndrome difference has a
/// minimum-weight explanation, and a logical error is a counted outcome
/// rather than a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QecError {
    /// A run parameter is outside its admissible range.
    ///
    /// Raised before any sampling takes place. Retrying with the same
    /// arguments will fail the same way.
    #[error("invalid parameter `{param}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },

    /// A measurement record or vector does not have the length its layout
    /// requires.
    ///
    /// Indicates a mismatch between the measurement source and the decoder,
    /// which is a programming defect rather than a recoverable condition.
    #[error("malformed record: expected {expected} bits, got {actual}")]
    MalformedRecord {
        /// Length implied by the record layout.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },

    /// A batch of records was produced for a different code than the one
    /// being decoded.
    ///
    /// Distinct layouts can share a record length, so the geometry itself is
    /// reported rather than the bit counts.
    #[error("layout mismatch: expected {expected}, got {actual}")]
    LayoutMismatch {
        /// Layout the decoder was built for.
        expected: RecordLayout,
        /// Layout of the received batch.
        actual: RecordLayout,
    },
}

impl QecError {
    pub(crate) const fn invalid(param: &'static str, reason: &'static str) -> Self {
        QecError::InvalidParameter { param, reason }
    }

    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(QecError::MalformedRecord { expected, actual })
        }
    }
}
