//! Aggregate logical error statistics.
//!
//! Accumulates per-trial logical outcomes into counts for a run and keeps
//! the full decode record of the first failing trial for diagnostics.
//! Statistics from disjoint trial ranges combine with [`RunStatistics::merge`],
//! which is the reduction used when trials are spread across workers.

use crate::outcome::LogicalOutcome;
use crate::params::CodeParams;
use alloc::vec::Vec;

/// Complete decode record of a single trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialDetail {
    /// Zero-based index of the trial within its run.
    pub trial_index: usize,
    /// Per-round syndrome vectors, in measurement order.
    pub syndromes: Vec<Vec<u8>>,
    /// Accumulated Pauli frame after all rounds.
    pub frame: Vec<u8>,
    /// Final data readout as measured.
    pub final_data: Vec<u8>,
    /// Final data readout with the frame applied.
    pub corrected_data: Vec<u8>,
}

/// Logical error statistics accumulated over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    /// Parameters every trial of the run was sampled with.
    pub params: CodeParams,
    /// Number of trials recorded.
    pub trial_count: usize,
    /// Trials whose uncorrected majority vote was 1.
    pub raw_ones: usize,
    /// Trials whose corrected majority vote was 1.
    pub corrected_ones: usize,
    /// Trials flagged as logical errors.
    pub fail_count: usize,
    /// Lowest-index failing trial, if any failed.
    pub first_failure: Option<TrialDetail>,
}

impl RunStatistics {
    /// Creates an empty accumulator for a run with `params`.
    pub fn new(params: CodeParams) -> Self {
        Self {
            params,
            trial_count: 0,
            raw_ones: 0,
            corrected_ones: 0,
            fail_count: 0,
            first_failure: None,
        }
    }

    /// Records one trial outcome.
    ///
    /// `detail` is only invoked for the first failing trial, so callers can
    /// defer building the diagnostic record.
    pub fn record<F>(&mut self, outcome: LogicalOutcome, detail: F)
    where
        F: FnOnce(usize) -> TrialDetail,
    {
        let index = self.trial_count;
        self.trial_count += 1;
        self.raw_ones += outcome.raw_logical as usize;
        self.corrected_ones += outcome.corrected_logical as usize;
        if outcome.logical_error {
            self.fail_count += 1;
            if self.first_failure.is_none() {
                self.first_failure = Some(detail(index));
            }
        }
    }

    /// Combines statistics of a later, disjoint trial range into `self`.
    ///
    /// Trial indices in `later` are shifted past the trials already held, so
    /// merging partial runs in trial order yields the same first failure as a
    /// single sequential pass.
    pub fn merge(mut self, later: RunStatistics) -> RunStatistics {
        let offset = self.trial_count;
        self.trial_count += later.trial_count;
        self.raw_ones += later.raw_ones;
        self.corrected_ones += later.corrected_ones;
        self.fail_count += later.fail_count;
        if self.first_failure.is_none() {
            self.first_failure = later.first_failure.map(|mut d| {
                d.trial_index += offset;
                d
            });
        }
        self
    }

    /// Fraction of trials whose uncorrected majority vote was 1.
    pub fn raw_rate(&self) -> f64 {
        ratio(self.raw_ones, self.trial_count)
    }

    /// Fraction of trials whose corrected majority vote was 1.
    pub fn corrected_rate(&self) -> f64 {
        ratio(self.corrected_ones, self.trial_count)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
