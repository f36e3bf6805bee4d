use crate::QecError;
use crate::outcome::{LogicalOutcome, extract_into};
use crate::params::{CodeParams, validate_trials};
use crate::source::{MeasurementSource, SampleBatch};
use crate::stats::{RunStatistics, TrialDetail};
use crate::tracker::FrameTracker;
use alloc::vec;
use alloc::vec::Vec;
use rqec_common::layout::RecordLayout;
use tracing::{debug, info};

/// How trials are requested from the measurement source.
///
/// Both strategies run the identical per-trial pipeline; they differ only in
/// how many records are requested per source call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One source call for all trials, then a decode loop over the batch.
    #[default]
    Batched,
    /// One source call per trial.
    Sequential,
}

/// Per-worker decode pipeline for single measurement records.
///
/// Owns the frame tracker and scratch buffers so repeated trials allocate
/// nothing. Every call to [`TrialRunner::decode_record`] starts from a fresh
/// frame; no state carries over between trials.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    layout: RecordLayout,
    tracker: FrameTracker,
    corrected: Vec<u8>,
}

impl TrialRunner {
    /// Runner for records of `layout`, with its frame at identity.
    pub fn new(layout: RecordLayout) -> Self {
        Self {
            layout,
            tracker: FrameTracker::new(layout.distance),
            corrected: vec![0; layout.distance],
        }
    }

    /// Decodes one shot: frame tracking over every round, then the
    /// majority-vote extraction on the final data.
    ///
    /// # Returns
    ///
    /// `QecError::MalformedRecord` if `record` does not match the layout.
    pub fn decode_record(&mut self, record: &[u8]) -> Result<LogicalOutcome, QecError> {
        let (rounds, final_data) = self
            .layout
            .split(record)
            .ok_or(QecError::MalformedRecord {
                expected: self.layout.record_len(),
                actual: record.len(),
            })?;

        self.tracker.reset();
        for syndrome in rounds {
            self.tracker.push_round(syndrome)?;
        }
        extract_into(final_data, self.tracker.frame(), &mut self.corrected)
    }

    /// Diagnostic record of the most recently decoded shot.
    ///
    /// `record` must be the shot last passed to `decode_record`.
    pub fn detail(&self, trial_index: usize, record: &[u8]) -> TrialDetail {
        let (syndromes, final_data) = match self.layout.split(record) {
            Some((rounds, data)) => (rounds.map(<[u8]>::to_vec).collect(), data.to_vec()),
            None => (Vec::new(), record.to_vec()),
        };
        TrialDetail {
            trial_index,
            syndromes,
            frame: self.tracker.frame().to_bits(),
            final_data,
            corrected_data: self.corrected.clone(),
        }
    }

    /// Decodes every record of `batch` into `stats`, in record order.
    ///
    /// # Returns
    ///
    /// `QecError::LayoutMismatch` if `batch` was laid out for another code.
    pub fn decode_batch(
        &mut self,
        batch: &SampleBatch,
        stats: &mut RunStatistics,
    ) -> Result<(), QecError> {
        if batch.layout() != self.layout {
            return Err(QecError::LayoutMismatch {
                expected: self.layout,
                actual: batch.layout(),
            });
        }
        for record in batch.records() {
            let outcome = self.decode_record(record)?;
            stats.record(outcome, |index| self.detail(index, record));
        }
        Ok(())
    }
}

/// Runs `trials` independent trials with already validated parameters.
///
/// # Arguments
///
/// * `source` - Producer of measurement records
/// * `params` - Code parameters passed to every source call
/// * `trials` - Number of trials; must be at least 1
/// * `strategy` - Batched or one-at-a-time sampling
///
/// # Returns
///
/// Aggregate statistics, or the first source or decode error. An invalid
/// trial count fails before the source is called.
pub fn run_trials<S: MeasurementSource>(
    source: &mut S,
    params: &CodeParams,
    trials: usize,
    strategy: Strategy,
) -> Result<RunStatistics, S::Error> {
    validate_trials(trials)?;

    let mut runner = TrialRunner::new(params.layout());
    let mut stats = RunStatistics::new(*params);

    match strategy {
        Strategy::Batched => {
            let batch = source.sample(params, trials)?;
            check_trials(&batch, trials)?;
            debug!(trials, record_len = batch.record_len(), "decoding batch");
            runner.decode_batch(&batch, &mut stats)?;
        }
        Strategy::Sequential => {
            for _ in 0..trials {
                let batch = source.sample(params, 1)?;
                check_trials(&batch, 1)?;
                runner.decode_batch(&batch, &mut stats)?;
            }
        }
    }

    info!(
        distance = params.distance(),
        rounds = params.rounds(),
        noise = params.noise(),
        trials,
        fail_count = stats.fail_count,
        "run complete"
    );
    Ok(stats)
}

/// Validates raw parameters and runs the trials.
///
/// Invalid parameters are reported as `QecError::InvalidParameter` before
/// the source is ever called.
pub fn collect_statistics<S: MeasurementSource>(
    source: &mut S,
    distance: usize,
    rounds: usize,
    noise: f64,
    trials: usize,
    strategy: Strategy,
) -> Result<RunStatistics, S::Error> {
    let params = CodeParams::new(distance, rounds, noise)?;
    run_trials(source, &params, trials, strategy)
}

fn check_trials(batch: &SampleBatch, trials: usize) -> Result<(), QecError> {
    if batch.trials() == trials {
        return Ok(());
    }
    Err(QecError::MalformedRecord {
        expected: trials.saturating_mul(batch.record_len()),
        actual: batch.as_bits().len(),
    })
}
