//! Human-readable and JSON reports of run statistics.

use rqec_core::{RunStatistics, TrialDetail};
use serde::Serialize;

/// Serializable summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub distance: usize,
    pub rounds: usize,
    pub noise: f64,
    pub trial_count: usize,
    pub raw_rate: f64,
    pub corrected_rate: f64,
    pub fail_count: usize,
    pub first_failure: Option<FailureSummary>,
}

/// Serializable copy of the first failing trial.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub trial_index: usize,
    pub syndromes: Vec<String>,
    pub frame: String,
    pub final_data: String,
    pub corrected_data: String,
}

fn bits(v: &[u8]) -> String {
    v.iter().map(|&b| if b & 1 == 1 { '1' } else { '0' }).collect()
}

impl From<&TrialDetail> for FailureSummary {
    fn from(d: &TrialDetail) -> Self {
        Self {
            trial_index: d.trial_index,
            syndromes: d.syndromes.iter().map(|s| bits(s)).collect(),
            frame: bits(&d.frame),
            final_data: bits(&d.final_data),
            corrected_data: bits(&d.corrected_data),
        }
    }
}

impl From<&RunStatistics> for RunSummary {
    fn from(s: &RunStatistics) -> Self {
        Self {
            distance: s.params.distance(),
            rounds: s.params.rounds(),
            noise: s.params.noise(),
            trial_count: s.trial_count,
            raw_rate: s.raw_rate(),
            corrected_rate: s.corrected_rate(),
            fail_count: s.fail_count,
            first_failure: s.first_failure.as_ref().map(FailureSummary::from),
        }
    }
}

impl RunSummary {
    /// Prints a formatted report of the run.
    pub fn print_report(&self) {
        println!("\nRepetition Code Memory Experiment");
        println!("Distance:       {}", self.distance);
        println!("Rounds:         {}", self.rounds);
        println!("Noise:          {}", self.noise);
        println!("Trials:         {}", self.trial_count);
        println!("Raw rate:       {:.6}", self.raw_rate);
        println!("Corrected rate: {:.6}", self.corrected_rate);
        println!("Failures:       {}", self.fail_count);

        if let Some(f) = &self.first_failure {
            println!("First failure (trial {}):", f.trial_index);
            for (r, s) in f.syndromes.iter().enumerate() {
                println!("  round {:3}: {}", r, s);
            }
            println!("  frame:     {}", f.frame);
            println!("  data:      {}", f.final_data);
            println!("  corrected: {}", f.corrected_data);
        }
    }
}

/// Prints one row per run, for noise sweeps.
pub fn print_sweep(rows: &[RunSummary]) {
    println!("\n{:>8} {:>10} {:>12} {:>12} {:>8}", "noise", "trials", "raw", "corrected", "fails");
    for row in rows {
        println!(
            "{:>8.4} {:>10} {:>12.6} {:>12.6} {:>8}",
            row.noise, row.trial_count, row.raw_rate, row.corrected_rate, row.fail_count
        );
    }
}
