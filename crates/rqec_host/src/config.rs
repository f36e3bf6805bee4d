//! Run configuration.
//!
//! Parameters come from three layers, lowest priority first: built-in
//! defaults, an optional JSON file given with `--config`, and command-line
//! flags. The merged result is validated into [`CodeParams`] before any
//! simulation starts.

use anyhow::{Context, Result};
use clap::ValueEnum;
use rqec_core::params::{CodeParams, validate_trials};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Trial execution strategy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecStrategy {
    /// One sampler call for every trial.
    #[default]
    Batched,
    /// One sampler call per trial.
    Sequential,
    /// Trials split into chunks decoded on the rayon thread pool.
    Parallel,
}

/// Fully merged run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub distance: usize,
    pub rounds: usize,
    pub noise: f64,
    pub trials: usize,
    pub strategy: ExecStrategy,
    /// Seed for the sampler; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Trials per parallel work unit.
    pub chunk_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            distance: 3,
            rounds: 5,
            noise: 0.05,
            trials: 10_000,
            strategy: ExecStrategy::Batched,
            seed: None,
            chunk_size: 4096,
        }
    }
}

/// Command-line overrides; `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Code distance (odd, at least 1).
    #[arg(short, long)]
    pub distance: Option<usize>,
    /// Syndrome-extraction rounds.
    #[arg(short, long)]
    pub rounds: Option<usize>,
    /// Per-round bit-flip probability.
    #[arg(short = 'p', long)]
    pub noise: Option<f64>,
    /// Number of independent trials.
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,
    #[arg(long, value_enum)]
    pub strategy: Option<ExecStrategy>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

impl RunConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Loads the optional config file, then applies command-line overrides.
    pub fn resolve(config_path: Option<&Path>, args: &RunArgs) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_json(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    /// Overwrites every field for which `args` carries a value.
    pub fn apply(&mut self, args: &RunArgs) {
        if let Some(d) = args.distance {
            self.distance = d;
        }
        if let Some(r) = args.rounds {
            self.rounds = r;
        }
        if let Some(p) = args.noise {
            self.noise = p;
        }
        if let Some(n) = args.trials {
            self.trials = n;
        }
        if let Some(s) = args.strategy {
            self.strategy = s;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(c) = args.chunk_size {
            self.chunk_size = c;
        }
    }

    /// Validates the code parameters and trial count.
    pub fn params(&self) -> Result<CodeParams> {
        validate_trials(self.trials)?;
        Ok(CodeParams::new(self.distance, self.rounds, self.noise)?)
    }

    /// Configured seed, or a fresh one from the thread RNG.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
