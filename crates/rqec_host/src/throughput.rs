use crate::config::{ExecStrategy, RunConfig};
use anyhow::Result;
use rayon::prelude::*;
use rqec_core::params::{CodeParams, validate_trials};
use rqec_core::{RunStatistics, Strategy, run_trials};
use rqec_sim::FrameSampler;
use std::time::Instant;
use tracing::{debug, info};

// Golden-ratio increment; spreads chunk seeds across the u64 range.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed.wrapping_add((chunk as u64 + 1).wrapping_mul(SEED_STRIDE))
}

/// Runs trials on the rayon pool, one independently seeded sampler per chunk.
///
/// Chunk statistics are merged in chunk order, so the retained failure is the
/// lowest-index failing trial across the whole run.
pub fn run_parallel(
    params: &CodeParams,
    trials: usize,
    seed: u64,
    chunk_size: usize,
) -> Result<RunStatistics> {
    validate_trials(trials)?;
    let chunk_size = chunk_size.max(1);
    let chunks = trials.div_ceil(chunk_size);
    debug!(chunks, chunk_size, "dispatching parallel trials");

    let partials = (0..chunks)
        .into_par_iter()
        .map(|i| {
            // i * chunk_size < trials, so the last chunk takes the remainder.
            let len = chunk_size.min(trials - i * chunk_size);
            let mut sampler = FrameSampler::seeded(chunk_seed(seed, i));
            run_trials(&mut sampler, params, len, Strategy::Batched)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let merged = partials
        .into_iter()
        .fold(RunStatistics::new(*params), RunStatistics::merge);
    Ok(merged)
}

/// Runs a configuration with its selected strategy and reports throughput.
pub fn execute(config: &RunConfig) -> Result<RunStatistics> {
    let params = config.params()?;
    let seed = config.seed_or_random();
    info!(
        distance = params.distance(),
        rounds = params.rounds(),
        noise = params.noise(),
        trials = config.trials,
        strategy = ?config.strategy,
        seed,
        "starting run"
    );

    let start = Instant::now();
    let stats = match config.strategy {
        ExecStrategy::Batched => {
            run_trials(&mut FrameSampler::seeded(seed), &params, config.trials, Strategy::Batched)?
        }
        ExecStrategy::Sequential => run_trials(
            &mut FrameSampler::seeded(seed),
            &params,
            config.trials,
            Strategy::Sequential,
        )?,
        ExecStrategy::Parallel => run_parallel(&params, config.trials, seed, config.chunk_size)?,
    };

    let seconds = start.elapsed().as_secs_f64();
    info!(
        seconds,
        trials_per_sec = stats.trial_count as f64 / seconds.max(f64::MIN_POSITIVE),
        "run finished"
    );
    Ok(stats)
}
