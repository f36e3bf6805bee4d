//! Sample generator for offline decoding.
//!
//! Samples the repetition-code circuit and writes the raw measurement
//! records to a `.b8` or `.01` file, for later replay or for comparison with
//! other decoders.

use crate::config::RunConfig;
use anyhow::Result;
use rqec_core::MeasurementSource;
use rqec_sim::FrameSampler;
use std::path::Path;
use tracing::info;

/// Writes `config.trials` sampled shots to `out`.
///
/// # Returns
///
/// Ok(()) on success, or an error if the parameters are invalid or file I/O
/// fails. Invalid parameters are rejected before anything is written.
pub fn generate_records(config: &RunConfig, out: &Path) -> Result<()> {
    let params = config.params()?;
    let seed = config.seed_or_random();
    info!(
        distance = params.distance(),
        rounds = params.rounds(),
        noise = params.noise(),
        shots = config.trials,
        seed,
        "sampling shots"
    );

    let batch = FrameSampler::seeded(seed).sample(&params, config.trials)?;
    rqec_io::write_records(out, &batch)?;

    info!(path = %out.display(), record_len = batch.record_len(), "wrote records");
    Ok(())
}
