use anyhow::{Result, bail};
use rqec_core::params::CodeParams;
use rqec_core::{MeasurementSource, SampleBatch};
use std::path::Path;
use tracing::info;

/// Serves previously recorded shots to the orchestrator, in file order.
///
/// The requested parameters must describe the same record layout as the
/// recording. The noise probability is not checked since it is not
/// recoverable from the records themselves.
pub struct ReplaySource {
    batch: SampleBatch,
    next: usize,
}

impl ReplaySource {
    /// Replays the records of `batch` from the first one.
    pub fn new(batch: SampleBatch) -> Self {
        Self { batch, next: 0 }
    }

    /// Loads a `.b8` or `.01` recording laid out for `params`.
    pub fn open<P: AsRef<Path>>(path: P, params: &CodeParams) -> Result<Self> {
        let batch = crate::load_records(&path, params.layout())?;
        info!(
            path = %path.as_ref().display(),
            shots = batch.trials(),
            "loaded recorded shots"
        );
        Ok(Self::new(batch))
    }

    /// Shots not yet served.
    pub fn remaining(&self) -> usize {
        self.batch.trials() - self.next
    }
}

impl MeasurementSource for ReplaySource {
    type Error = anyhow::Error;

    fn sample(&mut self, params: &CodeParams, trials: usize) -> Result<SampleBatch> {
        if params.layout() != self.batch.layout() {
            bail!(
                "recording is laid out for {:?}, requested {:?}",
                self.batch.layout(),
                params.layout()
            );
        }
        if trials > self.remaining() {
            bail!(
                "requested {} shots but only {} recorded shots remain",
                trials,
                self.remaining()
            );
        }

        let len = self.batch.record_len();
        let start = self.next * len;
        let bits = self.batch.as_bits()[start..start + trials * len].to_vec();
        self.next += trials;
        Ok(SampleBatch::from_bits(params.layout(), bits)?)
    }
}
