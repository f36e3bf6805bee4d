//! Measurement source interface.
//!
//! The decoder never touches randomness. A measurement source produces, for
//! a parameter set and a trial count, one flat 0/1 record per trial laid out
//! as described by [`rqec_common::layout`]. Sources are injected into the
//! orchestrator so decoding can be tested with hand-written records and run
//! against any simulation backend or recorded data.

use crate::QecError;
use crate::params::CodeParams;
use alloc::vec;
use alloc::vec::Vec;
use core::slice::ChunksExact;
use rqec_common::layout::RecordLayout;

/// Row-major block of measurement records, one row per trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBatch {
    layout: RecordLayout,
    trials: usize,
    bits: Vec<u8>,
}

impl SampleBatch {
    /// Wraps `bits` as `bits.len() / record_len` records of `layout`.
    ///
    /// # Returns
    ///
    /// `QecError::MalformedRecord` if `bits` is not a whole number of records.
    pub fn from_bits(layout: RecordLayout, bits: Vec<u8>) -> Result<Self, QecError> {
        let record_len = layout.record_len();
        if record_len == 0 || bits.len() % record_len != 0 {
            let whole = if record_len == 0 {
                0
            } else {
                bits.len() / record_len * record_len
            };
            return Err(QecError::MalformedRecord {
                expected: whole + record_len,
                actual: bits.len(),
            });
        }
        Ok(Self {
            layout,
            trials: bits.len() / record_len,
            bits,
        })
    }

    /// All-zero records, the noiseless outcome of a |0_L⟩ memory experiment.
    ///
    /// # Returns
    ///
    /// `QecError::InvalidParameter` if `trials` records of `layout` do not
    /// fit in one allocation.
    pub fn zeros(layout: RecordLayout, trials: usize) -> Result<Self, QecError> {
        let len = layout
            .checked_record_len()
            .and_then(|len| len.checked_mul(trials))
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(QecError::invalid("trials", "batch exceeds addressable memory"))?;
        Ok(Self {
            layout,
            trials,
            bits: vec![0; len],
        })
    }

    /// Layout shared by every record in the batch.
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Number of records.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Bits per record.
    pub fn record_len(&self) -> usize {
        self.layout.record_len()
    }

    /// Record of trial `trial`. Panics if `trial >= self.trials()`.
    pub fn record(&self, trial: usize) -> &[u8] {
        let len = self.record_len();
        &self.bits[trial * len..(trial + 1) * len]
    }

    /// Mutable record of trial `trial`, for sources filling a batch in place.
    pub fn record_mut(&mut self, trial: usize) -> &mut [u8] {
        let len = self.record_len();
        &mut self.bits[trial * len..(trial + 1) * len]
    }

    /// Records in trial order.
    pub fn records(&self) -> ChunksExact<'_, u8> {
        self.bits.chunks_exact(self.record_len())
    }

    /// Every record concatenated, row-major.
    pub fn as_bits(&self) -> &[u8] {
        &self.bits
    }

    /// Consumes the batch, returning its row-major bits.
    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }
}

/// Producer of noisy measurement records.
///
/// Each call must return `trials` statistically independent records for
/// `params`. Implementations report their own failures through `Error`;
/// parameter validation failures raised by the orchestrator are converted
/// into it via `From<QecError>`.
pub trait MeasurementSource {
    type Error: From<QecError>;

    fn sample(&mut self, params: &CodeParams, trials: usize) -> Result<SampleBatch, Self::Error>;
}

impl<S: MeasurementSource + ?Sized> MeasurementSource for &mut S {
    type Error = S::Error;

    fn sample(&mut self, params: &CodeParams, trials: usize) -> Result<SampleBatch, Self::Error> {
        (**self).sample(params, trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_row_major() {
        let layout = RecordLayout::new(3, 1);
        let batch = SampleBatch::from_bits(layout, vec![1, 0, 1, 0, 0, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(batch.trials(), 2);
        assert_eq!(batch.record(0), &[1, 0, 1, 0, 0]);
        assert_eq!(batch.record(1), &[0, 1, 0, 1, 0]);
        assert_eq!(batch.records().count(), 2);
    }

    #[test]
    fn test_partial_record_rejected() {
        let layout = RecordLayout::new(3, 1);
        assert_eq!(
            SampleBatch::from_bits(layout, vec![0; 7]),
            Err(QecError::MalformedRecord {
                expected: 10,
                actual: 7
            })
        );
    }

    #[test]
    fn test_zeros() {
        let mut batch = SampleBatch::zeros(RecordLayout::new(5, 2), 3).unwrap();
        assert_eq!(batch.as_bits().len(), 39);
        batch.record_mut(2)[0] = 1;
        assert_eq!(batch.record(2)[0], 1);
        assert!(batch.record(1).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zeros_rejects_oversized_batch() {
        let layout = RecordLayout::new(3, 1);
        for trials in [usize::MAX, usize::MAX / 5 + 1, isize::MAX as usize / 5 + 1] {
            assert!(matches!(
                SampleBatch::zeros(layout, trials),
                Err(QecError::InvalidParameter { param: "trials", .. })
            ));
        }
        assert!(matches!(
            SampleBatch::zeros(RecordLayout::new(3, usize::MAX), 1),
            Err(QecError::InvalidParameter { .. })
        ));
    }
}
