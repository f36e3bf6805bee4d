use crate::QecError;
use rqec_common::layout::RecordLayout;

/// Validated parameters of a repetition-code memory experiment.
///
/// Construction is the only validation point: a `CodeParams` value always
/// has an odd distance of at least one, a noise probability in `[0, 1]`, and
/// a record length that fits in a `usize`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeParams {
    distance: usize,
    rounds: usize,
    noise: f64,
}

impl CodeParams {
    /// Validates and constructs a parameter set.
    ///
    /// # Arguments
    ///
    /// * `distance` - Number of data qubits; must be odd and at least 1
    /// * `rounds` - Number of syndrome-extraction rounds
    /// * `noise` - Per-round bit-flip probability on each data qubit
    ///
    /// # Returns
    ///
    /// The parameter set, or `QecError::InvalidParameter` naming the first
    /// violated constraint.
    pub fn new(distance: usize, rounds: usize, noise: f64) -> Result<Self, QecError> {
        if distance < 1 {
            return Err(QecError::invalid("distance", "must be at least 1"));
        }
        if distance % 2 == 0 {
            return Err(QecError::invalid("distance", "must be odd"));
        }
        // NaN fails the range check.
        if !(0.0..=1.0).contains(&noise) {
            return Err(QecError::invalid("noise", "must lie in [0, 1]"));
        }
        if RecordLayout::new(distance, rounds).checked_record_len().is_none() {
            return Err(QecError::invalid("rounds", "record length overflows usize"));
        }
        Ok(Self {
            distance,
            rounds,
            noise,
        })
    }

    /// Number of data qubits.
    #[inline(always)]
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Number of syndrome-extraction rounds before the final readout.
    #[inline(always)]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Per-round bit-flip probability on each data qubit.
    #[inline(always)]
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Record layout produced by a measurement source for these parameters.
    pub fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.distance, self.rounds)
    }
}

/// Rejects an empty run.
pub fn validate_trials(trials: usize) -> Result<(), QecError> {
    if trials == 0 {
        Err(QecError::invalid("trials", "must be at least 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_odd_distances() {
        for d in [1, 3, 5, 21] {
            let p = CodeParams::new(d, 4, 0.1).unwrap();
            assert_eq!(p.distance(), d);
            assert_eq!(p.rounds(), 4);
            assert_eq!(p.layout().record_len(), 4 * (d - 1) + d);
        }
    }

    #[test]
    fn test_rejects_even_and_zero_distance() {
        for d in [0, 2, 4] {
            assert!(matches!(
                CodeParams::new(d, 3, 0.1),
                Err(QecError::InvalidParameter {
                    param: "distance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_noise_out_of_range() {
        for p in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                CodeParams::new(3, 3, p),
                Err(QecError::InvalidParameter { param: "noise", .. })
            ));
        }
        assert!(CodeParams::new(3, 3, 0.0).is_ok());
        assert!(CodeParams::new(3, 3, 1.0).is_ok());
    }

    #[test]
    fn test_rejects_record_length_overflow() {
        for (d, r) in [(3, usize::MAX / 2 + 1), (usize::MAX, 2)] {
            assert!(matches!(
                CodeParams::new(d, r, 0.1),
                Err(QecError::InvalidParameter { param: "rounds", .. })
            ));
        }
        // Distance 1 has no ancillas, so any round count fits.
        assert!(CodeParams::new(1, usize::MAX, 0.1).is_ok());
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(validate_trials(0).is_err());
        assert!(validate_trials(1).is_ok());
    }
}
