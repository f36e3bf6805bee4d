use crate::QecError;
use crate::bit_utils::weight;
use alloc::vec;
use alloc::vec::Vec;

/// Minimum-weight decoder for a single round of a distance-`d` repetition code.
///
/// The parity checks `e[i] ^ e[i + 1] == s[i]` determine an error pattern up
/// to a global flip. The decoder builds the solution with `e[0] = 0` by
/// prefix XOR and returns its complement only when the complement is
/// strictly lighter. For odd `d` the two weights never tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepetitionDecoder {
    distance: usize,
}

impl RepetitionDecoder {
    /// Decoder for a code with `distance` data qubits.
    pub fn new(distance: usize) -> Self {
        Self { distance }
    }

    /// Number of data qubits.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Writes the minimum-weight error pattern for `diff` into `out`.
    ///
    /// # Arguments
    ///
    /// * `diff` - Syndrome difference, `distance - 1` entries of 0/1
    /// * `out` - Destination, `distance` entries, overwritten
    ///
    /// # Returns
    ///
    /// `QecError::MalformedRecord` if either slice has the wrong length.
    pub fn solve_into(&self, diff: &[u8], out: &mut [u8]) -> Result<(), QecError> {
        QecError::check_len(self.distance.saturating_sub(1), diff.len())?;
        QecError::check_len(self.distance, out.len())?;
        if out.is_empty() {
            return Ok(());
        }

        let mut running = 0u8;
        out[0] = 0;
        for (e, &s) in out[1..].iter_mut().zip(diff) {
            running ^= s & 1;
            *e = running;
        }

        // Ties keep the e[0] = 0 solution.
        if 2 * weight(out) > self.distance {
            for e in out.iter_mut() {
                *e ^= 1;
            }
        }
        Ok(())
    }
}

/// Minimum-weight correction for one syndrome difference.
///
/// Convenience wrapper allocating a fresh length-`diff.len() + 1` pattern.
pub fn min_weight_correction(diff: &[u8]) -> Vec<u8> {
    let decoder = RepetitionDecoder::new(diff.len() + 1);
    let mut out = vec![0; diff.len() + 1];
    // Lengths agree by construction.
    let _ = decoder.solve_into(diff, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_boundary_on_left_edge() {
        // Prefix XOR gives [0,1,1,1,1]; its complement is lighter.
        assert_eq!(min_weight_correction(&[1, 0, 0, 0]), vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_single_boundary_on_right_edge() {
        assert_eq!(min_weight_correction(&[0, 0, 0, 1]), vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_interior_flip() {
        assert_eq!(min_weight_correction(&[0, 1, 1, 0]), vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_empty_difference_needs_no_correction() {
        assert_eq!(min_weight_correction(&[0, 0]), vec![0, 0, 0]);
        assert_eq!(min_weight_correction(&[]), vec![0]);
    }

    #[test]
    fn test_tie_prefers_prefix_solution() {
        // Even length only occurs outside the validated parameter space, but
        // the tie policy must still hold: weight 2 of 4 keeps e0.
        assert_eq!(min_weight_correction(&[1, 0, 1]), vec![0, 1, 1, 0]);
        assert_eq!(min_weight_correction(&[0, 1, 0]), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_distance_three_lookup_table() {
        // The classic three-qubit correction table.
        assert_eq!(min_weight_correction(&[0, 0]), vec![0, 0, 0]);
        assert_eq!(min_weight_correction(&[1, 0]), vec![1, 0, 0]);
        assert_eq!(min_weight_correction(&[1, 1]), vec![0, 1, 0]);
        assert_eq!(min_weight_correction(&[0, 1]), vec![0, 0, 1]);
    }

    #[test]
    fn test_length_checks() {
        let decoder = RepetitionDecoder::new(5);
        let mut out = [0u8; 5];
        assert_eq!(
            decoder.solve_into(&[1, 0, 0], &mut out),
            Err(QecError::MalformedRecord {
                expected: 4,
                actual: 3
            })
        );
        let mut short = [0u8; 4];
        assert!(decoder.solve_into(&[1, 0, 0, 0], &mut short).is_err());
    }
}
