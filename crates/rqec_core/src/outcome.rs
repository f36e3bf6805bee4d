use crate::QecError;
use crate::bit_utils::weight;
use crate::pauli_frame::PauliFrame;

/// Raw and corrected logical decisions for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalOutcome {
    /// Majority vote of the uncorrected final data.
    pub raw_logical: u8,
    /// Majority vote of the final data after applying the frame.
    pub corrected_logical: u8,
    /// The corrected decision differs from the encoded logical |0⟩.
    pub logical_error: bool,
}

/// Majority vote over a data readout: 1 iff more than `len / 2` ones.
///
/// With an odd number of entries there is never a tie.
#[inline(always)]
pub fn majority(bits: &[u8]) -> u8 {
    (weight(bits) > bits.len() / 2) as u8
}

/// Applies `frame` to `final_data` and takes both majority votes.
///
/// # Arguments
///
/// * `final_data` - Final data readout, one entry per data qubit
/// * `frame` - Accumulated correction for the same qubits
/// * `corrected` - Destination for `final_data ^ frame`, overwritten
///
/// # Returns
///
/// The outcome, or `QecError::MalformedRecord` if any length disagrees with
/// the frame.
pub fn extract_into(
    final_data: &[u8],
    frame: &PauliFrame,
    corrected: &mut [u8],
) -> Result<LogicalOutcome, QecError> {
    QecError::check_len(frame.num_qubits(), final_data.len())?;
    QecError::check_len(frame.num_qubits(), corrected.len())?;

    for (q, (c, &b)) in corrected.iter_mut().zip(final_data).enumerate() {
        *c = (b ^ frame.bit(q)) & 1;
    }
    let raw_logical = majority(final_data);
    let corrected_logical = majority(corrected);
    Ok(LogicalOutcome {
        raw_logical,
        corrected_logical,
        logical_error: corrected_logical != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_strict_threshold() {
        assert_eq!(majority(&[1, 0, 0]), 0);
        assert_eq!(majority(&[1, 1, 0]), 1);
        assert_eq!(majority(&[0]), 0);
        assert_eq!(majority(&[1]), 1);
        assert_eq!(majority(&[1, 1, 0, 0, 0]), 0);
        assert_eq!(majority(&[1, 1, 1, 0, 0]), 1);
    }

    #[test]
    fn test_frame_rescues_majority_flip() {
        let mut frame = PauliFrame::new(3);
        frame.apply_correction(&[1, 1, 0]).unwrap();
        let mut corrected = [0u8; 3];
        let out = extract_into(&[1, 1, 0], &frame, &mut corrected).unwrap();
        assert_eq!(corrected, [0, 0, 0]);
        assert_eq!(
            out,
            LogicalOutcome {
                raw_logical: 1,
                corrected_logical: 0,
                logical_error: false,
            }
        );
    }

    #[test]
    fn test_wrong_frame_causes_logical_error() {
        let mut frame = PauliFrame::new(3);
        frame.apply_correction(&[0, 0, 1]).unwrap();
        let mut corrected = [0u8; 3];
        let out = extract_into(&[1, 1, 0], &frame, &mut corrected).unwrap();
        assert_eq!(corrected, [1, 1, 1]);
        assert!(out.logical_error);
        assert_eq!(out.corrected_logical, 1);
    }

    #[test]
    fn test_length_mismatch() {
        let frame = PauliFrame::new(3);
        let mut corrected = [0u8; 3];
        assert!(extract_into(&[0, 0], &frame, &mut corrected).is_err());
    }
}
