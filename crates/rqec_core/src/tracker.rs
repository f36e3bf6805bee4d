use crate::QecError;
use crate::decoder::RepetitionDecoder;
use crate::pauli_frame::PauliFrame;
use alloc::vec;
use alloc::vec::Vec;

/// Accumulates per-round corrections into a Pauli frame.
///
/// Ancillas are reset every round, so a data error that persists shows up
/// once as a change in the syndrome and is then silent. The tracker decodes
/// the XOR of each round with the previous one, starting from an all-zero
/// previous round, and XORs every step into the frame. Rounds must be pushed
/// in measurement order.
///
/// Scratch buffers are reused across trials; [`FrameTracker::reset`] brings
/// the tracker back to its freshly constructed state.
#[derive(Debug, Clone)]
pub struct FrameTracker {
    decoder: RepetitionDecoder,
    prev_syndrome: Vec<u8>,
    diff: Vec<u8>,
    step: Vec<u8>,
    frame: PauliFrame,
    rounds_seen: usize,
}

impl FrameTracker {
    /// Creates a tracker for a distance-`distance` code with a zero frame.
    pub fn new(distance: usize) -> Self {
        let width = distance.saturating_sub(1);
        Self {
            decoder: RepetitionDecoder::new(distance),
            prev_syndrome: vec![0; width],
            diff: vec![0; width],
            step: vec![0; distance],
            frame: PauliFrame::new(distance),
            rounds_seen: 0,
        }
    }

    /// Zeroes the frame and the previous-round syndrome.
    pub fn reset(&mut self) {
        self.prev_syndrome.fill(0);
        self.frame.reset();
        self.rounds_seen = 0;
    }

    /// Feeds the next round's syndrome vector.
    ///
    /// # Returns
    ///
    /// `QecError::MalformedRecord` if `syndrome` is not `distance - 1` long.
    /// The tracker state is unchanged in that case.
    pub fn push_round(&mut self, syndrome: &[u8]) -> Result<(), QecError> {
        QecError::check_len(self.prev_syndrome.len(), syndrome.len())?;

        for ((d, &s), &p) in self.diff.iter_mut().zip(syndrome).zip(&self.prev_syndrome) {
            *d = (s ^ p) & 1;
        }
        self.decoder.solve_into(&self.diff, &mut self.step)?;
        self.frame.apply_correction(&self.step)?;
        self.prev_syndrome.copy_from_slice(syndrome);
        self.rounds_seen += 1;
        Ok(())
    }

    /// Accumulated correction so far.
    pub fn frame(&self) -> &PauliFrame {
        &self.frame
    }

    /// Rounds pushed since the last reset.
    pub fn rounds_seen(&self) -> usize {
        self.rounds_seen
    }
}

/// Runs a fresh tracker over a full syndrome history.
///
/// Pure: the result depends only on `distance` and `history`.
pub fn track_history<'a, I>(distance: usize, history: I) -> Result<PauliFrame, QecError>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut tracker = FrameTracker::new(distance);
    for syndrome in history {
        tracker.push_round(syndrome)?;
    }
    Ok(tracker.frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rounds_gives_zero_frame() {
        let frame = track_history(5, core::iter::empty()).unwrap();
        assert!(frame.is_identity());
        assert_eq!(frame.num_qubits(), 5);
    }

    #[test]
    fn test_single_round_decodes_syndrome_directly() {
        let rounds: [&[u8]; 1] = [&[1, 0, 0, 0]];
        let frame = track_history(5, rounds).unwrap();
        assert_eq!(frame.to_bits(), vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_persistent_error_is_corrected_once() {
        // Qubit 1 flips in round 0 and stays flipped; later rounds repeat the
        // same syndrome and contribute nothing.
        let rounds: [&[u8]; 3] = [&[1, 1], &[1, 1], &[1, 1]];
        let frame = track_history(3, rounds).unwrap();
        assert_eq!(frame.to_bits(), vec![0, 1, 0]);
    }

    #[test]
    fn test_errors_in_different_rounds_accumulate() {
        // Round 0: qubit 0 flips. Round 2: qubit 4 flips on top of it.
        let rounds: [&[u8]; 3] = [&[1, 0, 0, 0], &[1, 0, 0, 0], &[1, 0, 0, 1]];
        let frame = track_history(5, rounds).unwrap();
        assert_eq!(frame.to_bits(), vec![1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_transient_syndrome_cancels() {
        // A syndrome that appears and disappears decodes to a flip and its undo.
        let rounds: [&[u8]; 2] = [&[0, 1], &[0, 0]];
        let frame = track_history(3, rounds).unwrap();
        assert!(frame.is_identity());
    }

    #[test]
    fn test_reset_matches_fresh_tracker() {
        let rounds: [&[u8]; 2] = [&[1, 1, 0, 0], &[0, 1, 1, 0]];
        let mut tracker = FrameTracker::new(5);
        tracker.push_round(&[0, 0, 1, 1]).unwrap();
        tracker.reset();
        for r in rounds {
            tracker.push_round(r).unwrap();
        }
        assert_eq!(tracker.rounds_seen(), 2);
        assert_eq!(tracker.frame(), &track_history(5, rounds).unwrap());
    }

    #[test]
    fn test_wrong_width_leaves_state_untouched() {
        let mut tracker = FrameTracker::new(3);
        tracker.push_round(&[1, 0]).unwrap();
        let before = tracker.frame().clone();
        assert!(tracker.push_round(&[1, 0, 0]).is_err());
        assert_eq!(tracker.frame(), &before);
        assert_eq!(tracker.rounds_seen(), 1);
    }
}
