//! Common definitions shared across the repetition-code simulation system.
//!
//! This crate provides the measurement-record layout contract between the
//! noisy measurement source and the decoder, and the instruction set used to
//! describe syndrome-extraction circuits. Both the sampler and the file
//! readers depend on these definitions, so they live in a dependency-free
//! `no_std` crate.

#![no_std]

/// Measurement-record layout for repetition-code memory experiments.
///
/// Every shot produced by a measurement source is a flat sequence of 0/1
/// outcomes. The first `rounds * (distance - 1)` entries are the ancilla
/// outcomes, round-major, ancilla index ascending within a round. The trailing
/// `distance` entries are the final data-qubit readout in data index order.
/// Decoders index records exclusively through [`layout::RecordLayout`] so a
/// change in ordering is a version bump here rather than silent corruption.
pub mod layout {
    use core::fmt;
    use core::ops::Range;

    /// Version of the record ordering described in this module.
    ///
    /// Bump whenever the position of any syndrome or data bit changes. File
    /// formats and replay sources compare against this value.
    pub const LAYOUT_VERSION: u32 = 1;

    /// Geometry of one shot's measurement record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordLayout {
        /// Number of data qubits in the repetition code.
        pub distance: usize,

        /// Number of syndrome-extraction rounds before the final readout.
        pub rounds: usize,
    }

    impl RecordLayout {
        /// Layout of a distance-`distance` code read out after `rounds`
        /// rounds. No validation; see `CodeParams` for the admissible range.
        pub const fn new(distance: usize, rounds: usize) -> Self {
            Self { distance, rounds }
        }

        /// Number of ancilla outcomes per round (`distance - 1`).
        #[inline(always)]
        pub const fn syndrome_width(&self) -> usize {
            self.distance.saturating_sub(1)
        }

        /// Total ancilla outcomes across all rounds.
        #[inline(always)]
        pub const fn syndrome_bits(&self) -> usize {
            self.rounds * self.syndrome_width()
        }

        /// Length of a complete shot: all syndrome rounds plus final data.
        #[inline(always)]
        pub const fn record_len(&self) -> usize {
            self.syndrome_bits() + self.distance
        }

        /// [`RecordLayout::record_len`], or `None` if it does not fit in a
        /// `usize`.
        ///
        /// The unchecked accessors assume a layout whose length has been
        /// established through this method once.
        pub const fn checked_record_len(&self) -> Option<usize> {
            match self.rounds.checked_mul(self.syndrome_width()) {
                Some(bits) => bits.checked_add(self.distance),
                None => None,
            }
        }

        /// Record positions holding the ancilla outcomes of round `round`.
        pub const fn round_range(&self, round: usize) -> Range<usize> {
            let w = self.syndrome_width();
            round * w..(round + 1) * w
        }

        /// Record positions holding the final data-qubit readout.
        pub const fn data_range(&self) -> Range<usize> {
            self.syndrome_bits()..self.record_len()
        }

        /// Record position of ancilla `ancilla` in round `round`.
        #[inline(always)]
        pub const fn syndrome_slot(&self, round: usize, ancilla: usize) -> usize {
            round * self.syndrome_width() + ancilla
        }

        /// Record position of the final readout of data qubit `qubit`.
        #[inline(always)]
        pub const fn data_slot(&self, qubit: usize) -> usize {
            self.syndrome_bits() + qubit
        }

        /// Splits a shot into its syndrome rounds and final data readout.
        ///
        /// Returns `None` when the record length does not match this layout.
        pub fn split<'a>(&self, record: &'a [u8]) -> Option<(SyndromeRounds<'a>, &'a [u8])> {
            if Some(record.len()) != self.checked_record_len() {
                return None;
            }
            let (syndromes, data) = record.split_at(self.syndrome_bits());
            Some((
                SyndromeRounds {
                    bits: syndromes,
                    width: self.syndrome_width(),
                    next: 0,
                    rounds: self.rounds,
                },
                data,
            ))
        }
    }

    impl fmt::Display for RecordLayout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "distance {} over {} rounds", self.distance, self.rounds)
        }
    }

    /// Iterator over the per-round syndrome vectors of one shot, in
    /// measurement order.
    #[derive(Debug, Clone)]
    pub struct SyndromeRounds<'a> {
        bits: &'a [u8],
        width: usize,
        next: usize,
        rounds: usize,
    }

    impl<'a> Iterator for SyndromeRounds<'a> {
        type Item = &'a [u8];

        fn next(&mut self) -> Option<Self::Item> {
            if self.next >= self.rounds {
                return None;
            }
            let start = self.next * self.width;
            self.next += 1;
            Some(&self.bits[start..start + self.width])
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            let left = self.rounds - self.next;
            (left, Some(left))
        }
    }

    impl ExactSizeIterator for SyndromeRounds<'_> {}
}

/// Instruction set for syndrome-extraction circuits.
///
/// Circuits are flat instruction streams over numbered qubits. Noise is a
/// property of the circuit, not of the individual instruction, so every
/// `XError` in a stream flips with the same probability.
pub mod isa {
    /// Opcode enumeration for circuit instructions.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Opcode {
        /// Independent bit flip on operand 1 with the circuit's noise probability.
        XError = 0x01,

        /// Controlled-NOT with control operand 1 and target operand 2.
        ///
        /// Propagates an X error on the control onto the target, which is how
        /// ancillas pick up the parity of their neighbouring data qubits.
        Cnot = 0x03,

        /// Z-basis measurement of operand 1 into record slot operand 2.
        Measure = 0x10,

        /// Z-basis measurement of operand 1 into record slot operand 2,
        /// followed by a reset of the qubit to |0⟩.
        ///
        /// Ancillas use this every round so each round's outcome reflects only
        /// the parity present at that round.
        MeasureReset = 0x11,

        /// Round separator. Has no effect on state.
        Tick = 0xFE,
    }

    impl Opcode {
        /// Stim-style mnemonic used in circuit listings.
        pub const fn mnemonic(self) -> &'static str {
            match self {
                Opcode::XError => "X_ERROR",
                Opcode::Cnot => "CNOT",
                Opcode::Measure => "M",
                Opcode::MeasureReset => "MR",
                Opcode::Tick => "TICK",
            }
        }
    }

    /// Binary instruction format for circuit operations.
    ///
    /// Compact 6-byte encoding. Operand meaning depends on the opcode: the
    /// first operand is always a qubit index, the second is either a CNOT
    /// target or a measurement-record slot.
    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy)]
    pub struct Instruction {
        /// Operation code identifying the instruction type.
        pub opcode: u8,

        /// Qubit the instruction acts on (CNOT control).
        pub operand_1: u16,

        /// CNOT target or measurement-record slot; unused otherwise.
        pub operand_2: u16,

        /// Padding byte. Always zero.
        pub _padding: u8,
    }

    impl Instruction {
        /// Constructs a new instruction with the specified opcode and operands.
        ///
        /// # Arguments
        ///
        /// * `opcode` - The operation to perform
        /// * `op1` - Qubit index (control for CNOT)
        /// * `op2` - Target qubit or record slot
        pub fn new(opcode: Opcode, op1: u16, op2: u16) -> Self {
            Self {
                opcode: opcode as u8,
                operand_1: op1,
                operand_2: op2,
                _padding: 0,
            }
        }

        /// Decodes the opcode byte, or `None` for an unknown value.
        pub fn op(&self) -> Option<Opcode> {
            match self.opcode {
                0x01 => Some(Opcode::XError),
                0x03 => Some(Opcode::Cnot),
                0x10 => Some(Opcode::Measure),
                0x11 => Some(Opcode::MeasureReset),
                0xFE => Some(Opcode::Tick),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::isa::{Instruction, Opcode};
    use super::layout::RecordLayout;

    #[test]
    fn test_layout_positions() {
        let layout = RecordLayout::new(5, 3);
        assert_eq!(layout.syndrome_width(), 4);
        assert_eq!(layout.syndrome_bits(), 12);
        assert_eq!(layout.record_len(), 17);
        assert_eq!(layout.round_range(2), 8..12);
        assert_eq!(layout.data_range(), 12..17);
        assert_eq!(layout.syndrome_slot(1, 3), 7);
        assert_eq!(layout.data_slot(0), 12);
    }

    #[test]
    fn test_split_round_major() {
        let layout = RecordLayout::new(3, 2);
        let record = [1, 0, 0, 1, 1, 1, 0];
        let (rounds, data) = layout.split(&record).unwrap();
        assert_eq!(rounds.len(), 2);
        let rounds: [&[u8]; 2] = {
            let mut it = rounds;
            [it.next().unwrap(), it.next().unwrap()]
        };
        assert_eq!(rounds[0], &[1, 0]);
        assert_eq!(rounds[1], &[0, 1]);
        assert_eq!(data, &[1, 1, 0]);
    }

    #[test]
    fn test_checked_record_len_detects_overflow() {
        assert_eq!(RecordLayout::new(5, 3).checked_record_len(), Some(17));
        assert_eq!(RecordLayout::new(1, usize::MAX).checked_record_len(), Some(1));
        assert_eq!(RecordLayout::new(3, usize::MAX / 2 + 1).checked_record_len(), None);
        assert_eq!(RecordLayout::new(3, usize::MAX / 2).checked_record_len(), None);
        assert_eq!(RecordLayout::new(usize::MAX, 0).checked_record_len(), Some(usize::MAX));
        assert!(RecordLayout::new(3, usize::MAX / 2 + 1).split(&[0; 3]).is_none());
    }

    #[test]
    fn test_split_rejects_wrong_length() {
        let layout = RecordLayout::new(3, 2);
        assert!(layout.split(&[0; 6]).is_none());
    }

    #[test]
    fn test_distance_one_has_empty_rounds() {
        let layout = RecordLayout::new(1, 4);
        assert_eq!(layout.record_len(), 1);
        let (rounds, data) = layout.split(&[1]).unwrap();
        assert_eq!(rounds.len(), 4);
        assert!(rounds.clone().all(|r| r.is_empty()));
        assert_eq!(data, &[1]);
    }

    #[test]
    fn test_opcode_round_trip_through_instruction() {
        for op in [
            Opcode::XError,
            Opcode::Cnot,
            Opcode::Measure,
            Opcode::MeasureReset,
            Opcode::Tick,
        ] {
            assert_eq!(Instruction::new(op, 0, 0).op(), Some(op));
        }
        let bogus = Instruction {
            opcode: 0x7F,
            operand_1: 0,
            operand_2: 0,
            _padding: 0,
        };
        assert_eq!(bogus.op(), None);
    }
}
