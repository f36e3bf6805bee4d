//! Pauli frame tracking for bit-flip errors.
//!
//! A Pauli frame records, per qubit, whether an X operator has been applied
//! on top of the noiseless reference state. The sampler uses it to propagate
//! injected errors through CNOTs without simulating amplitudes; the frame
//! tracker uses the same register as the deferred correction that is applied
//! to the final data readout. Only X components are kept because the
//! repetition code protects against bit flips alone.

use crate::QecError;
use crate::bit_utils::BitPack;
use alloc::vec;
use alloc::vec::Vec;

/// Pauli frame tracking X operators on a fixed set of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauliFrame {
    /// Bit vector of X operators, packed as u64 words.
    ///
    /// Bit `q` is set when qubit `q` carries an X relative to the reference.
    x_register: Vec<u64>,

    /// Number of qubits tracked by the frame.
    num_qubits: usize,
}

impl PauliFrame {
    /// Creates a zeroed frame (identity on every qubit).
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - Number of qubits to track
    pub fn new(num_qubits: usize) -> Self {
        Self {
            x_register: vec![0; BitPack::words_for(num_qubits)],
            num_qubits,
        }
    }

    /// Number of qubits tracked by the frame.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Resets the frame to the identity without releasing storage.
    pub fn reset(&mut self) {
        self.x_register.fill(0);
    }

    /// Clears the X component of a single qubit.
    ///
    /// Models a reset of that qubit to |0⟩.
    pub fn reset_qubit(&mut self, q: usize) {
        BitPack::set(&mut self.x_register, q, false);
    }

    /// Applies an X operator to qubit `q`.
    pub fn apply_x(&mut self, q: usize) {
        BitPack::toggle(&mut self.x_register, q);
    }

    /// Applies a CNOT with control `c` and target `t`.
    ///
    /// CNOT conjugates X_c to X_c X_t, so an X on the control is copied onto
    /// the target. X on the target does not propagate back.
    ///
    /// # Arguments
    ///
    /// * `c` - Control qubit index
    /// * `t` - Target qubit index
    pub fn apply_cnot(&mut self, c: usize, t: usize) {
        if BitPack::get(&self.x_register, c) {
            BitPack::toggle(&mut self.x_register, t);
        }
    }

    /// Checks whether qubit `q` carries an X in the frame.
    ///
    /// A Z-basis measurement of such a qubit returns the flipped reference
    /// outcome.
    pub fn has_x_error(&self, q: usize) -> bool {
        BitPack::get(&self.x_register, q)
    }

    /// Frame bit of qubit `q` as 0/1.
    #[inline(always)]
    pub fn bit(&self, q: usize) -> u8 {
        self.has_x_error(q) as u8
    }

    /// XOR-composes an unpacked 0/1 correction onto the frame.
    ///
    /// Composition is order-independent, so the frame after several calls
    /// is the XOR of all corrections applied since the last reset.
    ///
    /// # Returns
    ///
    /// `QecError::MalformedRecord` if `correction` does not cover exactly
    /// `num_qubits` qubits.
    pub fn apply_correction(&mut self, correction: &[u8]) -> Result<(), QecError> {
        QecError::check_len(self.num_qubits, correction.len())?;
        for (q, &b) in correction.iter().enumerate() {
            if b & 1 == 1 {
                BitPack::toggle(&mut self.x_register, q);
            }
        }
        Ok(())
    }

    /// Number of qubits carrying an X.
    pub fn weight(&self) -> usize {
        BitPack::count_ones(&self.x_register)
    }

    /// True if no qubit carries an X.
    pub fn is_identity(&self) -> bool {
        self.x_register.iter().all(|&w| w == 0)
    }

    /// Unpacks the frame into a 0/1 vector indexed by qubit.
    pub fn to_bits(&self) -> Vec<u8> {
        (0..self.num_qubits).map(|q| self.bit(q)).collect()
    }
}
