//! Repetition-code syndrome-extraction circuits.
//!
//! Data qubits occupy indices `0..d` and ancillas `d..2d-1`; ancilla `k`
//! measures the parity of data qubits `k` and `k + 1`. Each round applies
//! bit-flip noise to every data qubit, entangles the ancillas, and
//! measure-resets them in ancilla order. After the last round every data
//! qubit is measured. Measurement slots follow
//! [`rqec_common::layout::RecordLayout`] exactly.

use core::fmt;
use rqec_common::isa::{Instruction, Opcode};
use rqec_common::layout::RecordLayout;
use rqec_core::QecError;
use rqec_core::params::CodeParams;

/// Flat instruction stream over numbered qubits.
#[derive(Debug, Clone)]
pub struct Circuit {
    instructions: Vec<Instruction>,
    num_qubits: usize,
    num_measurements: usize,
}

impl Circuit {
    /// Empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            instructions: Vec::new(),
            num_qubits,
            num_measurements: 0,
        }
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Data qubits plus ancillas.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of record slots written by the circuit.
    pub fn num_measurements(&self) -> usize {
        self.num_measurements
    }

    /// Appends an instruction, tracking the highest record slot written.
    pub fn push(&mut self, instr: Instruction) {
        if matches!(instr.op(), Some(Opcode::Measure | Opcode::MeasureReset)) {
            let slot = instr.operand_2 as usize;
            self.num_measurements = self.num_measurements.max(slot + 1);
        }
        self.instructions.push(instr);
    }
}

impl fmt::Display for Circuit {
    /// Stim-like listing, one instruction per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            let (a, b) = (instr.operand_1, instr.operand_2);
            match instr.op() {
                Some(Opcode::XError) => writeln!(f, "X_ERROR(p) {a}")?,
                Some(Opcode::Cnot) => writeln!(f, "CNOT {a} {b}")?,
                Some(op @ (Opcode::Measure | Opcode::MeasureReset)) => {
                    writeln!(f, "{} {a}  # rec[{b}]", op.mnemonic())?
                }
                Some(Opcode::Tick) => writeln!(f, "TICK")?,
                None => writeln!(f, "# unknown opcode {:#04x}", { instr.opcode })?,
            }
        }
        Ok(())
    }
}

/// Builds the memory-experiment circuit for a distance-`distance` code.
///
/// # Arguments
///
/// * `distance` - Number of data qubits; odd and at least 1
/// * `rounds` - Number of syndrome-extraction rounds
///
/// # Returns
///
/// The circuit, or `QecError::InvalidParameter` if the distance is invalid
/// or qubit and record indices do not fit the 16-bit operand width.
pub fn build_repetition_code(distance: usize, rounds: usize) -> Result<Circuit, QecError> {
    // Noise is not part of the circuit's structure.
    let params = CodeParams::new(distance, rounds, 0.0)?;
    build_for(&params)
}

// Largest index a 16-bit operand can address, plus one.
const OPERAND_RANGE: usize = u16::MAX as usize + 1;

pub(crate) fn build_for(params: &CodeParams) -> Result<Circuit, QecError> {
    let d = params.distance();
    let layout: RecordLayout = params.layout();

    // 2d - 1 qubits must stay addressable; checked before the product is formed.
    if d > (OPERAND_RANGE + 1) / 2 {
        return Err(QecError::InvalidParameter {
            param: "distance",
            reason: "too many qubits for 16-bit operands",
        });
    }
    let num_qubits = 2 * d - 1;

    // Distance 1 writes no syndrome slots, so rounds are bounded separately.
    if params.rounds() > OPERAND_RANGE {
        return Err(QecError::InvalidParameter {
            param: "rounds",
            reason: "too many rounds for one circuit",
        });
    }
    match layout.checked_record_len() {
        Some(len) if len <= OPERAND_RANGE => {}
        _ => {
            return Err(QecError::InvalidParameter {
                param: "rounds",
                reason: "too many measurements for 16-bit record slots",
            });
        }
    }

    let ancilla = |k: usize| (d + k) as u16;
    let mut circuit = Circuit::new(num_qubits);

    for round in 0..params.rounds() {
        for q in 0..d {
            circuit.push(Instruction::new(Opcode::XError, q as u16, 0));
        }
        for k in 0..d - 1 {
            circuit.push(Instruction::new(Opcode::Cnot, k as u16, ancilla(k)));
            circuit.push(Instruction::new(Opcode::Cnot, (k + 1) as u16, ancilla(k)));
        }
        for k in 0..d - 1 {
            let slot = layout.syndrome_slot(round, k) as u16;
            circuit.push(Instruction::new(Opcode::MeasureReset, ancilla(k), slot));
        }
        circuit.push(Instruction::new(Opcode::Tick, 0, 0));
    }

    for q in 0..d {
        let slot = layout.data_slot(q) as u16;
        circuit.push(Instruction::new(Opcode::Measure, q as u16, slot));
    }

    Ok(circuit)
}
