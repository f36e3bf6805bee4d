//! Pauli-frame sampling of repetition-code circuits.
//!
//! The noiseless memory experiment on |0_L⟩ measures 0 everywhere, so each
//! recorded outcome is simply the X component of the measured qubit's Pauli
//! frame. The sampler walks the circuit once per shot, flipping frame bits
//! at `XError` sites, propagating them through CNOTs, and reading them out
//! at measurements.

use crate::repetition::{Circuit, build_for};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rqec_common::isa::{Instruction, Opcode};
use rqec_common::layout::RecordLayout;
use rqec_core::orchestrator::{Strategy, run_trials};
use rqec_core::params::CodeParams;
use rqec_core::{MeasurementSource, PauliFrame, QecError, SampleBatch};
use tracing::debug;

/// Measurement source that samples the repetition-code circuit under
/// independent bit-flip noise.
///
/// Owns its random number generator; every shot draws fresh noise, so
/// records within and across calls are independent.
pub struct FrameSampler<R: Rng> {
    rng: R,
    frame: PauliFrame,
    layout: RecordLayout,
    circuit: Circuit,
}

impl FrameSampler<StdRng> {
    /// Sampler with a reproducible `StdRng` stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> FrameSampler<R> {
    /// Sampler drawing noise from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            frame: PauliFrame::new(0),
            // Distance 0 never matches a validated layout.
            layout: RecordLayout::new(0, 0),
            circuit: Circuit::new(0),
        }
    }

    /// Builds the circuit for `params`, reusing the cached one when the
    /// layout is unchanged.
    fn prepare(&mut self, params: &CodeParams) -> Result<(), QecError> {
        let layout = params.layout();
        if layout != self.layout {
            let circuit = build_for(params)?;
            debug!(
                distance = layout.distance,
                rounds = layout.rounds,
                instructions = circuit.instructions().len(),
                "built repetition circuit"
            );
            self.frame = PauliFrame::new(circuit.num_qubits());
            self.layout = layout;
            self.circuit = circuit;
        }
        Ok(())
    }
}

/// Runs one shot of `circuit` and writes its outcomes into `record`.
fn sample_shot<R: Rng>(
    circuit: &[Instruction],
    noise: f64,
    frame: &mut PauliFrame,
    rng: &mut R,
    record: &mut [u8],
) {
    frame.reset();
    for instr in circuit {
        let q = instr.operand_1 as usize;
        let slot = instr.operand_2 as usize;
        match instr.op() {
            Some(Opcode::XError) => {
                if noise > 0.0 && rng.gen_bool(noise) {
                    frame.apply_x(q);
                }
            }
            Some(Opcode::Cnot) => frame.apply_cnot(q, slot),
            Some(Opcode::Measure) => record[slot] = frame.bit(q),
            Some(Opcode::MeasureReset) => {
                record[slot] = frame.bit(q);
                frame.reset_qubit(q);
            }
            Some(Opcode::Tick) | None => {}
        }
    }
}

impl<R: Rng> MeasurementSource for FrameSampler<R> {
    type Error = QecError;

    fn sample(&mut self, params: &CodeParams, trials: usize) -> Result<SampleBatch, QecError> {
        self.prepare(params)?;

        let mut batch = SampleBatch::zeros(self.layout, trials)?;
        for trial in 0..trials {
            sample_shot(
                self.circuit.instructions(),
                params.noise(),
                &mut self.frame,
                &mut self.rng,
                batch.record_mut(trial),
            );
        }
        Ok(batch)
    }
}

/// Logical error rate of the single-round distance-3 code.
///
/// Encodes |0_L⟩, applies one round of bit-flip noise with probability
/// `chance`, extracts both parities once, corrects by the syndrome lookup,
/// and majority-votes the corrected data.
///
/// # Returns
///
/// Fraction of `shots` that decoded to logical 1, or
/// `QecError::InvalidParameter` if `chance` is not a probability or `shots`
/// is zero.
pub fn three_qubit_code<R: Rng>(chance: f64, shots: usize, rng: R) -> Result<f64, QecError> {
    let params = CodeParams::new(3, 1, chance)?;
    let mut sampler = FrameSampler::new(rng);
    let stats = run_trials(&mut sampler, &params, shots, Strategy::Batched)?;
    Ok(stats.corrected_rate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_noise_records_are_all_zero() {
        let params = CodeParams::new(5, 4, 0.0).unwrap();
        let batch = FrameSampler::seeded(7).sample(&params, 50).unwrap();
        assert_eq!(batch.trials(), 50);
        assert_eq!(batch.record_len(), 4 * 4 + 5);
        assert!(batch.as_bits().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_full_noise_flips_every_round() {
        // p = 1 flips every data qubit every round: odd rounds leave data
        // flipped, and all parities stay even.
        let params = CodeParams::new(3, 3, 1.0).unwrap();
        let batch = FrameSampler::seeded(1).sample(&params, 4).unwrap();
        for record in batch.records() {
            assert_eq!(&record[..6], &[0; 6]);
            assert_eq!(&record[6..], &[1, 1, 1]);
        }
    }

    #[test]
    fn test_syndromes_track_accumulated_data_flips() {
        let params = CodeParams::new(7, 6, 0.2).unwrap();
        let layout = params.layout();
        let batch = FrameSampler::seeded(42).sample(&params, 200).unwrap();
        for record in batch.records() {
            // The last round sees the final data state: its parities must
            // match adjacent data bits exactly.
            let last = &record[layout.round_range(5)];
            let data = &record[layout.data_range()];
            for k in 0..6 {
                assert_eq!(last[k], data[k] ^ data[k + 1]);
            }
        }
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let params = CodeParams::new(5, 3, 0.1).unwrap();
        let a = FrameSampler::seeded(99).sample(&params, 20).unwrap();
        let b = FrameSampler::seeded(99).sample(&params, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_circuit_rebuilt_on_layout_change() {
        let mut sampler = FrameSampler::seeded(3);
        let small = CodeParams::new(3, 1, 0.0).unwrap();
        let large = CodeParams::new(5, 2, 0.0).unwrap();
        assert_eq!(sampler.sample(&small, 1).unwrap().record_len(), 5);
        assert_eq!(sampler.sample(&large, 1).unwrap().record_len(), 13);
        assert_eq!(sampler.sample(&small, 1).unwrap().record_len(), 5);
    }

    #[test]
    fn test_oversized_requests_are_rejected_not_sampled() {
        let mut sampler = FrameSampler::seeded(8);
        let params = CodeParams::new(3, 1, 0.1).unwrap();
        assert!(matches!(
            sampler.sample(&params, usize::MAX),
            Err(QecError::InvalidParameter { param: "trials", .. })
        ));

        let long = CodeParams::new(1, usize::MAX, 0.1).unwrap();
        assert!(matches!(
            sampler.sample(&long, 1),
            Err(QecError::InvalidParameter { param: "rounds", .. })
        ));

        // A failed request leaves the sampler usable.
        assert_eq!(sampler.sample(&params, 2).unwrap().trials(), 2);
    }

    #[test]
    fn test_three_qubit_code_rates() {
        assert_eq!(three_qubit_code(0.0, 100, StdRng::seed_from_u64(0)).unwrap(), 0.0);
        // Two or three flips out of three always defeat the lookup decoder.
        assert_eq!(three_qubit_code(1.0, 100, StdRng::seed_from_u64(0)).unwrap(), 1.0);
        // 3p^2 - 2p^3 at p = 0.1 is 0.028.
        let rate = three_qubit_code(0.1, 50_000, StdRng::seed_from_u64(5)).unwrap();
        assert!((rate - 0.028).abs() < 0.005, "rate = {rate}");
    }
}
