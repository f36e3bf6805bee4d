//! Noisy measurement source for repetition-code memory experiments.
//!
//! Builds the syndrome-extraction circuit for a distance-`d` repetition code
//! and samples it under independent bit-flip noise by propagating a Pauli
//! frame per shot. The sampler implements
//! [`rqec_core::MeasurementSource`], so its records feed the decoder
//! directly.

/// Circuit representation and the repetition-code circuit builder.
pub mod repetition;

/// Pauli-frame sampler producing measurement records.
pub mod sampler;

pub use repetition::{Circuit, build_repetition_code};
pub use sampler::{FrameSampler, three_qubit_code};
