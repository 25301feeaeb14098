//! Parameter model: closed-form quantities derived from epsilon.
//!
//! All functions are pure and total over epsilon in (0, 1]. Quotients are
//! rounded to nine decimals before `ceil` so that representation error on
//! grid values (`1 / 0.1² = 100.00000000000001`) cannot bump a count by one.

use serde::{Deserialize, Serialize};

use crate::params::{MAX_ANCILLAS, MIN_ANCILLAS, SimulationParameters};

/// Decimal places kept before rounding up.
const CEIL_PRECISION: f64 = 1e9;

fn stable_ceil(value: f64) -> f64 {
    ((value * CEIL_PRECISION).round() / CEIL_PRECISION).ceil()
}

/// Ancilla qubits needed to resolve a phase to within epsilon: `ceil(-log2 ε)`.
pub fn required_ancillas(epsilon: f64) -> u32 {
    stable_ceil(-epsilon.log2()).max(0.0) as u32
}

/// Classical samples needed for the same precision: `ceil(1 / ε²)`.
pub fn classical_sample_count(epsilon: f64) -> u64 {
    stable_ceil(1.0 / (epsilon * epsilon)) as u64
}

/// Phase estimation circuit depth: `ceil(1 / ε)`.
pub fn circuit_depth(epsilon: f64) -> u32 {
    stable_ceil(1.0 / epsilon) as u32
}

/// Smallest distinguishable phase step with `ancilla_qubits` ancillas.
pub fn phase_resolution(ancilla_qubits: u32) -> f64 {
    2f64.powi(-(ancilla_qubits as i32))
}

/// Number of computational basis states of the ancilla register.
pub fn basis_state_count(ancilla_qubits: u32) -> u64 {
    1u64 << ancilla_qubits
}

/// Ancilla count shown by the controls after an epsilon change.
///
/// The requirement is raised to the control minimum of 3, so epsilon = 0.25
/// (which needs only 2) displays 3.
pub fn displayed_ancillas(epsilon: f64) -> u32 {
    required_ancillas(epsilon).clamp(MIN_ANCILLAS, MAX_ANCILLAS)
}

/// All derived quantities for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    /// `ceil(-log2 ε)`, before the control minimum is applied.
    pub required_ancillas: u32,
    /// Nsample, `ceil(1 / ε²)`.
    pub classical_sample_count: u64,
    /// `ceil(1 / ε)`.
    pub circuit_depth: u32,
    /// `2^-m` for the configured ancilla count.
    pub phase_resolution: f64,
    /// `2^m` for the configured ancilla count.
    pub basis_state_count: u64,
}

impl DerivedQuantities {
    /// Recompute every derived quantity from the parameters.
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        let epsilon = params.epsilon();
        let ancillas = params.ancilla_qubits();
        Self {
            required_ancillas: required_ancillas(epsilon),
            classical_sample_count: classical_sample_count(epsilon),
            circuit_depth: circuit_depth(epsilon),
            phase_resolution: phase_resolution(ancillas),
            basis_state_count: basis_state_count(ancillas),
        }
    }
}
