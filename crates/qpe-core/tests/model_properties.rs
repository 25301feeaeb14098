//! Property-based tests for the parameter model.
//!
//! Every epsilon on the slider grid is `k / 100`, so the closed-form counts
//! can be checked against exact integer arithmetic.

use proptest::prelude::*;
use qpe_core::generator::{enumerate_phases, mock_accuracy};
use qpe_core::model::{
    basis_state_count, circuit_depth, classical_sample_count, displayed_ancillas,
    phase_resolution, required_ancillas,
};
use qpe_core::params::EPSILON_RANGE;
use qpe_core::{ResultsAnalysis, SimulationParameters, SimulationResults};

/// Epsilon on the slider grid together with its hundredths.
fn grid_epsilon() -> impl Strategy<Value = (u64, f64)> {
    (1_u64..=50).prop_map(|k| (k, EPSILON_RANGE.clamp_snap(k as f64 / 100.0)))
}

fn ceil_div(a: u64, b: u64) -> u64 {
    a.div_ceil(b)
}

proptest! {
    #[test]
    fn sample_count_matches_integer_ceil((k, eps) in grid_epsilon()) {
        prop_assert_eq!(classical_sample_count(eps), ceil_div(10_000, k * k));
    }

    #[test]
    fn depth_matches_integer_ceil((k, eps) in grid_epsilon()) {
        prop_assert_eq!(u64::from(circuit_depth(eps)), ceil_div(100, k));
    }

    #[test]
    fn required_ancillas_is_smallest_sufficient_register((k, eps) in grid_epsilon()) {
        let m = required_ancillas(eps);
        // 2^-m <= eps, i.e. 2^m * k >= 100, and m is minimal.
        prop_assert!((1u64 << m) * k >= 100);
        if m > 0 {
            prop_assert!((1u64 << (m - 1)) * k < 100);
        }
    }

    #[test]
    fn displayed_ancillas_within_controls((_k, eps) in grid_epsilon()) {
        let m = displayed_ancillas(eps);
        prop_assert!((3..=8).contains(&m));
        prop_assert!(m >= required_ancillas(eps));
    }

    #[test]
    fn accuracy_has_floor((_k, eps) in grid_epsilon()) {
        let acc = mock_accuracy(eps);
        prop_assert!(acc >= 0.7);
        prop_assert!(acc <= 1.0);
        prop_assert_eq!(acc, f64::max(0.7, 1.0 - eps));
    }

    #[test]
    fn slider_input_always_lands_on_grid(raw in -1.0f64..2.0) {
        let params = SimulationParameters::from_epsilon(raw).unwrap();
        let eps = params.epsilon();
        prop_assert!(EPSILON_RANGE.contains(eps));
        let hundredths = eps * 100.0;
        prop_assert!((hundredths - hundredths.round()).abs() < 1e-9);
    }

    #[test]
    fn resolution_times_basis_is_one(m in 3_u32..=8) {
        prop_assert_eq!(phase_resolution(m) * basis_state_count(m) as f64, 1.0);
    }

    #[test]
    fn enumerated_phases_are_padded_counters(m in 3_u32..=8) {
        let phases = enumerate_phases(m);
        prop_assert_eq!(phases.len(), 8);
        for (i, phase) in phases.iter().enumerate() {
            prop_assert_eq!(phase.width(), m);
            prop_assert_eq!(phase.value(), i as u64);
        }
    }
}

#[test]
fn quarter_epsilon_displays_three_ancillas() {
    let params = SimulationParameters::from_epsilon(0.25).unwrap();
    assert_eq!(required_ancillas(0.25), 2);
    assert_eq!(params.ancilla_qubits(), 3);
}

#[test]
fn analysis_advantage_grows_as_epsilon_shrinks() {
    let coarse = SimulationResults {
        circuit_depth: circuit_depth(0.5),
        ..Default::default()
    };
    let fine = SimulationResults {
        circuit_depth: circuit_depth(0.01),
        ..Default::default()
    };
    let coarse = ResultsAnalysis::new(&coarse, 0.5).quantum_advantage.unwrap();
    let fine = ResultsAnalysis::new(&fine, 0.01).quantum_advantage.unwrap();
    assert_eq!(coarse, 2.0);
    assert_eq!(fine, 100.0);
}
