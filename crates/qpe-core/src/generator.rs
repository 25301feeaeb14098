//! Run generators.
//!
//! A [`RunGenerator`] turns a parameter set into a result set. Scheduling,
//! latency and cancellation are the caller's concern; a generator only
//! computes.
//!
//! ```text
//!   SimulationParameters ──→ run() ──→ SimulationResults
//! ```
//!
//! [`MockRunGenerator`] fabricates the data: uniform coin flips and a fixed
//! enumeration of phase readouts. A genuine probabilistic model can be
//! dropped in behind the same trait.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::error::CoreResult;
use crate::model;
use crate::params::SimulationParameters;
use crate::results::{Bit, PhaseBits, SimulationResults};

/// Number of coin-flip samples in a mock run.
pub const SAMPLING_RESULT_COUNT: usize = 10;

/// Number of enumerated phase readouts in a mock run.
pub const PHASE_RESULT_COUNT: u64 = 8;

/// Lowest accuracy a mock run reports.
pub const ACCURACY_FLOOR: f64 = 0.7;

/// Strategy producing the result set of one run.
#[async_trait]
pub trait RunGenerator: Send + Sync {
    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Produce results for `params`.
    async fn run(&self, params: &SimulationParameters) -> CoreResult<SimulationResults>;
}

/// Accuracy reported for `epsilon`: `max(0.7, 1 - ε)`.
pub fn mock_accuracy(epsilon: f64) -> f64 {
    ACCURACY_FLOOR.max(1.0 - epsilon)
}

/// The first `min(8, 2^m)` phase readouts of width `m`, counting from zero.
pub fn enumerate_phases(ancilla_qubits: u32) -> Vec<PhaseBits> {
    let count = PHASE_RESULT_COUNT.min(model::basis_state_count(ancilla_qubits));
    (0..count)
        .map(|value| PhaseBits::new(value, ancilla_qubits))
        .collect()
}

/// Draw `count` independent fair bits.
pub fn draw_bits<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Bit> {
    (0..count).map(|_| Bit::from(rng.gen_bool(0.5))).collect()
}

/// Generator that fabricates plausible-looking results without computing
/// anything.
pub struct MockRunGenerator {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl MockRunGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            seed: None,
        }
    }

    /// Create a reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Seed used at construction, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn generate(&self, params: &SimulationParameters) -> SimulationResults {
        let sampling_results = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            draw_bits(&mut *rng, SAMPLING_RESULT_COUNT)
        };

        SimulationResults {
            sampling_results,
            phase_results: enumerate_phases(params.ancilla_qubits()),
            accuracy: mock_accuracy(params.epsilon()),
            circuit_depth: model::circuit_depth(params.epsilon()),
        }
    }
}

impl Default for MockRunGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunGenerator for MockRunGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    #[instrument(
        skip(self, params),
        fields(epsilon = params.epsilon(), ancillas = params.ancilla_qubits())
    )]
    async fn run(&self, params: &SimulationParameters) -> CoreResult<SimulationResults> {
        let results = self.generate(params);
        debug!(
            "Generated {} samples, {} phase readouts, accuracy {:.3}",
            results.sampling_results.len(),
            results.phase_results.len(),
            results.accuracy
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_floor() {
        assert_eq!(mock_accuracy(0.4), 0.7);
        assert_eq!(mock_accuracy(0.5), 0.7);
        assert_eq!(mock_accuracy(0.1), 0.9);
        assert_eq!(mock_accuracy(0.3), 0.7);
    }

    #[test]
    fn test_enumerate_phases() {
        let phases = enumerate_phases(4);
        let strings: Vec<&str> = phases.iter().map(PhaseBits::as_str).collect();
        assert_eq!(
            strings,
            vec![
                "0000", "0001", "0010", "0011", "0100", "0101", "0110", "0111"
            ]
        );
    }

    #[test]
    fn test_enumerate_phases_small_register() {
        assert_eq!(enumerate_phases(2).len(), 4);
        assert_eq!(enumerate_phases(3).len(), 8);
        assert_eq!(enumerate_phases(8).len(), 8);
    }

    #[tokio::test]
    async fn test_mock_run_shape() {
        let generator = MockRunGenerator::new();
        let params = SimulationParameters::new(0.1, 5, 0.0).unwrap();
        let results = generator.run(&params).await.unwrap();

        assert_eq!(results.sampling_results.len(), SAMPLING_RESULT_COUNT);
        assert!(
            results
                .sampling_results
                .iter()
                .all(|b| matches!(b.as_char(), '0' | '1'))
        );
        assert_eq!(results.phase_results.len(), 8);
        assert!(results.phase_results.iter().all(|p| p.width() == 5));
        assert_eq!(results.phase_results[7].as_str(), "00111");
        assert_eq!(results.accuracy, 0.9);
        assert_eq!(results.circuit_depth, 10);
    }

    #[tokio::test]
    async fn test_phase_results_reproducible() {
        let params = SimulationParameters::default();
        let a = MockRunGenerator::new().run(&params).await.unwrap();
        let b = MockRunGenerator::new().run(&params).await.unwrap();
        assert_eq!(a.phase_results, b.phase_results);
    }

    #[tokio::test]
    async fn test_seeded_generators_agree() {
        let params = SimulationParameters::default();
        let a = MockRunGenerator::with_seed(42).run(&params).await.unwrap();
        let b = MockRunGenerator::with_seed(42).run(&params).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(MockRunGenerator::with_seed(42).seed(), Some(42));
    }

    #[test]
    fn test_draw_bits_is_roughly_fair() {
        let mut rng = StdRng::seed_from_u64(7);
        let bits = draw_bits(&mut rng, 10_000);
        let ones = bits.iter().filter(|b| **b == Bit::One).count();
        assert!((4_500..=5_500).contains(&ones), "ones = {ones}");
    }
}
