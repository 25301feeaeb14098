//! Result set of a run and the statistics shown next to it.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model;

/// Maximum number of histogram rows reported.
pub const HISTOGRAM_ROWS: usize = 8;

/// A single sampled bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl Bit {
    /// Character form, `'0'` or `'1'`.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(one: bool) -> Self {
        if one { Bit::One } else { Bit::Zero }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A fixed-width binary phase readout, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseBits(String);

impl PhaseBits {
    /// Render `value` as a zero-padded binary string of `width` bits.
    ///
    /// Values wider than `width` keep all their bits.
    pub fn new(value: u64, width: u32) -> Self {
        Self(format!("{value:0width$b}", width = width as usize))
    }

    /// The bit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.0.len() as u32
    }

    /// Integer value of the bit string.
    pub fn value(&self) -> u64 {
        self.0
            .bytes()
            .fold(0, |acc, b| (acc << 1) | u64::from(b == b'1'))
    }

    /// Phase as a fraction of a full turn, `value / 2^width`.
    pub fn decimal_phase(&self) -> f64 {
        self.value() as f64 / model::basis_state_count(self.width()) as f64
    }
}

impl fmt::Display for PhaseBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of one completed run.
///
/// Empty at creation, replaced wholesale on completion, cleared on reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Classical coin-flip samples.
    pub sampling_results: Vec<Bit>,
    /// Phase register readouts.
    pub phase_results: Vec<PhaseBits>,
    /// Reported estimation accuracy in [0, 1].
    pub accuracy: f64,
    /// Reported circuit depth.
    pub circuit_depth: u32,
}

impl SimulationResults {
    /// Whether no run output is held (the results panel is hidden).
    pub fn is_empty(&self) -> bool {
        self.sampling_results.is_empty() && self.phase_results.is_empty()
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Phase readouts grouped and ordered by integer value, at most
    /// [`HISTOGRAM_ROWS`] rows.
    pub fn phase_histogram(&self) -> Vec<HistogramRow> {
        let mut counts: FxHashMap<&PhaseBits, usize> = FxHashMap::default();
        for phase in &self.phase_results {
            *counts.entry(phase).or_insert(0) += 1;
        }

        let total = self.phase_results.len() as f64;
        let mut rows: Vec<HistogramRow> = counts
            .into_iter()
            .map(|(phase, count)| HistogramRow {
                phase: phase.clone(),
                count,
                percentage: count as f64 / total * 100.0,
                decimal_phase: phase.decimal_phase(),
            })
            .collect();
        rows.sort_by_key(|row| row.phase.value());
        rows.truncate(HISTOGRAM_ROWS);
        rows
    }

    /// Counts of ones and zeros in the sampling results.
    pub fn sampling_stats(&self) -> SamplingStats {
        let ones = self
            .sampling_results
            .iter()
            .filter(|b| **b == Bit::One)
            .count();
        let zeros = self.sampling_results.len() - ones;
        let ratio = if self.sampling_results.is_empty() {
            0.0
        } else {
            ones as f64 / self.sampling_results.len() as f64
        };
        SamplingStats { ones, zeros, ratio }
    }
}

/// One row of the phase histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramRow {
    pub phase: PhaseBits,
    pub count: usize,
    /// Share of all phase readouts, in percent.
    pub percentage: f64,
    pub decimal_phase: f64,
}

/// Summary of the classical samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingStats {
    pub ones: usize,
    pub zeros: usize,
    /// Fraction of ones, 0 when there are no samples.
    pub ratio: f64,
}

/// Comparison of the run against the classical sampling baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsAnalysis {
    /// `1 - ε`.
    pub target_accuracy: f64,
    pub achieved_accuracy: f64,
    /// `1 - accuracy`.
    pub error_rate: f64,
    /// `ceil(1 / ε²)`.
    pub theoretical_samples: u64,
    pub circuit_depth: u32,
    /// Samples saved per circuit layer; `None` before any depth is known.
    pub quantum_advantage: Option<f64>,
    /// `(1 - depth / samples) * 100`.
    pub efficiency_gain: f64,
    pub sampling: SamplingStats,
    pub histogram: Vec<HistogramRow>,
}

impl ResultsAnalysis {
    /// Analyse `results` produced for accuracy parameter `epsilon`.
    pub fn new(results: &SimulationResults, epsilon: f64) -> Self {
        let theoretical_samples = model::classical_sample_count(epsilon);
        let depth = results.circuit_depth;
        let quantum_advantage =
            (depth > 0).then(|| theoretical_samples as f64 / f64::from(depth));

        Self {
            target_accuracy: 1.0 - epsilon,
            achieved_accuracy: results.accuracy,
            error_rate: 1.0 - results.accuracy,
            theoretical_samples,
            circuit_depth: depth,
            quantum_advantage,
            efficiency_gain: (1.0 - f64::from(depth) / theoretical_samples as f64) * 100.0,
            sampling: results.sampling_stats(),
            histogram: results.phase_histogram(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<Bit> {
        s.chars().map(|c| Bit::from(c == '1')).collect()
    }

    #[test]
    fn test_phase_bits_padding() {
        let phase = PhaseBits::new(5, 4);
        assert_eq!(phase.as_str(), "0101");
        assert_eq!(phase.value(), 5);
        assert_eq!(phase.width(), 4);
        assert_eq!(phase.decimal_phase(), 5.0 / 16.0);
        assert_eq!(PhaseBits::new(0, 3).to_string(), "000");
    }

    #[test]
    fn test_bit_serializes_as_char() {
        let json = serde_json::to_string(&bits("10")).unwrap();
        assert_eq!(json, r#"["1","0"]"#);
    }

    #[test]
    fn test_empty_results() {
        let results = SimulationResults::default();
        assert!(results.is_empty());
        assert_eq!(results.accuracy, 0.0);
        assert_eq!(results.circuit_depth, 0);
        assert!(results.phase_histogram().is_empty());
        assert_eq!(results.sampling_stats().ratio, 0.0);
    }

    #[test]
    fn test_histogram_orders_by_value() {
        let results = SimulationResults {
            phase_results: vec![
                PhaseBits::new(3, 3),
                PhaseBits::new(1, 3),
                PhaseBits::new(3, 3),
                PhaseBits::new(0, 3),
            ],
            ..Default::default()
        };

        let rows = results.phase_histogram();
        let order: Vec<&str> = rows.iter().map(|r| r.phase.as_str()).collect();
        assert_eq!(order, vec!["000", "001", "011"]);
        assert_eq!(rows[2].count, 2);
        assert_eq!(rows[2].percentage, 50.0);
        assert_eq!(rows[2].decimal_phase, 0.375);
    }

    #[test]
    fn test_histogram_truncated() {
        let results = SimulationResults {
            phase_results: (0..12).map(|i| PhaseBits::new(i, 4)).collect(),
            ..Default::default()
        };
        let rows = results.phase_histogram();
        assert_eq!(rows.len(), HISTOGRAM_ROWS);
        assert_eq!(rows.last().unwrap().phase.value(), 7);
    }

    #[test]
    fn test_sampling_stats() {
        let results = SimulationResults {
            sampling_results: bits("1101000011"),
            ..Default::default()
        };
        let stats = results.sampling_stats();
        assert_eq!(stats.ones, 5);
        assert_eq!(stats.zeros, 5);
        assert_eq!(stats.ratio, 0.5);
    }

    #[test]
    fn test_analysis() {
        let results = SimulationResults {
            sampling_results: bits("1111"),
            phase_results: vec![PhaseBits::new(0, 4)],
            accuracy: 0.9,
            circuit_depth: 10,
        };
        let analysis = ResultsAnalysis::new(&results, 0.1);

        assert_eq!(analysis.theoretical_samples, 100);
        assert_eq!(analysis.quantum_advantage, Some(10.0));
        assert_eq!(analysis.efficiency_gain, 90.0);
        assert!((analysis.target_accuracy - 0.9).abs() < 1e-12);
        assert!((analysis.error_rate - 0.1).abs() < 1e-12);
        assert_eq!(analysis.sampling.ones, 4);
        assert_eq!(analysis.histogram.len(), 1);
    }

    #[test]
    fn test_analysis_without_depth() {
        let analysis = ResultsAnalysis::new(&SimulationResults::default(), 0.1);
        assert_eq!(analysis.quantum_advantage, None);
        assert_eq!(analysis.efficiency_gain, 100.0);
    }

    #[test]
    fn test_clear() {
        let mut results = SimulationResults {
            sampling_results: bits("1"),
            phase_results: vec![PhaseBits::new(1, 3)],
            accuracy: 0.8,
            circuit_depth: 5,
        };
        results.clear();
        assert_eq!(results, SimulationResults::default());
    }
}
