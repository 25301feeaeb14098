//! Simulation parameters and their input bounds.
//!
//! Every setter behaves like a range slider: values outside the range are
//! clamped and then snapped to the step grid. Only non-finite floats are
//! rejected.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model;

/// Bounds and step of a continuous slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Grid spacing.
    pub step: f64,
}

impl ParameterRange {
    /// Clamp `value` into the range and snap it to the step grid.
    pub fn clamp_snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);
        // Strip accumulated representation error (0.01 + 9 * 0.01 != 0.1).
        (snapped * 1e6).round() / 1e6
    }

    /// Check whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Accuracy parameter slider: [0.01, 0.5] step 0.01.
pub const EPSILON_RANGE: ParameterRange = ParameterRange {
    min: 0.01,
    max: 0.5,
    step: 0.01,
};

/// Noise level slider: [0, 0.2] step 0.01.
pub const NOISE_RANGE: ParameterRange = ParameterRange {
    min: 0.0,
    max: 0.2,
    step: 0.01,
};

/// Smallest ancilla register offered by the controls.
pub const MIN_ANCILLAS: u32 = 3;

/// Largest ancilla register offered by the controls.
pub const MAX_ANCILLAS: u32 = 8;

/// Default accuracy parameter.
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Default ancilla register size.
pub const DEFAULT_ANCILLAS: u32 = 4;

/// User-controlled simulation parameters.
///
/// `ancilla_qubits` is re-derived from epsilon whenever epsilon changes, but
/// can be overridden independently afterwards. Nothing keeps the two
/// consistent once the override is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    epsilon: f64,
    ancilla_qubits: u32,
    noise_level: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            ancilla_qubits: DEFAULT_ANCILLAS,
            noise_level: 0.0,
        }
    }
}

impl SimulationParameters {
    /// Create parameters from raw input values.
    ///
    /// Epsilon is applied first (deriving an ancilla count), then the explicit
    /// ancilla count overrides it.
    pub fn new(epsilon: f64, ancilla_qubits: u32, noise_level: f64) -> CoreResult<Self> {
        let mut params = Self::default();
        params.set_epsilon(epsilon)?;
        params.set_ancilla_qubits(ancilla_qubits);
        params.set_noise_level(noise_level)?;
        Ok(params)
    }

    /// Create parameters from epsilon alone, deriving the ancilla count.
    pub fn from_epsilon(epsilon: f64) -> CoreResult<Self> {
        let mut params = Self::default();
        params.set_epsilon(epsilon)?;
        Ok(params)
    }

    /// Accuracy parameter.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Ancilla register size.
    pub fn ancilla_qubits(&self) -> u32 {
        self.ancilla_qubits
    }

    /// Depolarizing noise level (display only).
    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    /// Set epsilon and re-derive the ancilla count from it.
    pub fn set_epsilon(&mut self, epsilon: f64) -> CoreResult<()> {
        if !epsilon.is_finite() {
            return Err(CoreError::NonFinite { field: "epsilon" });
        }
        self.epsilon = EPSILON_RANGE.clamp_snap(epsilon);
        self.ancilla_qubits = model::displayed_ancillas(self.epsilon);
        Ok(())
    }

    /// Override the ancilla count, clamped to the offered range.
    pub fn set_ancilla_qubits(&mut self, ancilla_qubits: u32) {
        self.ancilla_qubits = ancilla_qubits.clamp(MIN_ANCILLAS, MAX_ANCILLAS);
    }

    /// Set the noise level.
    pub fn set_noise_level(&mut self, noise_level: f64) -> CoreResult<()> {
        if !noise_level.is_finite() {
            return Err(CoreError::NonFinite {
                field: "noise_level",
            });
        }
        self.noise_level = NOISE_RANGE.clamp_snap(noise_level);
        Ok(())
    }

    /// Whether the ancilla count still matches what epsilon would derive.
    pub fn ancillas_match_epsilon(&self) -> bool {
        self.ancilla_qubits == model::displayed_ancillas(self.epsilon)
    }
}
