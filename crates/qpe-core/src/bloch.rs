//! Bloch-sphere geometry for the single-qubit state indicator.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Cartesian coordinates of a pure state on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    /// State with polar angle `acos(amplitude)` and azimuth `2π · phase`.
    ///
    /// `phase` is a fraction of a full turn; `amplitude` is clamped to [-1, 1].
    pub fn from_phase(phase: f64, amplitude: f64) -> Self {
        let theta = amplitude.clamp(-1.0, 1.0).acos();
        let phi = phase * 2.0 * PI;
        Self {
            x: theta.sin() * phi.cos(),
            y: theta.sin() * phi.sin(),
            z: theta.cos(),
        }
    }

    /// Indicator position in percent of the sphere widget: `(left, top)`.
    pub fn screen_position(&self) -> (f64, f64) {
        (50.0 + self.x * 40.0, 50.0 - self.z * 40.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_ground_state_points_up() {
        let v = BlochVector::from_phase(0.0, 1.0);
        assert!((v.z - 1.0).abs() < EPS);
        assert!(v.x.abs() < EPS && v.y.abs() < EPS);
        assert_eq!(v.screen_position(), (50.0, 10.0));
    }

    #[test]
    fn test_equator_quarter_turn() {
        let v = BlochVector::from_phase(0.25, 0.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
        assert!(v.z.abs() < EPS);
    }

    #[test]
    fn test_amplitude_clamped() {
        let v = BlochVector::from_phase(0.0, 3.0);
        assert!((v.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_unit_length() {
        for &(p, a) in &[(0.1, 0.3), (0.7, -0.5), (0.5, 0.9)] {
            let v = BlochVector::from_phase(p, a);
            let norm = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
