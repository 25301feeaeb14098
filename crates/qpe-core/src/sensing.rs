//! Quantum sensing demo: magnetic anomaly detection on a square grid.
//!
//! A target placed on the grid induces a phase shift that decays with
//! distance, `exp(-d / 5) · π`. Scanning the grid produces the phase map.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Side length of the sensing grid.
pub const GRID_SIZE: usize = 20;

/// Distance over which the phase shift decays by `1/e`.
pub const DECAY_LENGTH: f64 = 5.0;

/// Phase shift at `distance` from the anomaly.
pub fn phase_shift(distance: f64) -> f64 {
    (-distance / DECAY_LENGTH).exp() * PI
}

/// HSL lightness (percent) used to shade a cell with phase `phase`.
///
/// Zero phase is white (100 %), a full π shift is mid-tone (50 %).
pub fn lightness(phase: f64) -> f64 {
    100.0 - (phase / PI) * 50.0
}

/// A grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

/// Phase map produced by a scan, indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMap {
    cells: Vec<Vec<f64>>,
}

impl PhaseMap {
    /// Phase at a cell, if inside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.cells.get(x).and_then(|row| row.get(y)).copied()
    }

    /// Rows of the map.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Cell with the largest phase shift.
    pub fn peak(&self) -> Option<Cell> {
        let mut best: Option<(Cell, f64)> = None;
        for (x, row) in self.cells.iter().enumerate() {
            for (y, &phase) in row.iter().enumerate() {
                if best.is_none_or(|(_, p)| phase > p) {
                    best = Some((Cell { x, y }, phase));
                }
            }
        }
        best.map(|(cell, _)| cell)
    }
}

/// Grid state: an optional target and the last scan.
#[derive(Debug, Clone, Default)]
pub struct SensingGrid {
    target: Option<Cell>,
    scan: Option<PhaseMap>,
}

impl SensingGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the anomaly, discarding any previous scan.
    pub fn place_target(&mut self, x: usize, y: usize) -> CoreResult<()> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(CoreError::OutOfGrid {
                x,
                y,
                size: GRID_SIZE,
            });
        }
        self.target = Some(Cell { x, y });
        self.scan = None;
        Ok(())
    }

    /// Current target.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Last scan result.
    pub fn scan_result(&self) -> Option<&PhaseMap> {
        self.scan.as_ref()
    }

    /// Scan the grid. Without a target this does nothing and returns `None`.
    pub fn scan(&mut self) -> Option<&PhaseMap> {
        let target = self.target?;
        let cells = (0..GRID_SIZE)
            .map(|i| {
                (0..GRID_SIZE)
                    .map(|j| {
                        let dx = i as f64 - target.x as f64;
                        let dy = j as f64 - target.y as f64;
                        phase_shift(dx.hypot(dy))
                    })
                    .collect()
            })
            .collect();
        self.scan = Some(PhaseMap { cells });
        self.scan.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_without_target() {
        let mut grid = SensingGrid::new();
        assert!(grid.scan().is_none());
        assert!(grid.scan_result().is_none());
    }

    #[test]
    fn test_peak_at_target() {
        let mut grid = SensingGrid::new();
        grid.place_target(4, 11).unwrap();
        let map = grid.scan().unwrap();

        assert_eq!(map.get(4, 11), Some(PI));
        assert_eq!(map.peak(), Some(Cell { x: 4, y: 11 }));
        assert_eq!(map.rows().len(), GRID_SIZE);
        assert!(map.get(GRID_SIZE, 0).is_none());
    }

    #[test]
    fn test_decay() {
        assert!((phase_shift(5.0) - PI / std::f64::consts::E).abs() < 1e-12);
        assert!(phase_shift(10.0) < phase_shift(3.0));
    }

    #[test]
    fn test_moving_target_clears_scan() {
        let mut grid = SensingGrid::new();
        grid.place_target(0, 0).unwrap();
        grid.scan();
        assert!(grid.scan_result().is_some());

        grid.place_target(1, 1).unwrap();
        assert!(grid.scan_result().is_none());
        assert_eq!(grid.target(), Some(Cell { x: 1, y: 1 }));
    }

    #[test]
    fn test_out_of_grid() {
        let mut grid = SensingGrid::new();
        assert!(matches!(
            grid.place_target(20, 0),
            Err(CoreError::OutOfGrid { size: 20, .. })
        ));
        assert!(grid.target().is_none());
    }

    #[test]
    fn test_lightness() {
        assert_eq!(lightness(0.0), 100.0);
        assert_eq!(lightness(PI), 50.0);
    }
}
