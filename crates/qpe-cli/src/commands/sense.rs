//! Sense command implementation.

use anyhow::Result;
use console::style;
use tracing::debug;

use qpe_core::SensingGrid;
use qpe_core::sensing::lightness;

/// Shades from white (no shift) to dark (a full π shift).
const SHADES: [char; 6] = [' ', '░', '░', '▒', '▓', '█'];

/// Execute the sense command.
pub fn execute(x: usize, y: usize) -> Result<()> {
    let mut grid = SensingGrid::new();
    grid.place_target(x, y)?;

    println!(
        "{} Scanning for magnetic anomaly at ({}, {})",
        style("→").cyan().bold(),
        style(x).green(),
        style(y).green()
    );

    let Some(map) = grid.scan() else {
        anyhow::bail!("No target placed");
    };
    debug!(peak = ?map.peak(), "Scan complete");

    println!();
    let size = map.rows().len();
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| {
                if (col, row) == (x, y) {
                    return '◆';
                }
                let phase = map.get(col, row).unwrap_or(0.0);
                shade(lightness(phase))
            })
            .flat_map(|c| [c, c])
            .collect();
        println!("  {}", style(line).magenta());
    }

    if let Some(peak) = map.peak() {
        println!(
            "\n  Peak phase shift {} at ({}, {})",
            style(format!("{:.3} rad", map.get(peak.x, peak.y).unwrap_or(0.0))).yellow(),
            peak.x,
            peak.y
        );
    }
    Ok(())
}

/// Map a lightness in [50, 100] onto a shade character.
fn shade(lightness: f64) -> char {
    let darkness = ((100.0 - lightness) / 50.0).clamp(0.0, 1.0);
    let idx = (darkness * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[idx.min(SHADES.len() - 1)]
}
