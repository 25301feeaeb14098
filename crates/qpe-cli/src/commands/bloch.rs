//! Bloch command implementation.

use anyhow::Result;
use console::style;

use qpe_core::BlochVector;

/// Execute the bloch command.
pub fn execute(phase: f64, amplitude: f64) -> Result<()> {
    if !phase.is_finite() || !amplitude.is_finite() {
        anyhow::bail!("Phase and amplitude must be finite numbers");
    }

    let vector = BlochVector::from_phase(phase, amplitude);
    let (sx, sy) = vector.screen_position();

    println!(
        "{} Bloch vector for φ = {}",
        style("→").cyan().bold(),
        style(format!("{phase:.4}")).green()
    );
    println!();
    println!("  x: {:>8.4}", vector.x);
    println!("  y: {:>8.4}", vector.y);
    println!("  z: {:>8.4}", vector.z);
    println!();
    println!(
        "  Projection (100×100 view): ({}, {})",
        style(format!("{sx:.1}")).yellow(),
        style(format!("{sy:.1}")).yellow()
    );
    Ok(())
}
