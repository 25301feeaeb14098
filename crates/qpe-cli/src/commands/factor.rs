//! Factor command implementation.

use anyhow::Result;
use console::style;
use tracing::debug;

use qpe_core::factor_str;

/// Execute the factor command.
pub fn execute(number: &str) -> Result<()> {
    let factorization = factor_str(number)?;
    debug!(input = number, factors = ?factorization.factors(), "Factored");

    println!(
        "{} Factoring {} with Shor's algorithm (simulated)",
        style("→").cyan().bold(),
        style(number.trim()).green()
    );

    let factors = factorization
        .factors()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    println!("\n  Factors: [{}]", style(factors).yellow().bold());
    println!("  {factorization}");
    Ok(())
}
