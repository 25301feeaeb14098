//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use qpe_core::{DerivedQuantities, ResultsAnalysis, SimulationParameters, SimulationResults};
use qpe_session::SessionConfig;

/// Default config file location (`<config dir>/qpe/config.yaml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qpe").join("config.yaml"))
}

/// Load the session config from `path`, falling back to the default location
/// when it exists, then apply `QPE_*` environment overrides.
pub fn load_config(path: Option<&str>) -> Result<SessionConfig> {
    let file = match path {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path)
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    SessionConfig::load(file.as_deref())
        .with_context(|| match &file {
            Some(p) => format!("Failed to load config from {}", p.display()),
            None => "Invalid QPE_* environment override".to_string(),
        })
}

/// Build parameters from command-line values.
///
/// Without `--ancillas` the count follows epsilon.
pub fn build_parameters(
    epsilon: f64,
    ancillas: Option<u32>,
    noise: f64,
) -> Result<SimulationParameters> {
    let mut params = SimulationParameters::from_epsilon(epsilon)
        .map_err(|e| anyhow::anyhow!("Invalid epsilon: {e}"))?;
    if let Some(m) = ancillas {
        params.set_ancilla_qubits(m);
    }
    params
        .set_noise_level(noise)
        .map_err(|e| anyhow::anyhow!("Invalid noise level: {e}"))?;
    Ok(params)
}

/// Print the parameter panel with derived quantities.
pub fn print_parameters(params: &SimulationParameters) {
    let derived = DerivedQuantities::from_parameters(params);

    println!("{}", style("Parameters").bold().underlined());
    println!(
        "  Accuracy ε:       {}",
        style(format!("{:.2}", params.epsilon())).yellow()
    );
    println!(
        "  Ancilla qubits:   {}",
        style(params.ancilla_qubits()).yellow()
    );
    println!(
        "  Noise level:      {}",
        style(format!("{:.2}", params.noise_level())).yellow()
    );
    println!();
    println!("{}", style("Derived").bold().underlined());
    println!(
        "  Nsample:          {}",
        style(derived.classical_sample_count).cyan()
    );
    println!(
        "  Circuit depth:    {}",
        style(derived.circuit_depth).cyan()
    );
    println!(
        "  Phase resolution: {} (2^-{})",
        style(format!("{:.6}", derived.phase_resolution)).cyan(),
        params.ancilla_qubits()
    );
    println!(
        "  Basis states:     {}",
        style(derived.basis_state_count).cyan()
    );

    if !params.ancillas_match_epsilon() {
        println!(
            "  {} ancilla count overridden (ε suggests {})",
            style("!").yellow().bold(),
            derived.required_ancillas
        );
    }
}

/// Print the results panel for a finished run.
pub fn print_results(results: &SimulationResults, epsilon: f64) {
    let analysis = ResultsAnalysis::new(results, epsilon);

    println!(
        "\n{} Results (accuracy {:.1}%, depth {}):",
        style("✓").green().bold(),
        analysis.achieved_accuracy * 100.0,
        analysis.circuit_depth
    );

    println!("\n  {}", style("Phase estimates").bold());
    for row in &analysis.histogram {
        let bar_len = (row.percentage / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>3} ({:>5.1}%) φ≈{:.4} {}",
            style(row.phase.as_str()).cyan(),
            row.count,
            row.percentage,
            row.decimal_phase,
            style(bar).green()
        );
    }

    let samples: String = results
        .sampling_results
        .iter()
        .map(|b| b.as_char())
        .collect();
    println!("\n  {}", style("Classical samples").bold());
    println!(
        "  {}  ({} ones, {} zeros, ratio {:.2})",
        style(samples).dim(),
        analysis.sampling.ones,
        analysis.sampling.zeros,
        analysis.sampling.ratio
    );

    println!("\n  {}", style("Accuracy").bold());
    println!("  Target:   {:.1}%", analysis.target_accuracy * 100.0);
    println!("  Achieved: {:.1}%", analysis.achieved_accuracy * 100.0);
    println!("  Error:    {:.1}%", analysis.error_rate * 100.0);

    println!("\n  {}", style("Quantum advantage").bold());
    println!(
        "  Classical samples: {}",
        style(analysis.theoretical_samples).yellow()
    );
    println!(
        "  Circuit depth:     {}",
        style(analysis.circuit_depth).yellow()
    );
    if let Some(advantage) = analysis.quantum_advantage {
        println!(
            "  Advantage:         {}x ({:.1}% fewer operations)",
            style(format!("{advantage:.1}")).green().bold(),
            analysis.efficiency_gain
        );
    }
}
