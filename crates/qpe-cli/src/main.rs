//! QPE teaching simulator command-line interface
//!
//! ```text
//!   ┌───┐     ┌──────┐     ┌──────┐     ┌───┐
//!   │ H ├──●──┤      ├─────┤ QFT† ├─────┤ M ├
//!   └───┘  │  │      │     └──────┘     └───┘
//!        ┌─┴─┐
//!   |ψ⟩──┤ U ├───────────────────────────────
//!        └───┘
//! ```
//!
//! Derived quantities, mock runs and the side demos, from a terminal.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{bloch, common, factor, params, run, sense, version};

/// QPE simulator - quantum phase estimation versus classical sampling
#[derive(Parser)]
#[command(name = "qpe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Session configuration file (YAML)
    #[arg(short, long, global = true, env = "QPE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the quantities derived from an accuracy parameter
    Params {
        /// Accuracy parameter ε (0.01 - 0.5)
        #[arg(short, long, default_value = "0.1")]
        epsilon: f64,

        /// Override the derived ancilla count (3 - 8)
        #[arg(short, long)]
        ancillas: Option<u32>,

        /// Depolarizing noise level (0 - 0.2)
        #[arg(short, long, default_value = "0")]
        noise: f64,
    },

    /// Run a mock phase estimation and show the results
    Run {
        /// Accuracy parameter ε (0.01 - 0.5)
        #[arg(short, long, default_value = "0.1")]
        epsilon: f64,

        /// Override the derived ancilla count (3 - 8)
        #[arg(short, long)]
        ancillas: Option<u32>,

        /// Depolarizing noise level (0 - 0.2)
        #[arg(short, long, default_value = "0")]
        noise: f64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Pause the run after this many milliseconds
        #[arg(long)]
        pause_after_ms: Option<u64>,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Factor an integer (simulated Shor's algorithm)
    Factor {
        /// Number to factor
        #[arg(allow_hyphen_values = true)]
        number: String,
    },

    /// Scan the magnetic anomaly sensing grid
    Sense {
        /// Target column (0 - 19)
        #[arg(short, long)]
        x: usize,

        /// Target row (0 - 19)
        #[arg(short, long)]
        y: usize,
    },

    /// Show Bloch sphere coordinates for a phase
    Bloch {
        /// Phase as a fraction of a full turn
        #[arg(short, long, default_value = "0")]
        phase: f64,

        /// State amplitude (cos θ)
        #[arg(short, long, default_value = "1")]
        amplitude: f64,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match common::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = config.log_level.clone().unwrap_or_else(|| {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Params {
            epsilon,
            ancillas,
            noise,
        } => params::execute(epsilon, ancillas, noise),

        Commands::Run {
            epsilon,
            ancillas,
            noise,
            seed,
            pause_after_ms,
            json,
        } => run::execute(config, epsilon, ancillas, noise, seed, pause_after_ms, json).await,

        Commands::Factor { number } => factor::execute(&number),

        Commands::Sense { x, y } => sense::execute(x, y),

        Commands::Bloch { phase, amplitude } => bloch::execute(phase, amplitude),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
