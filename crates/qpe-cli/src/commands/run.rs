//! Run command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use qpe_core::ResultsAnalysis;
use qpe_session::{SessionConfig, SessionEvent, SessionSnapshot, SimulationSession};

use super::common::{build_parameters, print_parameters, print_results};

/// Stage labels shown next to the step cursor.
const STAGES: [&str; 5] = [
    "Preparing ancillas",
    "Sampling",
    "Controlled unitaries",
    "Inverse QFT",
    "Measuring",
];

/// JSON output of a run.
#[derive(Serialize)]
struct RunReport {
    snapshot: SessionSnapshot,
    analysis: Option<ResultsAnalysis>,
}

/// Execute the run command.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    mut config: SessionConfig,
    epsilon: f64,
    ancillas: Option<u32>,
    noise: f64,
    seed: Option<u64>,
    pause_after_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let params = build_parameters(epsilon, ancillas, noise)?;
    if seed.is_some() {
        config.seed = seed;
    }
    let step_count = config.step_count;

    let session = SimulationSession::new(config)?;
    session.set_parameters(params.clone()).await;
    info!(generator = session.generator_name(), "Session ready");

    if !json {
        print_parameters(&params);
        println!();
        println!(
            "{} Running phase estimation ({} ancillas, ε = {:.2})",
            style("→").cyan().bold(),
            style(params.ancilla_qubits()).yellow(),
            params.epsilon()
        );
    }

    let progress = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(u64::from(step_count))
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| anyhow::anyhow!("Invalid progress template: {e}"))?
            .progress_chars("█▓░"),
    );
    progress.set_message(STAGES[0]);
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut rx = session.subscribe();
    session.toggle().await;

    let pause = async {
        match pause_after_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(pause);
    let mut pause_fired = false;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    anyhow::bail!("Session closed unexpectedly");
                }
                let event = rx.borrow_and_update().clone();
                debug!(?event, "Session event");
                match event {
                    SessionEvent::StepAdvanced { step, .. } => {
                        progress.set_position(u64::from(step));
                        if let Some(stage) = STAGES.get(usize::from(step)) {
                            progress.set_message(*stage);
                        }
                    }
                    SessionEvent::Completed(_) => {
                        progress.set_position(u64::from(step_count));
                        progress.finish_and_clear();
                        break;
                    }
                    SessionEvent::Failed { reason, .. } => {
                        progress.abandon();
                        anyhow::bail!("Run failed: {reason}");
                    }
                    SessionEvent::Paused(_) => {
                        progress.abandon_with_message("paused");
                        break;
                    }
                    _ => {}
                }
            }
            () = &mut pause, if !pause_fired => {
                pause_fired = true;
                if session.snapshot().await.run_state.is_running() {
                    session.toggle().await;
                }
            }
        }
    }

    let snapshot = session.snapshot().await;

    if json {
        let analysis = (!snapshot.results.is_empty())
            .then(|| ResultsAnalysis::new(&snapshot.results, snapshot.parameters.epsilon()));
        let report = RunReport { snapshot, analysis };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if snapshot.results.is_empty() {
        println!(
            "\n{} Run paused at step {} of {}; timers cancelled, no results",
            style("‖").yellow().bold(),
            snapshot.current_step,
            step_count
        );
    } else {
        print_results(&snapshot.results, snapshot.parameters.epsilon());
    }

    Ok(())
}
