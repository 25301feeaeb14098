//! Interactive simulation session.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use qpe_core::{MockRunGenerator, RunGenerator, SimulationParameters, model};

use crate::animation::{self, AnimationFrame};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::state::{RunId, RunState, SessionEvent, SessionSnapshot, SessionState, ToggleOutcome};

/// Handles of the periodic tasks of a run (step cursor and animations).
type TaskList = Arc<Mutex<Vec<JoinHandle<()>>>>;

/// One interactive session: parameters, run state and the last results.
///
/// The session is an explicit context object; every user action is a method
/// on it. A run is a set of spawned tasks (deferred completion, step cursor,
/// animations). Pausing or resetting aborts all of them and clears the
/// current [`RunId`], so a completion that slipped past the abort still
/// discards itself. Completion aborts the periodic tasks of its run.
pub struct SimulationSession {
    config: SessionConfig,
    generator: Arc<dyn RunGenerator>,
    state: Arc<RwLock<SessionState>>,
    events: Arc<watch::Sender<SessionEvent>>,
    completion: Mutex<Option<JoinHandle<()>>>,
    tasks: TaskList,
}

impl SimulationSession {
    /// Create a session backed by the mock generator.
    ///
    /// Fails when `config` does not pass [`SessionConfig::validate`].
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        let generator = match config.seed {
            Some(seed) => MockRunGenerator::with_seed(seed),
            None => MockRunGenerator::new(),
        };
        Self::with_generator(config, Arc::new(generator))
    }

    /// Create a session backed by a custom generator.
    pub fn with_generator(
        config: SessionConfig,
        generator: Arc<dyn RunGenerator>,
    ) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, generator))
    }

    fn from_parts(config: SessionConfig, generator: Arc<dyn RunGenerator>) -> Self {
        let (events, _) = watch::channel(SessionEvent::Ready);
        Self {
            config,
            generator,
            state: Arc::new(RwLock::new(SessionState::default())),
            events: Arc::new(events),
            completion: Mutex::new(None),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Name of the generator producing results.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Receive session events.
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    /// Change epsilon. Re-derives the ancilla count and refreshes the
    /// displayed circuit depth of the current results.
    pub async fn set_epsilon(&self, epsilon: f64) -> SessionResult<()> {
        let mut state = self.state.write().await;
        state.params.set_epsilon(epsilon)?;
        state.results.circuit_depth = model::circuit_depth(state.params.epsilon());
        debug!(
            "epsilon = {}, ancillas = {}",
            state.params.epsilon(),
            state.params.ancilla_qubits()
        );
        drop(state);
        self.events.send_replace(SessionEvent::ParametersChanged);
        Ok(())
    }

    /// Override the ancilla count without touching epsilon.
    pub async fn set_ancilla_qubits(&self, ancilla_qubits: u32) {
        let mut state = self.state.write().await;
        state.params.set_ancilla_qubits(ancilla_qubits);
        if !state.params.ancillas_match_epsilon() {
            debug!(
                "ancilla override {} differs from derived {}",
                state.params.ancilla_qubits(),
                model::displayed_ancillas(state.params.epsilon())
            );
        }
        drop(state);
        self.events.send_replace(SessionEvent::ParametersChanged);
    }

    /// Change the display-only noise level.
    pub async fn set_noise_level(&self, noise_level: f64) -> SessionResult<()> {
        self.state.write().await.params.set_noise_level(noise_level)?;
        self.events.send_replace(SessionEvent::ParametersChanged);
        Ok(())
    }

    /// Replace all parameters at once.
    pub async fn set_parameters(&self, params: SimulationParameters) {
        self.state.write().await.params = params;
        self.events.send_replace(SessionEvent::ParametersChanged);
    }

    /// Start a run when idle, pause it when running.
    #[instrument(skip(self))]
    pub async fn toggle(&self) -> ToggleOutcome {
        let mut state = self.state.write().await;

        if let (RunState::Running, Some(run_id)) = (state.run_state, state.run_id) {
            self.abort_tasks();
            state.run_state = RunState::Idle;
            state.run_id = None;
            drop(state);
            info!("Run {run_id} paused");
            self.events.send_replace(SessionEvent::Paused(run_id));
            return ToggleOutcome::Paused(run_id);
        }

        let run_id = RunId::new();
        let params = state.params.clone();
        state.run_state = RunState::Running;
        state.run_id = Some(run_id);
        state.current_step = 0;
        state.animation = AnimationFrame::default();
        state.started_at = Some(Utc::now());
        state.finished_at = None;

        // Spawned while the write lock is held, so a concurrent pause cannot
        // observe `Running` without the handles being registered.
        self.spawn_run(run_id, params.clone());
        drop(state);

        info!(
            "Run {run_id} started with epsilon = {}, {} ancilla qubits",
            params.epsilon(),
            params.ancilla_qubits()
        );
        self.events.send_replace(SessionEvent::Started(run_id));
        ToggleOutcome::Started(run_id)
    }

    /// Cancel any run and clear results. Always succeeds.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        self.abort_tasks();
        state.run_state = RunState::Idle;
        state.run_id = None;
        state.current_step = 0;
        state.results.clear();
        state.animation = AnimationFrame::default();
        state.started_at = None;
        state.finished_at = None;
        drop(state);
        info!("Session reset");
        self.events.send_replace(SessionEvent::Reset);
    }

    /// Wait until no run is in flight and return the state at that point.
    pub async fn wait_idle(&self) -> SessionResult<SessionSnapshot> {
        let mut rx = self.events.subscribe();
        loop {
            {
                let state = self.state.read().await;
                if !state.run_state.is_running() {
                    return Ok(state.snapshot());
                }
            }
            rx.changed().await.map_err(|_| SessionError::Closed)?;
        }
    }

    fn spawn_run(&self, run_id: RunId, params: SimulationParameters) {
        let classical_samples = model::classical_sample_count(params.epsilon());
        let preview_rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        let completion = self.spawn_completion(run_id, params);
        let handles = vec![
            self.spawn_step_cursor(run_id),
            animation::spawn_sampling(
                Arc::clone(&self.state),
                run_id,
                self.config.sampling_tick(),
                classical_samples,
                preview_rng,
            ),
            animation::spawn_qft(Arc::clone(&self.state), run_id, self.config.qft_tick()),
            animation::spawn_bloch(Arc::clone(&self.state), run_id, self.config.bloch_tick()),
        ];

        *self
            .completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(completion);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|handle| !handle.is_finished());
        tasks.extend(handles);
    }

    fn spawn_completion(&self, run_id: RunId, params: SimulationParameters) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let events = Arc::clone(&self.events);
        let generator = Arc::clone(&self.generator);
        let tasks = Arc::clone(&self.tasks);
        let latency = self.config.latency();
        let final_step = self.config.step_count;

        tokio::spawn(async move {
            sleep(latency).await;
            let outcome = generator.run(&params).await;

            let mut guard = state.write().await;
            if !guard.is_current(&run_id) {
                debug!("Discarding stale completion of run {run_id}");
                return;
            }
            guard.run_state = RunState::Idle;
            guard.run_id = None;
            guard.finished_at = Some(Utc::now());
            // Under the state lock, so a new run cannot register in between.
            abort_all(&tasks);

            let event = match outcome {
                Ok(results) => {
                    info!(
                        "Run {run_id} complete: accuracy {:.1}%",
                        results.accuracy * 100.0
                    );
                    guard.results = results;
                    guard.current_step = final_step;
                    SessionEvent::Completed(run_id)
                }
                Err(e) => {
                    warn!("Run {run_id} failed: {e}");
                    SessionEvent::Failed {
                        run_id,
                        reason: e.to_string(),
                    }
                }
            };
            drop(guard);
            events.send_replace(event);
        })
    }

    fn spawn_step_cursor(&self, run_id: RunId) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let events = Arc::clone(&self.events);
        let interval = self.config.step_interval();
        let final_step = self.config.step_count;

        tokio::spawn(async move {
            for step in 1..final_step {
                sleep(interval).await;
                let mut guard = state.write().await;
                if !guard.is_current(&run_id) {
                    return;
                }
                guard.current_step = step;
                drop(guard);
                events.send_replace(SessionEvent::StepAdvanced { run_id, step });
            }
        })
    }

    fn abort_tasks(&self) {
        let completion = self
            .completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = completion {
            handle.abort();
        }
        abort_all(&self.tasks);
    }

    #[cfg(test)]
    fn running_tasks(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

fn abort_all(tasks: &Mutex<Vec<JoinHandle<()>>>) {
    let mut tasks = tasks.lock().unwrap_or_else(PoisonError::into_inner);
    for handle in tasks.drain(..) {
        handle.abort();
    }
}

impl Default for SimulationSession {
    fn default() -> Self {
        let generator = Arc::new(MockRunGenerator::new());
        Self::from_parts(SessionConfig::default(), generator)
    }
}

impl Drop for SimulationSession {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
