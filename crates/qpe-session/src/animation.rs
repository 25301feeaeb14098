//! Cosmetic animations tied to a running run.
//!
//! [`AnimationFrame`] holds the pure animation state; the tasks spawned here
//! only drive its `tick_*` methods at fixed intervals. Each task stops on its
//! own as soon as its run is no longer current, and the session additionally
//! aborts it on pause, reset and completion.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use qpe_core::Bit;
use qpe_core::generator::draw_bits;

use crate::state::{RunId, SessionState};

/// Sampling progress per tick, percent.
pub const SAMPLING_INCREMENT: u8 = 10;

/// QFT progress per tick, percent.
pub const QFT_INCREMENT: u8 = 15;

/// Bloch rotation per tick, degrees.
pub const ROTATION_INCREMENT: u16 = 2;

/// Number of highlighted circuit stages the QFT animation cycles through.
pub const CIRCUIT_STAGES: u8 = 4;

/// Upper bound on the sampling preview length.
pub const PREVIEW_SAMPLES: u64 = 20;

/// Step at which the sampling animation starts.
pub const SAMPLING_STEP: u8 = 1;

/// Step at which the QFT animation starts.
pub const QFT_STEP: u8 = 2;

/// Current frame of every animation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Classical sampling progress, 0..=100.
    pub sampling_progress: u8,
    /// Coin flips shown once sampling reaches 100 %.
    pub sampling_preview: Vec<Bit>,
    /// QFT progress, 0..=100.
    pub qft_progress: u8,
    /// Highlighted circuit stage, 0..4.
    pub circuit_step: u8,
    /// Bloch sphere rotation, 0..360 degrees.
    pub bloch_rotation: u16,
}

impl AnimationFrame {
    /// Advance sampling progress. Returns `true` once it reaches 100 %.
    pub fn tick_sampling(&mut self) -> bool {
        self.sampling_progress = self
            .sampling_progress
            .saturating_add(SAMPLING_INCREMENT)
            .min(100);
        self.sampling_progress == 100
    }

    /// Advance QFT progress and cycle the circuit highlight. Returns `true`
    /// once progress reaches 100 %.
    pub fn tick_qft(&mut self) -> bool {
        self.qft_progress = self.qft_progress.saturating_add(QFT_INCREMENT).min(100);
        self.circuit_step = (self.circuit_step + 1) % CIRCUIT_STAGES;
        self.qft_progress == 100
    }

    /// Rotate the Bloch sphere.
    pub fn tick_bloch(&mut self) {
        self.bloch_rotation = (self.bloch_rotation + ROTATION_INCREMENT) % 360;
    }
}

/// Length of the sampling preview for a classical sample budget.
pub fn preview_len(classical_samples: u64) -> usize {
    PREVIEW_SAMPLES.min(classical_samples) as usize
}

/// Spawn a task calling `on_tick` every `period` (first call after one
/// period) while `run_id` is current, until it returns `Break`.
pub(crate) fn spawn_ticker<F>(
    state: Arc<RwLock<SessionState>>,
    run_id: RunId,
    period: Duration,
    mut on_tick: F,
) -> JoinHandle<()>
where
    F: FnMut(&mut SessionState) -> ControlFlow<()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            let mut guard = state.write().await;
            if !guard.is_current(&run_id) || on_tick(&mut *guard).is_break() {
                break;
            }
        }
    })
}

/// Sampling progress; fabricates the preview when it completes.
pub(crate) fn spawn_sampling(
    state: Arc<RwLock<SessionState>>,
    run_id: RunId,
    period: Duration,
    classical_samples: u64,
    mut rng: StdRng,
) -> JoinHandle<()> {
    spawn_ticker(state, run_id, period, move |s| {
        if s.current_step < SAMPLING_STEP {
            return ControlFlow::Continue(());
        }
        if s.animation.tick_sampling() {
            s.animation.sampling_preview = draw_bits(&mut rng, preview_len(classical_samples));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })
}

/// QFT progress and circuit highlight cycling.
pub(crate) fn spawn_qft(
    state: Arc<RwLock<SessionState>>,
    run_id: RunId,
    period: Duration,
) -> JoinHandle<()> {
    spawn_ticker(state, run_id, period, |s| {
        if s.current_step < QFT_STEP {
            return ControlFlow::Continue(());
        }
        if s.animation.tick_qft() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
}

/// Bloch sphere rotation; runs for the whole run.
pub(crate) fn spawn_bloch(
    state: Arc<RwLock<SessionState>>,
    run_id: RunId,
    period: Duration,
) -> JoinHandle<()> {
    spawn_ticker(state, run_id, period, |s| {
        s.animation.tick_bloch();
        ControlFlow::Continue(())
    })
}
