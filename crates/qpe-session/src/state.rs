//! Session state types.
//!
//! The run state machine:
//!
//! ```text
//!            toggle()                 latency elapsed
//!   Idle ───────────────→ Running ───────────────────→ Idle (step = 5, results replaced)
//!    ↑                      │
//!    └──── toggle() ────────┤  pause: results untouched
//!    └──── reset()  ────────┘  reset: results cleared, step = 0
//! ```
//!
//! Every run is tagged with a [`RunId`]. Leaving `Running` by any path clears
//! the current id, so work scheduled for an earlier run can recognise itself
//! as stale.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qpe_core::{DerivedQuantities, SimulationParameters, SimulationResults};

use crate::animation::AnimationFrame;

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a fresh run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
        }
    }
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new run was scheduled.
    Started(RunId),
    /// The running run was paused and its pending work cancelled.
    Paused(RunId),
}

/// Notifications published to renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Initial value of the channel.
    Ready,
    ParametersChanged,
    Started(RunId),
    StepAdvanced { run_id: RunId, step: u8 },
    Paused(RunId),
    Completed(RunId),
    Failed { run_id: RunId, reason: String },
    Reset,
}

/// Point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub parameters: SimulationParameters,
    pub derived: DerivedQuantities,
    pub run_state: RunState,
    pub current_step: u8,
    pub results: SimulationResults,
    pub animation: AnimationFrame,
    pub run_id: Option<RunId>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Mutable state owned by one session.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub params: SimulationParameters,
    pub run_state: RunState,
    pub current_step: u8,
    pub results: SimulationResults,
    pub animation: AnimationFrame,
    pub run_id: Option<RunId>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Whether `run_id` is the run currently in flight.
    pub fn is_current(&self, run_id: &RunId) -> bool {
        self.run_id.as_ref() == Some(run_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            parameters: self.params.clone(),
            derived: DerivedQuantities::from_parameters(&self.params),
            run_state: self.run_state,
            current_step: self.current_step,
            results: self.results.clone(),
            animation: self.animation.clone(),
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}
