//! QPE teaching simulator session
//!
//! Runtime half of the simulator: the state of one interactive session and
//! everything that happens on a timer.
//!
//! - [`SimulationSession`] routes the user actions (change epsilon, change
//!   ancillas, change noise, run/pause, reset) and owns the state
//! - a run schedules its completion after [`SessionConfig::latency_ms`],
//!   advances a step cursor and drives the [`animation`] tasks
//! - pause and reset cancel all of it; stale completions are discarded by
//!   [`RunId`]
//!
//! # Example
//!
//! ```ignore
//! use qpe_session::{SessionConfig, SimulationSession};
//!
//! let session = SimulationSession::new(SessionConfig::default())?;
//! session.set_epsilon(0.05).await?;
//! session.toggle().await;
//!
//! let snapshot = session.wait_idle().await?;
//! println!("accuracy: {:.1}%", snapshot.results.accuracy * 100.0);
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod session;
pub mod state;

pub use animation::AnimationFrame;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::SimulationSession;
pub use state::{RunId, RunState, SessionEvent, SessionSnapshot, ToggleOutcome};
