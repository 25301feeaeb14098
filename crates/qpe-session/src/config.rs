//! Session configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QPE_` prefix)
//!
//! Precedence (highest to lowest): environment, file, defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Timing and seeding of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between starting a run and its completion.
    pub latency_ms: u64,

    /// Sampling progress tick (+10 % per tick).
    pub sampling_tick_ms: u64,

    /// QFT progress tick (+15 % per tick).
    pub qft_tick_ms: u64,

    /// Bloch rotation tick (+2° per tick).
    pub bloch_tick_ms: u64,

    /// Step reached on completion; the cursor visits `0..step_count` while
    /// running.
    pub step_count: u8,

    /// Seed for the mock generator and animation previews.
    pub seed: Option<u64>,

    /// Tracing filter override (e.g. "debug", "qpe_session=trace").
    pub log_level: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            latency_ms: 3000,
            sampling_tick_ms: 200,
            qft_tick_ms: 300,
            bloch_tick_ms: 50,
            step_count: 5,
            seed: None,
            log_level: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: SessionConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration: file (if given), then environment overrides.
    pub fn load(config_file: Option<&Path>) -> SessionResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QPE_*` overrides read through `lookup`.
    ///
    /// Only variables that are present override; malformed numbers are an
    /// error rather than silently ignored.
    pub fn merge_env<F>(mut self, lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_u64 = |key: &str| -> SessionResult<Option<u64>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse()
                        .map_err(|_| SessionError::Config(format!("{key}: invalid integer '{v}'")))
                })
                .transpose()
        };

        if let Some(v) = parse_u64("QPE_LATENCY_MS")? {
            self.latency_ms = v;
        }
        if let Some(v) = parse_u64("QPE_SAMPLING_TICK_MS")? {
            self.sampling_tick_ms = v;
        }
        if let Some(v) = parse_u64("QPE_QFT_TICK_MS")? {
            self.qft_tick_ms = v;
        }
        if let Some(v) = parse_u64("QPE_BLOCH_TICK_MS")? {
            self.bloch_tick_ms = v;
        }
        if let Some(v) = parse_u64("QPE_SEED")? {
            self.seed = Some(v);
        }
        if let Some(level) = lookup("QPE_LOG_LEVEL") {
            self.log_level = Some(level);
        }
        Ok(self)
    }

    /// Reject configurations that would stall or spin.
    pub fn validate(&self) -> SessionResult<()> {
        let intervals = [
            ("latency_ms", self.latency_ms),
            ("sampling_tick_ms", self.sampling_tick_ms),
            ("qft_tick_ms", self.qft_tick_ms),
            ("bloch_tick_ms", self.bloch_tick_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(SessionError::Config(format!("{name} must be positive")));
            }
        }
        if self.step_count == 0 {
            return Err(SessionError::Config(
                "step_count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Time between step cursor advances.
    pub fn step_interval(&self) -> Duration {
        self.latency() / u32::from(self.step_count)
    }

    pub fn sampling_tick(&self) -> Duration {
        Duration::from_millis(self.sampling_tick_ms)
    }

    pub fn qft_tick(&self) -> Duration {
        Duration::from_millis(self.qft_tick_ms)
    }

    pub fn bloch_tick(&self) -> Duration {
        Duration::from_millis(self.bloch_tick_ms)
    }
}
