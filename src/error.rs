//! Error types
//!
//! `SimError` signals misuse of the simulation (programming errors that should
//! fail fast in tests). `ConfigError` covers loading and validating a
//! [`MatchConfig`](crate::config::MatchConfig).

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::sim::MatchEvent;

/// Contract violations detected by the stepper or the controller
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// `dt` was below zero
    NegativeTimestep(f32),
    /// `dt` was NaN or infinite
    NonFiniteTimestep(f32),
    /// `dt` would let the ball travel further than the gap between paddle faces
    StepTooLarge { dt: f32, max_dt: f32 },
    /// The stepper was invoked on a match that already has a winner
    MatchFinished,
}

impl Display for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SimError::NegativeTimestep(dt) => write!(f, "negative timestep: {}", dt),
            SimError::NonFiniteTimestep(dt) => write!(f, "non-finite timestep: {}", dt),
            SimError::StepTooLarge { dt, max_dt } => write!(
                f,
                "timestep {} exceeds the bounded-displacement limit of {}",
                dt, max_dt
            ),
            SimError::MatchFinished => write!(f, "match is finished; call reset() first"),
        }
    }
}

impl Error for SimError {}

/// A tick failed partway through `MatchController::advance`.
///
/// `events` holds what the ticks before the failure emitted; listeners have
/// already seen exactly these.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceError {
    pub events: Vec<MatchEvent>,
    pub error: SimError,
}

impl Display for AdvanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (after {} events this frame)",
            self.error,
            self.events.len()
        )
    }
}

impl Error for AdvanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Failures while loading or validating a match configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    Io(io::Error),
    /// The config document is not valid JSON for `MatchConfig`
    Parse(serde_json::Error),
    /// The config parsed but describes an impossible match
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {}", err),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
