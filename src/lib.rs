//! Paddle Court - a two-paddle Pong simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state, controller)
//! - `input`: Key events to paddle intents
//! - `config`: Match configuration (JSON)
//! - `render`: Renderer collaborator trait and a text renderer
//! - `autopilot`: Ball-tracking driver for demos and soak tests

pub mod autopilot;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod sim;

pub use autopilot::Autopilot;
pub use config::MatchConfig;
pub use error::{AdvanceError, ConfigError, SimError};
pub use input::{Direction, InputBuffer, InputIntent, Key, KeyBindings, PaddleId};
pub use render::{AsciiRenderer, Renderer};
pub use sim::{MatchController, MatchEvent, MatchPhase, MatchState, Player};

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz, one tick per 10 ms)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will bank (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
