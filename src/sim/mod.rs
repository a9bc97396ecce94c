//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod controller;
pub mod state;
pub mod tick;

pub use clock::FixedTimestep;
pub use collision::{bounce_off_paddle, bounce_off_walls};
pub use controller::{MatchController, MatchEvent};
pub use state::{Ball, MatchPhase, MatchState, Paddle, Player, Score};
pub use tick::{ScoreEvent, TickInput, step};
