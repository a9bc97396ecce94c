//! Fixed timestep simulation tick
//!
//! Advances a [`MatchState`] by exactly one step. Deterministic: the same
//! state, input and `dt` always produce the same result.

use serde::{Deserialize, Serialize};

use super::collision::{bounce_off_paddle, bounce_off_walls};
use super::state::{MatchState, Player};
use crate::error::SimError;
use crate::input::{Direction, InputBuffer, PaddleId};

/// Input commands for a single tick, sampled once before the step runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: Direction,
    pub right: Direction,
}

impl TickInput {
    /// Latch the current intents of both paddles
    pub fn sample(input: &InputBuffer) -> Self {
        Self {
            left: input.intent_for(PaddleId::Left).direction,
            right: input.intent_for(PaddleId::Right).direction,
        }
    }

    pub fn direction(&self, paddle: PaddleId) -> Direction {
        match paddle {
            PaddleId::Left => self.left,
            PaddleId::Right => self.right,
        }
    }
}

/// A point scored during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    P1Scored,
    P2Scored,
}

impl ScoreEvent {
    pub fn scorer(self) -> Player {
        match self {
            ScoreEvent::P1Scored => Player::Player1,
            ScoreEvent::P2Scored => Player::Player2,
        }
    }
}

/// Reject timesteps the stepper cannot honour
fn check_dt(state: &MatchState, dt: f32) -> Result<(), SimError> {
    if !dt.is_finite() {
        return Err(SimError::NonFiniteTimestep(dt));
    }
    if dt < 0.0 {
        return Err(SimError::NegativeTimestep(dt));
    }
    let max_dt = state.max_step_dt();
    if dt >= max_dt {
        return Err(SimError::StepTooLarge { dt, max_dt });
    }
    Ok(())
}

/// Advance the match by one fixed timestep
pub fn step(
    state: &mut MatchState,
    input: &TickInput,
    dt: f32,
) -> Result<Option<ScoreEvent>, SimError> {
    if state.is_finished() {
        return Err(SimError::MatchFinished);
    }
    check_dt(state, dt)?;

    state.time_ticks += 1;

    // Paddles: hard stop at the walls
    let height = state.playfield_height;
    let travel = state.paddle_speed * dt;
    for id in PaddleId::ALL {
        let dy = match input.direction(id) {
            Direction::Up => -travel,
            Direction::Down => travel,
            Direction::None => 0.0,
        };
        state.paddle_mut(id).move_by(dy, height);
    }

    // Ball: Euler integration
    let prev_x = state.ball.pos.x;
    state.ball.pos += state.ball.vel * dt;

    bounce_off_walls(&mut state.ball, height);

    // Left first; after a left hit the ball is heading away from the right face
    if !bounce_off_paddle(&mut state.ball, prev_x, &state.left_paddle, PaddleId::Left) {
        bounce_off_paddle(&mut state.ball, prev_x, &state.right_paddle, PaddleId::Right);
    }

    // Scoring: the ball's center left the playfield
    let event = if state.ball.pos.x < 0.0 {
        Some(ScoreEvent::P2Scored)
    } else if state.ball.pos.x > state.playfield_width {
        Some(ScoreEvent::P1Scored)
    } else {
        None
    };

    if let Some(event) = event {
        let scorer = event.scorer();
        state.score.increment(scorer);
        log::info!(
            "{:?} scored ({} - {})",
            scorer,
            state.score.player1,
            state.score.player2
        );
        state.serve_from_center();
    }

    Ok(event)
}
