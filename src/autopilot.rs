//! Autopilot - drives a paddle by pressing its keys
//!
//! Plays through the same [`InputBuffer`] a human would, so demo and soak runs
//! exercise the whole input path. A slow oscillating aim error keeps rallies
//! from lasting forever.

use crate::input::{InputBuffer, PaddleId};
use crate::sim::MatchState;

#[derive(Debug, Clone)]
pub struct Autopilot {
    paddle: PaddleId,
    /// No movement while the target is this close to the paddle center (px)
    dead_zone: f32,
    /// Aim error amplitude as a multiple of the paddle's half height
    wobble: f32,
    /// Phase offset so two autopilots don't err in lockstep
    phase: f32,
}

impl Autopilot {
    pub fn new(paddle: PaddleId) -> Self {
        let phase = match paddle {
            PaddleId::Left => 0.0,
            PaddleId::Right => 2.1,
        };
        Self {
            paddle,
            dead_zone: 4.0,
            wobble: 4.0,
            phase,
        }
    }

    pub fn with_wobble(mut self, wobble: f32) -> Self {
        self.wobble = wobble;
        self
    }

    pub fn paddle(&self) -> PaddleId {
        self.paddle
    }

    /// Where the paddle center should head this tick
    pub fn target_y(&self, state: &MatchState) -> f32 {
        let ball = &state.ball;
        let incoming = match self.paddle {
            PaddleId::Left => ball.vel.x < 0.0,
            PaddleId::Right => ball.vel.x > 0.0,
        };
        if !incoming {
            return state.playfield_height / 2.0;
        }

        // Oscillating offset based on time to create variety
        let t = state.time_ticks as f32 * 0.01 + self.phase;
        let error = t.sin() * 0.3 + (t * 0.7).sin() * 0.15;
        ball.pos.y + error * self.wobble * state.paddle(self.paddle).half_height
    }

    /// Press or release this paddle's keys toward the target
    pub fn drive(&self, state: &MatchState, input: &mut InputBuffer) {
        let keys = *input.bindings().keys_for(self.paddle);
        let delta = self.target_y(state) - state.paddle(self.paddle).center_y;

        if delta < -self.dead_zone {
            input.on_key_up(keys.down);
            input.on_key_down(keys.up);
        } else if delta > self.dead_zone {
            input.on_key_up(keys.up);
            input.on_key_down(keys.down);
        } else {
            input.on_key_up(keys.up);
            input.on_key_up(keys.down);
        }
    }
}
