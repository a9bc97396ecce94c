//! Match state and core simulation types
//!
//! Everything the stepper reads or writes lives in [`MatchState`], including
//! the RNG, so a cloned state replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::input::PaddleId;

/// One of the two competitors; player 1 defends the left side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    InProgress,
    /// Terminal until the controller is reset
    Finished { winner: Player },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Left-most point of the ball
    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.pos.x - self.radius
    }

    /// Right-most point of the ball
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A vertical paddle; `x` is the plane of its hitting face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub center_y: f32,
    pub half_height: f32,
}

impl Paddle {
    #[inline]
    pub fn top(&self) -> f32 {
        self.center_y - self.half_height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center_y + self.half_height
    }

    /// Inclusive vertical coverage test; a ball exactly on an end is covered
    #[inline]
    pub fn covers(&self, y: f32) -> bool {
        y >= self.top() && y <= self.bottom()
    }

    /// Move vertically, stopping hard at the walls
    pub fn move_by(&mut self, dy: f32, playfield_height: f32) {
        self.center_y =
            (self.center_y + dy).clamp(self.half_height, playfield_height - self.half_height);
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Player1 => self.player1,
            Player::Player2 => self.player2,
        }
    }

    /// Add a point and return the new total
    pub fn increment(&mut self, player: Player) -> u32 {
        let points = match player {
            Player::Player1 => &mut self.player1,
            Player::Player2 => &mut self.player2,
        };
        *points += 1;
        *points
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Paddle speed while a key is held (px/s)
    pub paddle_speed: f32,
    pub win_threshold: u32,
    pub phase: MatchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Serve direction RNG
    rng: Pcg32,
}

impl MatchState {
    /// Canonical start state for a config: ball and paddles centered, scores zero
    pub fn new(config: &MatchConfig) -> Self {
        let center_y = config.playfield_height / 2.0;
        let half_height = config.paddle_height / 2.0;
        Self {
            ball: Ball {
                pos: Vec2::new(config.playfield_width / 2.0, center_y),
                vel: config.serve_velocity,
                radius: config.ball_radius,
            },
            left_paddle: Paddle {
                x: config.left_face_x(),
                center_y,
                half_height,
            },
            right_paddle: Paddle {
                x: config.right_face_x(),
                center_y,
                half_height,
            },
            score: Score::default(),
            playfield_width: config.playfield_width,
            playfield_height: config.playfield_height,
            paddle_speed: config.paddle_speed,
            win_threshold: config.win_threshold,
            phase: MatchPhase::InProgress,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.playfield_width / 2.0, self.playfield_height / 2.0)
    }

    pub fn paddle(&self, id: PaddleId) -> &Paddle {
        match id {
            PaddleId::Left => &self.left_paddle,
            PaddleId::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, id: PaddleId) -> &mut Paddle {
        match id {
            PaddleId::Left => &mut self.left_paddle,
            PaddleId::Right => &mut self.right_paddle,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            MatchPhase::Finished { winner } => Some(winner),
            MatchPhase::InProgress => None,
        }
    }

    /// Largest `dt` for which the ball cannot cross from one paddle face to the other
    pub fn max_step_dt(&self) -> f32 {
        let gap = self.right_paddle.x - self.left_paddle.x;
        let speed_x = self.ball.vel.x.abs();
        if speed_x == 0.0 {
            f32::INFINITY
        } else {
            gap / speed_x
        }
    }

    /// Put the ball back in the center after a point.
    ///
    /// Horizontal direction flips, vertical sign is random, speed is kept.
    pub fn serve_from_center(&mut self) {
        let flip_y = self.rng.random_bool(0.5);
        let vy = if flip_y {
            -self.ball.vel.y
        } else {
            self.ball.vel.y
        };
        self.ball.pos = self.center();
        self.ball.vel = Vec2::new(-self.ball.vel.x, vy);
        log::debug!(
            "Serve from center at tick {}: vel=({}, {})",
            self.time_ticks,
            self.ball.vel.x,
            self.ball.vel.y
        );
    }
}
