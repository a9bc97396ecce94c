//! Match configuration
//!
//! Loaded from an optional JSON document; any field left out takes the
//! classic-game default.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::ConfigError;
use crate::input::KeyBindings;

/// Tunable parameters for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity the ball is served with at match start (px/s)
    pub serve_velocity: Vec2,

    // === Paddles ===
    /// Horizontal thickness; each paddle's face sits this far in from its edge
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Vertical paddle speed while a key is held (px/s)
    pub paddle_speed: f32,

    // === Scoring ===
    pub win_threshold: u32,

    /// Seed for serve direction randomization
    pub seed: u64,

    pub bindings: KeyBindings,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            playfield_width: 600.0,
            playfield_height: 400.0,

            ball_radius: 5.0,
            serve_velocity: Vec2::new(150.0, 150.0),

            paddle_width: 10.0,
            paddle_height: 80.0,
            paddle_speed: 300.0,

            win_threshold: 5,

            seed: 0,

            bindings: KeyBindings::default(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// x-plane of the left paddle's hitting face
    pub fn left_face_x(&self) -> f32 {
        self.paddle_width
    }

    /// x-plane of the right paddle's hitting face
    pub fn right_face_x(&self) -> f32 {
        self.playfield_width - self.paddle_width
    }

    /// Distance between the two paddle faces
    pub fn paddle_gap(&self) -> f32 {
        self.right_face_x() - self.left_face_x()
    }

    /// Reject configurations no match could be played with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.playfield_width,
            self.playfield_height,
            self.ball_radius,
            self.serve_velocity.x,
            self.serve_velocity.y,
            self.paddle_width,
            self.paddle_height,
            self.paddle_speed,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(invalid("all dimensions and speeds must be finite"));
        }
        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(invalid("playfield dimensions must be positive"));
        }
        if self.ball_radius <= 0.0 {
            return Err(invalid("ball radius must be positive"));
        }
        if self.paddle_width < 0.0 || self.paddle_height <= 0.0 {
            return Err(invalid("paddle dimensions must be positive"));
        }
        if self.paddle_height > self.playfield_height {
            return Err(invalid("paddle is taller than the playfield"));
        }
        if self.paddle_speed < 0.0 {
            return Err(invalid("paddle speed must not be negative"));
        }
        if 2.0 * self.ball_radius >= self.playfield_height {
            return Err(invalid("ball does not fit between the walls"));
        }
        if 2.0 * self.ball_radius >= self.paddle_gap() {
            return Err(invalid("ball does not fit between the paddle faces"));
        }
        if self.serve_velocity.x.abs() * SIM_DT >= self.paddle_gap() {
            return Err(invalid("serve crosses the court in a single tick"));
        }
        if self.win_threshold == 0 {
            return Err(invalid("win threshold must be at least 1"));
        }
        if !self.bindings.is_disjoint() {
            return Err(invalid("a key is bound to more than one action"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_string())
}
