//! Keyboard input to paddle intents
//!
//! The host forwards raw key-down/key-up events; the buffer keeps the set of
//! held movement keys and derives one [`InputIntent`] per paddle on demand.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical key the simulation can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Letter or digit key, stored uppercase
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` style name (`"ArrowUp"`, `"w"`, `"W"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => return Some(Key::ArrowUp),
            "ArrowDown" | "Down" => return Some(Key::ArrowDown),
            "ArrowLeft" | "Left" => return Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => return Some(Key::ArrowRight),
            _ => {}
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Some(Key::Char(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode` (38 = up, 87 = W, ...)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::ArrowLeft),
            38 => Some(Key::ArrowUp),
            39 => Some(Key::ArrowRight),
            40 => Some(Key::ArrowDown),
            48..=57 | 65..=90 => char::from_u32(code).map(Key::Char),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Key::ArrowUp => "ArrowUp".to_string(),
            Key::ArrowDown => "ArrowDown".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::from_name(&value).ok_or_else(|| format!("unknown key name: {:?}", value))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

/// Which paddle an intent or binding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleId {
    Left,
    Right,
}

impl PaddleId {
    pub const ALL: [PaddleId; 2] = [PaddleId::Left, PaddleId::Right];
}

/// Desired vertical movement for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

/// Desired movement of one paddle, sampled at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputIntent {
    pub paddle: PaddleId,
    pub direction: Direction,
}

/// Up/down keys for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleKeys {
    pub up: Key,
    pub down: Key,
}

/// Key bindings for both paddles
///
/// Defaults follow the classic layout of this game: arrows move the left
/// paddle (player 1), W/S move the right paddle (player 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: PaddleKeys,
    pub right: PaddleKeys,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: PaddleKeys {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
            },
            right: PaddleKeys {
                up: Key::Char('W'),
                down: Key::Char('S'),
            },
        }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, paddle: PaddleId) -> &PaddleKeys {
        match paddle {
            PaddleId::Left => &self.left,
            PaddleId::Right => &self.right,
        }
    }

    /// True if no key is bound twice
    pub fn is_disjoint(&self) -> bool {
        let keys = [self.left.up, self.left.down, self.right.up, self.right.down];
        keys.iter()
            .enumerate()
            .all(|(i, k)| !keys[i + 1..].contains(k))
    }

    fn is_bound(&self, key: Key) -> bool {
        PaddleId::ALL.iter().any(|&p| {
            let keys = self.keys_for(p);
            keys.up == key || keys.down == key
        })
    }
}

/// Set of currently held movement keys
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    bindings: KeyBindings,
    held: HashSet<Key>,
}

impl InputBuffer {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Record a key press; unbound keys are ignored
    pub fn on_key_down(&mut self, key: Key) {
        if self.bindings.is_bound(key) {
            self.held.insert(key);
        }
    }

    /// Record a key release
    pub fn on_key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forward a raw key name; unrecognized names are dropped
    pub fn on_key_down_named(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.on_key_down(key);
        }
    }

    pub fn on_key_up_named(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.on_key_up(key);
        }
    }

    /// Forget every held key (focus loss, match reset)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Current intent for a paddle; both or neither key held means no movement
    pub fn intent_for(&self, paddle: PaddleId) -> InputIntent {
        let keys = self.bindings.keys_for(paddle);
        let direction = match (self.is_held(keys.up), self.is_held(keys.down)) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        };
        InputIntent { paddle, direction }
    }
}
