//! Match controller
//!
//! Owns the match state and input buffer, drives the stepper, and turns
//! score changes into [`MatchEvent`]s for the host (score display, win
//! announcement). A finished match stays finished until [`MatchController::reset`].

use serde::{Deserialize, Serialize};

use super::clock::FixedTimestep;
use super::state::{MatchPhase, MatchState, Player};
use super::tick::{TickInput, step};
use crate::config::MatchConfig;
use crate::error::{AdvanceError, ConfigError, SimError};
use crate::input::InputBuffer;

/// Observable outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    ScoreChanged { player: Player, new_score: u32 },
    MatchFinished { winner: Player },
}

type Listener = Box<dyn FnMut(&MatchEvent)>;

pub struct MatchController {
    config: MatchConfig,
    state: MatchState,
    input: InputBuffer,
    clock: FixedTimestep,
    listeners: Vec<Listener>,
}

impl MatchController {
    /// Start a match. The config is validated first; nothing downstream
    /// re-checks it.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MatchState::new(&config);
        let input = InputBuffer::new(config.bindings);
        log::info!(
            "Match started: {}x{} field, first to {}",
            config.playfield_width,
            config.playfield_height,
            config.win_threshold
        );
        Ok(Self {
            config,
            state,
            input,
            clock: FixedTimestep::default(),
            listeners: Vec::new(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Live read-only view of the state
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the state for renderers
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Where the host forwards key events
    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    /// Register a listener called for every event, in registration order
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&MatchEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run one fixed tick. No-op once the match is finished.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<MatchEvent>, SimError> {
        if self.state.is_finished() {
            return Ok(Vec::new());
        }

        let input = TickInput::sample(&self.input);
        let mut events = Vec::new();

        if let Some(scored) = step(&mut self.state, &input, dt)? {
            let player = scored.scorer();
            let new_score = self.state.score.get(player);
            events.push(MatchEvent::ScoreChanged { player, new_score });

            if new_score >= self.state.win_threshold {
                self.state.phase = MatchPhase::Finished { winner: player };
                log::info!(
                    "{:?} wins {} - {} after {} ticks",
                    player,
                    self.state.score.player1,
                    self.state.score.player2,
                    self.state.time_ticks
                );
                events.push(MatchEvent::MatchFinished { winner: player });
            }
        }

        self.notify(&events);
        Ok(events)
    }

    /// Feed a frame's elapsed time and run the ticks it pays for.
    ///
    /// Stops between ticks as soon as the match finishes. If a tick fails,
    /// the error carries the events of the ticks that ran before it and the
    /// rest of the frame's banked time is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> Result<Vec<MatchEvent>, AdvanceError> {
        let ticks = self.clock.advance(frame_dt);
        let dt = self.clock.dt();

        let mut events = Vec::new();
        for _ in 0..ticks {
            if self.state.is_finished() {
                self.clock.reset();
                break;
            }
            match self.tick(dt) {
                Ok(emitted) => events.extend(emitted),
                Err(error) => {
                    self.clock.reset();
                    log::error!("Tick {} failed: {}", self.state.time_ticks + 1, error);
                    return Err(AdvanceError { events, error });
                }
            }
        }
        Ok(events)
    }

    /// Start a fresh match with the same config
    pub fn reset(&mut self) {
        self.state = MatchState::new(&self.config);
        self.input.release_all();
        self.clock.reset();
        log::info!("Match reset");
    }

    fn notify(&mut self, events: &[MatchEvent]) {
        for event in events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::input::Key;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Park the ball just past the right edge so the next tick scores for player 1
    fn force_p1_point(controller: &mut MatchController) {
        controller.state.ball.pos = Vec2::new(599.9, 200.0);
        controller.state.ball.vel = Vec2::new(150.0, 0.0);
    }

    #[test]
    fn test_finishes_exactly_at_threshold() {
        let mut controller = MatchController::new(MatchConfig::default()).unwrap();

        for point in 1..=4 {
            force_p1_point(&mut controller);
            let events = controller.tick(SIM_DT).unwrap();
            assert_eq!(
                events,
                vec![MatchEvent::ScoreChanged {
                    player: Player::Player1,
                    new_score: point
                }]
            );
            assert_eq!(controller.phase(), MatchPhase::InProgress);
        }

        force_p1_point(&mut controller);
        let events = controller.tick(SIM_DT).unwrap();
        assert_eq!(
            events,
            vec![
                MatchEvent::ScoreChanged {
                    player: Player::Player1,
                    new_score: 5
                },
                MatchEvent::MatchFinished {
                    winner: Player::Player1
                },
            ]
        );
        assert_eq!(
            controller.phase(),
            MatchPhase::Finished {
                winner: Player::Player1
            }
        );
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut controller = MatchController::new(MatchConfig {
            win_threshold: 1,
            ..Default::default()
        })
        .unwrap();
        force_p1_point(&mut controller);
        controller.tick(SIM_DT).unwrap();
        assert!(controller.state().is_finished());

        let frozen = controller.snapshot();
        for _ in 0..10 {
            assert!(controller.tick(SIM_DT).unwrap().is_empty());
        }
        assert!(controller.advance(1.0).unwrap().is_empty());
        assert_eq!(controller.snapshot(), frozen);
    }

    #[test]
    fn test_reset_restores_start_state() {
        let config = MatchConfig {
            win_threshold: 2,
            seed: 77,
            ..Default::default()
        };
        let mut controller = MatchController::new(config.clone()).unwrap();
        controller.input_mut().on_key_down(Key::ArrowDown);
        for _ in 0..50 {
            controller.tick(SIM_DT).unwrap();
        }
        force_p1_point(&mut controller);
        controller.tick(SIM_DT).unwrap();
        force_p1_point(&mut controller);
        controller.tick(SIM_DT).unwrap();
        assert!(controller.state().is_finished());

        controller.reset();
        assert_eq!(controller.state(), &MatchState::new(&config));
        assert!(!controller.input().is_held(Key::ArrowDown));
        assert_eq!(controller.phase(), MatchPhase::InProgress);
    }

    #[test]
    fn test_input_sampled_each_tick() {
        let mut controller = MatchController::new(MatchConfig::default()).unwrap();
        let start = controller.state().left_paddle.center_y;

        controller.input_mut().on_key_down_named("ArrowUp");
        controller.tick(SIM_DT).unwrap();
        let moved = controller.state().left_paddle.center_y;
        assert!(moved < start);

        controller.input_mut().on_key_up_named("ArrowUp");
        controller.tick(SIM_DT).unwrap();
        assert_eq!(controller.state().left_paddle.center_y, moved);
        assert_eq!(controller.state().right_paddle.center_y, start);
    }

    #[test]
    fn test_listeners_receive_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut controller = MatchController::new(MatchConfig {
            win_threshold: 1,
            ..Default::default()
        })
        .unwrap();
        let sink = Rc::clone(&seen);
        controller.subscribe(move |event| sink.borrow_mut().push(*event));

        force_p1_point(&mut controller);
        let events = controller.tick(SIM_DT).unwrap();
        assert_eq!(*seen.borrow(), events);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_errors_propagate() {
        let mut controller = MatchController::new(MatchConfig::default()).unwrap();
        assert_eq!(
            controller.tick(-1.0),
            Err(SimError::NegativeTimestep(-1.0))
        );
        assert_eq!(controller.state().time_ticks, 0);
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut controller = MatchController::new(MatchConfig::default()).unwrap();
        controller.advance(0.035).unwrap();
        assert_eq!(controller.state().time_ticks, 3);
        controller.advance(0.007).unwrap();
        assert_eq!(controller.state().time_ticks, 4);
    }

    #[test]
    fn test_new_rejects_unplayable_config() {
        let oversized_paddle = MatchConfig {
            paddle_height: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            MatchController::new(oversized_paddle),
            Err(ConfigError::Invalid(_))
        ));

        let zero_threshold = MatchConfig {
            win_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            MatchController::new(zero_threshold),
            Err(ConfigError::Invalid(_))
        ));

        let nan_field = MatchConfig {
            playfield_height: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            MatchController::new(nan_field),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_threshold_one_finishes_on_first_point() {
        let mut controller = MatchController::new(MatchConfig {
            win_threshold: 1,
            ..Default::default()
        })
        .unwrap();
        for _ in 0..100 {
            controller.tick(SIM_DT).unwrap();
        }
        assert_eq!(controller.phase(), MatchPhase::InProgress);
        force_p1_point(&mut controller);
        controller.tick(SIM_DT).unwrap();
        assert_eq!(controller.state().winner(), Some(Player::Player1));
    }

    #[test]
    fn test_advance_failure_returns_events_listeners_saw() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut controller = MatchController::new(MatchConfig::default()).unwrap();
        let sink = Rc::clone(&seen);
        controller.subscribe(move |event| sink.borrow_mut().push(*event));

        // Faster than one tick can cover between the paddle faces
        controller.state.ball.vel = Vec2::new(1.0e6, 0.0);
        let err = controller.advance(0.035).unwrap_err();
        assert!(matches!(err.error, SimError::StepTooLarge { .. }));
        assert_eq!(err.events, *seen.borrow());
        assert_eq!(controller.state().time_ticks, 0);
        assert_eq!(controller.clock.pending(), 0.0);

        // The host can recover and keep going
        controller.state.ball.vel = Vec2::new(150.0, 0.0);
        force_p1_point(&mut controller);
        let events = controller.advance(0.015).unwrap();
        assert_eq!(events, *seen.borrow());
        assert_eq!(
            events,
            vec![MatchEvent::ScoreChanged {
                player: Player::Player1,
                new_score: 1
            }]
        );
    }
}
