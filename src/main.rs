//! Paddle Court entry point
//!
//! Headless demo: two autopilots play matches through the keyboard input path
//! while an ASCII renderer draws frames to stdout.
//!
//! Usage: `paddle-court [config.json] [--matches N] [--realtime] [--quiet]`

#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use std::process::ExitCode;
use std::time::Duration;

use paddle_court::autopilot::Autopilot;
use paddle_court::render::{AsciiRenderer, Renderer};
use paddle_court::{MatchConfig, MatchController, MatchEvent, PaddleId};

/// Host frame rate (independent of the 100 Hz simulation)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Print every Nth frame
const PRINT_EVERY: u64 = 30;
/// Give up on a match after this many frames (~30 minutes of play)
const MAX_FRAMES: u64 = 60 * 60 * 30;

struct Options {
    config_path: Option<String>,
    matches: u32,
    realtime: bool,
    quiet: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        matches: 1,
        realtime: false,
        quiet: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--matches" => {
                let value = args.next().ok_or("--matches needs a value")?;
                options.matches = value
                    .parse()
                    .map_err(|_| format!("invalid match count: {}", value))?;
            }
            "--realtime" => options.realtime = true,
            "--quiet" => options.quiet = true,
            other if other.starts_with("--") => return Err(format!("unknown flag: {}", other)),
            path => options.config_path = Some(path.to_string()),
        }
    }
    Ok(options)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Paddle Court (native) starting...");

    let options = match parse_args() {
        Ok(options) => options,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = match &options.config_path {
        Some(path) => match MatchConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => MatchConfig::default(),
    };
    let mut controller = match MatchController::new(config) {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    controller.subscribe(|event| {
        if let MatchEvent::ScoreChanged { player, new_score } = event {
            log::info!("Score display: {:?} -> {}", player, new_score);
        }
    });

    let pilots = [Autopilot::new(PaddleId::Left), Autopilot::new(PaddleId::Right)];
    let mut renderer = AsciiRenderer::default();

    for round in 1..=options.matches {
        let mut frame = 0u64;
        let winner = loop {
            if frame >= MAX_FRAMES {
                log::warn!("Match {} did not finish after {} frames", round, frame);
                break None;
            }
            frame += 1;

            let snapshot = controller.snapshot();
            for pilot in &pilots {
                pilot.drive(&snapshot, controller.input_mut());
            }

            let events = match controller.advance(FRAME_DT) {
                Ok(events) => events,
                Err(err) => {
                    log::error!("Simulation error: {}", err);
                    return ExitCode::FAILURE;
                }
            };

            renderer.render(&controller.snapshot());
            if !options.quiet && frame % PRINT_EVERY == 0 {
                println!("{}", renderer.frame());
            }
            if options.realtime {
                std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
            }

            let finished = events.iter().find_map(|event| match event {
                MatchEvent::MatchFinished { winner } => Some(*winner),
                _ => None,
            });
            if finished.is_some() {
                break finished;
            }
        };

        if !options.quiet {
            println!("{}", renderer.frame());
        }
        match winner {
            Some(winner) => println!("Match {}: {:?} wins!", round, winner),
            None => println!("Match {}: abandoned", round),
        }
        controller.reset();
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web; nothing to run here
}
