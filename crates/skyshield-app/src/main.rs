//! skyshield: headless SKYSHIELD runner.
//!
//! Usage:
//!   skyshield [config.json] [--ticks N] [--realtime] [--autopilot]
//!
//! Runs the simulation for N ticks and prints the final snapshot as JSON.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use log::{error, info};

use skyshield_app::audio::LogAudio;
use skyshield_app::game_loop;
use skyshield_app::input;
use skyshield_app::state::AppState;
use skyshield_core::commands::PlayerCommand;
use skyshield_core::config::SimConfig;
use skyshield_core::constants::TICK_RATE;
use skyshield_core::state::GameStateSnapshot;
use skyshield_sim::SimulationEngine;

const DEFAULT_TICKS: u64 = 60 * TICK_RATE as u64;
/// Autopilot fires every this many ticks.
const AUTOPILOT_INTERVAL: u64 = 20;

struct Args {
    config_path: Option<PathBuf>,
    ticks: u64,
    realtime: bool,
    autopilot: bool,
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => match SimConfig::from_json_file(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                eprintln!("Invalid config {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let snapshot = if args.realtime {
        run_realtime(config, &args)
    } else {
        Some(run_headless(config, &args))
    };

    match snapshot.map(|s| serde_json::to_string_pretty(&s)) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => {
            eprintln!("Failed to serialize snapshot: {e}");
            process::exit(1);
        }
        None => {
            eprintln!("No snapshot was produced");
            process::exit(1);
        }
    }
}

/// Step the engine as fast as possible.
fn run_headless(config: SimConfig, args: &Args) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(config).with_audio(Box::new(LogAudio::new()));
    let mut snapshot = engine.snapshot();

    for tick in 0..args.ticks {
        if args.autopilot && tick % AUTOPILOT_INTERVAL == 0 {
            if let Some(cmd) = autopilot_command(&snapshot) {
                engine.queue_command(cmd);
            }
        }
        snapshot = engine.tick();
        if snapshot.game_over {
            info!("Game over after {} ticks", snapshot.time.tick);
            break;
        }
    }

    info!(
        "Finished: score {}, {} bases and {} cities standing",
        snapshot.score,
        snapshot.bases_standing(),
        snapshot.cities_standing()
    );
    snapshot
}

/// Drive the fixed-rate game loop thread for roughly N ticks of wall time.
fn run_realtime(config: SimConfig, args: &Args) -> Option<GameStateSnapshot> {
    let state = AppState::new();
    let tick_duration = game_loop::scaled_tick_duration(config.time_scale);

    if let Err(e) = state.start(config, Box::new(LogAudio::new())) {
        eprintln!("Failed to start game loop: {e}");
        process::exit(1);
    }

    let poll = tick_duration * AUTOPILOT_INTERVAL as u32;
    let mut elapsed = Duration::ZERO;
    let budget = tick_duration * args.ticks.min(u32::MAX as u64) as u32;

    while elapsed < budget {
        std::thread::sleep(poll);
        elapsed += poll;

        let latest = state.snapshot().ok().flatten();
        if let Some(snap) = &latest {
            if snap.game_over {
                break;
            }
            if args.autopilot {
                if let Some(cmd) = autopilot_command(snap) {
                    if let Err(e) = state.send_command(cmd) {
                        error!("Failed to send command: {e}");
                        break;
                    }
                }
            }
        }
    }

    if let Err(e) = state.shutdown() {
        error!("Failed to stop game loop: {e}");
    }
    state.snapshot().ok().flatten()
}

/// Aim just below the lowest incoming missile, as a player clicking would.
fn autopilot_command(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    let target = snapshot
        .enemy_missiles
        .iter()
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y))?;
    input::point_to_command(
        target.position.x,
        target.position.y + 2.0 * target.speed * AUTOPILOT_INTERVAL as f64,
        snapshot.width,
        snapshot.height,
    )
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        config_path: None,
        ticks: DEFAULT_TICKS,
        realtime: false,
        autopilot: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args.next().ok_or("--ticks needs a value")?;
                parsed.ticks = value
                    .parse()
                    .map_err(|_| format!("Invalid tick count: {value}"))?;
            }
            "--realtime" => parsed.realtime = true,
            "--autopilot" => parsed.autopilot = true,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with("--") => return Err(format!("Unknown option: {other}")),
            path => {
                if parsed.config_path.is_some() {
                    return Err(format!("Unexpected argument: {path}"));
                }
                parsed.config_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn print_usage() {
    eprintln!(
        "skyshield: headless missile defense simulation\n\
         \n\
         Usage: skyshield [config.json] [options]\n\
         \n\
           --ticks <N>    Frames to simulate (default: {DEFAULT_TICKS})\n\
           --realtime     Run on the 60Hz game loop thread instead of stepping directly\n\
           --autopilot    Fire at the lowest incoming missile every {AUTOPILOT_INTERVAL} ticks\n\
         \n\
         Set RUST_LOG=info (or debug) to see game events.\n"
    );
}
