//! Game loop thread. Runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. Each tick's snapshot is
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info};

use skyshield_core::config::SimConfig;
use skyshield_core::constants::TICK_RATE;
use skyshield_core::state::GameStateSnapshot;
use skyshield_sim::{AudioPort, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread and returns its command sender.
pub fn spawn_game_loop(
    config: SimConfig,
    audio: Box<dyn AudioPort>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("skyshield-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config).with_audio(audio);
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Runs until a Shutdown command or channel disconnect. A finished game keeps
/// the loop alive so a Restart can still arrive.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    let mut announced_game_over = false;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            info!("Game loop stopping at tick {}", engine.time().tick);
            return;
        }

        // 2. Advance one tick (engine handles pause and game over internally)
        let snapshot = engine.tick();

        if snapshot.game_over != announced_game_over {
            announced_game_over = snapshot.game_over;
            if snapshot.game_over {
                info!("Game over published, score {}", snapshot.score);
            }
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = scaled_tick_duration(engine.time_scale());

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; skip ahead instead of bursting to catch up
            debug!("Game loop fell behind, resetting tick clock");
            next_tick_time = now;
        }
    }
}

/// Forward every pending command to the engine. Returns false when the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Wall-clock duration of one tick at the given time scale.
/// Near-zero or invalid scales fall back to real time.
pub fn scaled_tick_duration(time_scale: f64) -> Duration {
    if time_scale.is_finite() && time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}
