//! Application state shared between input handling and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use log::info;

use skyshield_core::commands::PlayerCommand;
use skyshield_core::config::SimConfig;
use skyshield_core::state::GameStateSnapshot;
use skyshield_sim::AudioPort;

use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop channel closed")]
    ChannelClosed,
    #[error("shared state lock poisoned")]
    LockPoisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`. The latest
/// snapshot is shared with the game loop thread through an `Arc`.
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the game loop after every tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread if it is not already running.
    pub fn start(&self, config: SimConfig, audio: Box<dyn AudioPort>) -> Result<(), AppError> {
        let mut running = self.running.lock().map_err(|_| AppError::LockPoisoned)?;
        if *running {
            return Err(AppError::AlreadyRunning);
        }

        let cmd_tx = game_loop::spawn_game_loop(config, audio, self.latest_snapshot.clone())?;

        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
        *tx_lock = Some(cmd_tx);
        *running = true;
        info!("Game loop started");
        Ok(())
    }

    /// Forward a player command to the running simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Stop the game loop. The thread exits after finishing its current tick.
    pub fn shutdown(&self) -> Result<(), AppError> {
        match self.send(GameLoopCommand::Shutdown) {
            // A loop that already exited on its own needs no shutdown.
            Ok(()) | Err(AppError::ChannelClosed) => {}
            Err(e) => return Err(e),
        }
        let mut running = self.running.lock().map_err(|_| AppError::LockPoisoned)?;
        *running = false;
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
        *tx_lock = None;
        Ok(())
    }

    /// Latest snapshot published by the game loop, if any tick has run yet.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, AppError> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|_| AppError::LockPoisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::ChannelClosed),
            None => Err(AppError::NotStarted),
        }
    }
}
