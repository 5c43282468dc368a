//! Audio backend for the headless runtime: sound cues become log lines.

use log::info;

use skyshield_core::error::AudioError;
use skyshield_sim::AudioPort;

/// Logs each detonation instead of playing it.
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detonation cues received so far.
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioPort for LogAudio {
    fn play_detonation(&mut self) -> Result<(), AudioError> {
        self.played += 1;
        info!("*boom* (detonation #{})", self.played);
        Ok(())
    }
}
