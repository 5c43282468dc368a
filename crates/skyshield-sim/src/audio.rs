//! Sound output port.
//!
//! The engine calls the port and moves on: playback is never awaited and a
//! failure only produces a log line.

use log::warn;

use skyshield_core::error::AudioError;

/// Receiver for fire-and-forget sound cues.
pub trait AudioPort: Send {
    /// Play the detonation sound once.
    fn play_detonation(&mut self) -> Result<(), AudioError>;
}

/// Port that plays nothing. Used when no audio backend is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPort for SilentAudio {
    fn play_detonation(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Trigger the detonation cue, swallowing any failure.
pub(crate) fn play_detonation(port: &mut dyn AudioPort) {
    if let Err(e) = port.play_detonation() {
        warn!("Error playing detonation sound: {e}");
    }
}
