//! Error types shared across crates.

/// Failure loading or validating a [`crate::config::SimConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Failure reported by an audio port. Never reaches the simulation.
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// No output device, or audio disabled
    #[error("Audio unavailable: {0}")]
    Unavailable(String),

    /// Playback started but failed
    #[error("Playback failed: {0}")]
    Playback(String),
}
