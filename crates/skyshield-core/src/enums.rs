//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which ground-structure pool an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Launch site for interceptors.
    Base,
    /// Passive target.
    City,
}

/// Origin of an explosion, which also selects its growth mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Small flash at a base when an interceptor leaves it. Grows linearly.
    #[default]
    LaunchFlash,
    /// Interceptor warhead blast. Grows toward a cap.
    Detonation,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}
