//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fire an interceptor from a specific base toward a point.
    LaunchInterceptor {
        base_id: u32,
        target_x: f64,
        target_y: f64,
    },
    /// Fire from whichever undestroyed base is nearest to the point.
    LaunchAtPoint { x: f64, y: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Reset score, level and all entities to a fresh game.
    Restart,
}
