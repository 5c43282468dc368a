//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::StructureKind;
use crate::types::Position;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Interceptor left a base.
    Launch { base_id: u32 },
    /// Interceptor warhead detonated.
    Detonation { position: Position, kills: u32 },
    /// Enemy warhead reached a ground structure.
    Impact { kind: StructureKind, id: u32 },
}
