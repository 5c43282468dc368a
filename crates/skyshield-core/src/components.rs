//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// A destructible ground structure (base or city).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Structure {
    /// Stable id within its pool, assigned at layout time.
    pub id: u32,
    pub half_width: f64,
    pub half_height: f64,
    /// Once true, never reset.
    pub destroyed: bool,
}

/// Stable reference to a ground structure. Resolved by lookup, never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: StructureKind,
    pub id: u32,
}

/// Hostile warhead falling straight down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyMissile {
    /// Downward speed (pixels per tick).
    pub speed: f64,
    /// Chosen at spawn, never reassigned.
    pub target: TargetRef,
}

/// Expanding blast that destroys enemy missiles it touches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub radius: f64,
    /// Remaining ticks. The explosion is removed at zero.
    pub life: i32,
    /// Growth cap. `None` means linear growth.
    pub max_radius: Option<f64>,
}

/// Which base launched an interceptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaunchOrigin {
    pub base_id: u32,
}

/// Marks an entity as a player base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Base;

/// Marks an entity as a city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct City;

/// Marks an entity as a player interceptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerMissile;
