//! Game state snapshot: the complete visible state handed to a renderer each tick.
//!
//! Snapshots are read-only copies; nothing a renderer does to them reaches the engine.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    /// Play surface size, so a renderer can scale.
    pub width: f64,
    pub height: f64,
    pub bases: Vec<StructureView>,
    pub cities: Vec<StructureView>,
    pub enemy_missiles: Vec<EnemyMissileView>,
    pub player_missiles: Vec<PlayerMissileView>,
    pub explosions: Vec<ExplosionView>,
    pub audio_events: Vec<AudioEvent>,
}

/// A base or city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub id: u32,
    pub position: Position,
    pub half_width: f64,
    pub half_height: f64,
    pub destroyed: bool,
}

/// An incoming enemy missile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMissileView {
    pub position: Position,
    pub speed: f64,
    pub target_kind: StructureKind,
    pub target_id: u32,
}

/// A player interceptor in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMissileView {
    pub position: Position,
    pub velocity: Velocity,
    /// Heading (radians, screen space) for drawing the missile body.
    pub heading: f64,
    pub base_id: u32,
}

/// A live explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Position,
    pub kind: ExplosionKind,
    pub radius: f64,
    pub life: i32,
}

impl GameStateSnapshot {
    /// Number of bases still standing.
    pub fn bases_standing(&self) -> usize {
        self.bases.iter().filter(|b| !b.destroyed).count()
    }

    /// Number of cities still standing.
    pub fn cities_standing(&self) -> usize {
        self.cities.iter().filter(|c| !c.destroyed).count()
    }
}
