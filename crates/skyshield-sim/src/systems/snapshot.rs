//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skyshield_core::components::*;
use skyshield_core::config::SimConfig;
use skyshield_core::enums::*;
use skyshield_core::events::AudioEvent;
use skyshield_core::state::*;
use skyshield_core::types::{Position, SimTime, Velocity};

use crate::structures;

/// Scalar game state that lives on the engine rather than in the world.
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard {
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    scoreboard: Scoreboard,
    config: &SimConfig,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase: scoreboard.phase,
        score: scoreboard.score,
        level: scoreboard.level,
        game_over: scoreboard.phase == GamePhase::GameOver,
        width: config.width,
        height: config.height,
        bases: build_structures(world, StructureKind::Base),
        cities: build_structures(world, StructureKind::City),
        enemy_missiles: build_enemy_missiles(world),
        player_missiles: build_player_missiles(world),
        explosions: build_explosions(world),
        audio_events,
    }
}

/// Build StructureView list for one pool, ordered by id.
fn build_structures(world: &World, kind: StructureKind) -> Vec<StructureView> {
    structures::pool(world, kind)
        .into_iter()
        .map(|entry| StructureView {
            id: entry.structure.id,
            position: entry.position,
            half_width: entry.structure.half_width,
            half_height: entry.structure.half_height,
            destroyed: entry.structure.destroyed,
        })
        .collect()
}

fn build_enemy_missiles(world: &World) -> Vec<EnemyMissileView> {
    world
        .query::<(&Position, &EnemyMissile)>()
        .iter()
        .map(|(_, (pos, missile))| EnemyMissileView {
            position: *pos,
            speed: missile.speed,
            target_kind: missile.target.kind,
            target_id: missile.target.id,
        })
        .collect()
}

fn build_player_missiles(world: &World) -> Vec<PlayerMissileView> {
    world
        .query::<(&PlayerMissile, &Position, &Velocity, &LaunchOrigin)>()
        .iter()
        .map(|(_, (_, pos, vel, origin))| PlayerMissileView {
            position: *pos,
            velocity: *vel,
            heading: vel.heading(),
            base_id: origin.base_id,
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Position, &Explosion)>()
        .iter()
        .map(|(_, (pos, explosion))| ExplosionView {
            position: *pos,
            kind: explosion.kind,
            radius: explosion.radius,
            life: explosion.life,
        })
        .collect()
}
