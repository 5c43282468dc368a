//! Collision resolution: interceptor detonations, blast kills and ground impacts.
//!
//! Runs in three passes over a read-only view of the world. Removals are
//! recorded in masks and applied after all passes, so no collection is
//! mutated while it is being walked.

use hecs::{Entity, World};
use log::{debug, info};

use skyshield_core::components::{EnemyMissile, Explosion, PlayerMissile, TargetRef};
use skyshield_core::config::SimConfig;
use skyshield_core::enums::StructureKind;
use skyshield_core::events::AudioEvent;
use skyshield_core::types::Position;

use crate::audio::{self, AudioPort};
use crate::structures::{self, StructureEntry};
use crate::world_setup;

/// What happened during one collision pass.
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// Enemy missiles destroyed by detonations and blasts (each worth score).
    pub kills: u32,
    /// Interceptors that detonated.
    pub detonations: u32,
    /// Structures destroyed by enemy impacts, in resolution order.
    pub impacts: Vec<TargetRef>,
}

/// Run all three collision passes and despawn everything that was hit.
pub fn run(
    world: &mut World,
    config: &SimConfig,
    audio: &mut dyn AudioPort,
    audio_events: &mut Vec<AudioEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> CollisionOutcome {
    despawn_buffer.clear();
    let mut outcome = CollisionOutcome::default();

    let enemies: Vec<(Entity, Position)> = world
        .query::<(&Position, &EnemyMissile)>()
        .iter()
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();
    let mut enemy_removed = vec![false; enemies.len()];

    // a. Interceptors against enemy missiles.
    let detonations = detonate_interceptors(
        world,
        config,
        &enemies,
        &mut enemy_removed,
        audio,
        audio_events,
        despawn_buffer,
        &mut outcome,
    );
    for position in detonations {
        world_setup::spawn_detonation(world, position, config.detonation_radius());
    }

    // b. Enemy missiles inside any explosion.
    let blasts: Vec<(Position, f64)> = world
        .query::<(&Position, &Explosion)>()
        .iter()
        .map(|(_, (pos, explosion))| (*pos, explosion.radius))
        .collect();

    for (i, (_, enemy_pos)) in enemies.iter().enumerate() {
        if enemy_removed[i] {
            continue;
        }
        if blasts
            .iter()
            .any(|(center, radius)| enemy_pos.distance_to(center) < *radius)
        {
            enemy_removed[i] = true;
            outcome.kills += 1;
        }
    }

    // c. Enemy missiles against cities, then bases.
    let mut targets = structures::pool(world, StructureKind::City);
    targets.extend(structures::pool(world, StructureKind::Base));

    for (i, (_, enemy_pos)) in enemies.iter().enumerate() {
        if enemy_removed[i] {
            continue;
        }
        if let Some(target) = first_hit(&mut targets, enemy_pos) {
            enemy_removed[i] = true;
            outcome.impacts.push(target.target_ref());
            structures::destroy(world, target.entity);
            info!(
                "{:?} {} destroyed by impact at ({:.1}, {:.1})",
                target.kind, target.structure.id, enemy_pos.x, enemy_pos.y
            );
        }
    }

    for (i, (entity, _)) in enemies.iter().enumerate() {
        if enemy_removed[i] {
            despawn_buffer.push(*entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    outcome
}

/// Each interceptor within proximity of a live enemy detonates once. The
/// blast immediately sweeps every live enemy within the detonation radius
/// (the triggering missile included). Returns the detonation points; the
/// explosions themselves are spawned by the caller.
#[allow(clippy::too_many_arguments)]
fn detonate_interceptors(
    world: &World,
    config: &SimConfig,
    enemies: &[(Entity, Position)],
    enemy_removed: &mut [bool],
    audio: &mut dyn AudioPort,
    audio_events: &mut Vec<AudioEvent>,
    despawn_buffer: &mut Vec<Entity>,
    outcome: &mut CollisionOutcome,
) -> Vec<Position> {
    let proximity = config.detonation_proximity();
    let blast_radius = config.detonation_radius();

    let interceptors: Vec<(Entity, Position)> = world
        .query::<(&Position, &PlayerMissile)>()
        .iter()
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();

    let mut detonations = Vec::new();

    for (interceptor, position) in interceptors {
        let triggered = enemies
            .iter()
            .zip(enemy_removed.iter())
            .any(|((_, enemy_pos), removed)| !removed && position.distance_to(enemy_pos) < proximity);
        if !triggered {
            continue;
        }

        despawn_buffer.push(interceptor);
        audio::play_detonation(audio);

        let mut kills = 0;
        for ((_, enemy_pos), removed) in enemies.iter().zip(enemy_removed.iter_mut()) {
            if !*removed && position.distance_to(enemy_pos) <= blast_radius {
                *removed = true;
                kills += 1;
            }
        }

        debug!(
            "Interceptor detonated at ({:.1}, {:.1}), {} kill(s)",
            position.x, position.y, kills
        );
        outcome.kills += kills;
        outcome.detonations += 1;
        audio_events.push(AudioEvent::Detonation { position, kills });
        detonations.push(position);
    }

    detonations
}

/// First standing structure containing `point`, marked destroyed in `targets`
/// so later missiles in the same pass skip it.
fn first_hit(targets: &mut [StructureEntry], point: &Position) -> Option<StructureEntry> {
    let target = targets
        .iter_mut()
        .find(|t| !t.structure.destroyed && t.contains(point))?;
    target.structure.destroyed = true;
    Some(*target)
}
