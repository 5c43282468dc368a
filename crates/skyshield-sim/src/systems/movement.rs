//! Kinematic integration for both missile kinds.
//!
//! Enemy missiles fall straight down at their own speed; interceptors keep
//! the velocity they were launched with. Anything that leaves the play area
//! is despawned in the same pass.

use hecs::{Entity, World};

use skyshield_core::components::{EnemyMissile, PlayerMissile};
use skyshield_core::types::{Position, Velocity};

/// Move enemy missiles down and drop those past the bottom edge.
/// Returns how many were dropped.
pub fn advance_enemies(world: &mut World, height: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, (pos, missile)) in world.query_mut::<(&mut Position, &EnemyMissile)>() {
        pos.y += missile.speed;
        if pos.y >= height {
            despawn_buffer.push(entity);
        }
    }

    let missed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    missed
}

/// Move interceptors along their velocity and drop those outside the play area.
pub fn advance_interceptors(
    world: &mut World,
    width: f64,
    height: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (pos, vel, _missile)) in
        world.query_mut::<(&mut Position, &Velocity, &PlayerMissile)>()
    {
        pos.x += vel.x;
        pos.y += vel.y;
        if !pos.in_bounds(width, height) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
