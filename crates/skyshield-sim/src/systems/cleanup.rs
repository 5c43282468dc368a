//! Cleanup system: removes entities whose removal predicate holds.
//!
//! Each update step already despawns what it kills. This sweep re-checks
//! every predicate so no dead entity survives a frame, and running it twice
//! in a row changes nothing the second time.

use hecs::{Entity, World};

use skyshield_core::components::{EnemyMissile, Explosion, PlayerMissile};
use skyshield_core::types::Position;

/// Despawn out-of-area missiles and spent explosions. Returns how many went.
pub fn run(world: &mut World, width: f64, height: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, (pos, _enemy)) in world.query_mut::<(&Position, &EnemyMissile)>() {
        if enemy_expired(pos, height) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, _interceptor)) in world.query_mut::<(&Position, &PlayerMissile)>() {
        if interceptor_expired(pos, width, height) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion_expired(explosion) {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}

pub fn enemy_expired(pos: &Position, height: f64) -> bool {
    pos.y >= height
}

pub fn interceptor_expired(pos: &Position, width: f64, height: f64) -> bool {
    !pos.in_bounds(width, height)
}

pub fn explosion_expired(explosion: &Explosion) -> bool {
    explosion.life <= 0
}
