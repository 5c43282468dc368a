//! Explosion growth and expiry.

use hecs::{Entity, World};

use skyshield_core::components::Explosion;
use skyshield_core::constants::{EXPLOSION_DECAY_RATE, EXPLOSION_LINEAR_GROWTH};

/// Grow every explosion, burn one tick of life, and remove the spent ones.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        grow(explosion);
        explosion.life -= 1;
        if explosion.life <= 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Capped blasts close a fixed fraction of the remaining gap each tick,
/// so they approach but never reach the cap. Uncapped ones grow linearly.
pub fn grow(explosion: &mut Explosion) {
    match explosion.max_radius {
        Some(max_radius) => {
            explosion.radius += (max_radius - explosion.radius) * EXPLOSION_DECAY_RATE;
        }
        None => explosion.radius += EXPLOSION_LINEAR_GROWTH,
    }
}
