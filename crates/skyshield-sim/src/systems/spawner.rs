//! Enemy spawn policy: at most one new enemy missile per tick.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::config::SimConfig;
use skyshield_core::constants::CITY_POOL_CHANCE;
use skyshield_core::enums::StructureKind;
use skyshield_core::types::Position;

use crate::structures;
use crate::world_setup;

/// Roll the per-tick spawn chance and, on success, try to spawn one missile.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    level: u32,
) -> Option<hecs::Entity> {
    if rng.gen::<f64>() < config.spawn_probability {
        try_spawn(world, rng, config, level)
    } else {
        None
    }
}

/// Pick a pool 50/50, then a member uniformly. A destroyed pick or an empty
/// pool skips the spawn for this tick; there is no retry.
pub fn try_spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    level: u32,
) -> Option<hecs::Entity> {
    let kind = if rng.gen::<f64>() < CITY_POOL_CHANCE {
        StructureKind::City
    } else {
        StructureKind::Base
    };

    let pool = structures::pool(world, kind);
    if pool.is_empty() {
        return None;
    }

    let target = pool[rng.gen_range(0..pool.len())];
    if target.structure.destroyed {
        return None;
    }

    let x = rng.gen_range(0.0..=config.width);
    Some(world_setup::spawn_enemy_missile(
        world,
        Position::new(x, 0.0),
        config.enemy_speed(level),
        target.target_ref(),
    ))
}
