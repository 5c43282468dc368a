//! Entity spawn factories for setting up the simulation world.
//!
//! Creates bases, cities, missiles and explosions with
//! appropriate component bundles.

use hecs::World;

use skyshield_core::components::*;
use skyshield_core::config::SimConfig;
use skyshield_core::constants::*;
use skyshield_core::enums::ExplosionKind;
use skyshield_core::types::{Position, Velocity};

/// Lay out the ground defenses: three bases and six cities along the bottom edge.
pub fn setup_defenses(world: &mut World, config: &SimConfig) {
    for (id, position) in base_positions(config.width, config.height)
        .into_iter()
        .enumerate()
    {
        spawn_base(
            world,
            id as u32,
            position,
            BASE_WIDTH / 2.0,
            BASE_HEIGHT / 2.0,
        );
    }

    for (id, position) in city_positions(config.width, config.height)
        .into_iter()
        .enumerate()
    {
        spawn_city(
            world,
            id as u32,
            position,
            CITY_WIDTH / 2.0,
            CITY_HEIGHT / 2.0,
        );
    }
}

/// Left, center and right base positions.
pub fn base_positions(width: f64, height: f64) -> [Position; 3] {
    let y = height - BASE_GROUND_OFFSET;
    [
        Position::new(BASE_EDGE_INSET, y),
        Position::new(width / 2.0, y),
        Position::new(width - BASE_EDGE_INSET, y),
    ]
}

/// City positions, spread between the bases.
pub fn city_positions(width: f64, height: f64) -> Vec<Position> {
    let y = height - CITY_GROUND_OFFSET;
    CITY_X_FRACTIONS
        .iter()
        .map(|fraction| Position::new(width * fraction, y))
        .collect()
}

pub fn spawn_base(
    world: &mut World,
    id: u32,
    position: Position,
    half_width: f64,
    half_height: f64,
) -> hecs::Entity {
    world.spawn((
        Base,
        position,
        Structure {
            id,
            half_width,
            half_height,
            destroyed: false,
        },
    ))
}

pub fn spawn_city(
    world: &mut World,
    id: u32,
    position: Position,
    half_width: f64,
    half_height: f64,
) -> hecs::Entity {
    world.spawn((
        City,
        position,
        Structure {
            id,
            half_width,
            half_height,
            destroyed: false,
        },
    ))
}

/// Spawn an enemy missile locked onto `target`.
pub fn spawn_enemy_missile(
    world: &mut World,
    position: Position,
    speed: f64,
    target: TargetRef,
) -> hecs::Entity {
    world.spawn((position, EnemyMissile { speed, target }))
}

/// Spawn an interceptor with its fixed velocity.
pub fn spawn_player_missile(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    base_id: u32,
) -> hecs::Entity {
    world.spawn((PlayerMissile, position, velocity, LaunchOrigin { base_id }))
}

/// Small linear-growth flash at a base that just fired.
pub fn spawn_launch_flash(world: &mut World, position: Position) -> hecs::Entity {
    spawn_explosion(
        world,
        position,
        Explosion {
            kind: ExplosionKind::LaunchFlash,
            radius: EXPLOSION_START_RADIUS,
            life: LAUNCH_FLASH_LIFE,
            max_radius: None,
        },
    )
}

/// Interceptor blast that grows toward `max_radius`.
pub fn spawn_detonation(world: &mut World, position: Position, max_radius: f64) -> hecs::Entity {
    spawn_explosion(
        world,
        position,
        Explosion {
            kind: ExplosionKind::Detonation,
            radius: EXPLOSION_START_RADIUS,
            life: DETONATION_LIFE,
            max_radius: Some(max_radius),
        },
    )
}

pub fn spawn_explosion(world: &mut World, position: Position, explosion: Explosion) -> hecs::Entity {
    world.spawn((position, explosion))
}
