//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::SimConfig`]; a config file
//! may override the tunable ones.

/// Simulation tick rate (Hz). One tick per display frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Play area ---

/// Default play surface width in pixels.
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Default play surface height in pixels.
pub const DEFAULT_HEIGHT: f64 = 600.0;

// --- Ground layout ---

/// Horizontal inset of the outer bases from the screen edges.
pub const BASE_EDGE_INSET: f64 = 80.0;

/// Vertical offset of a base center above the bottom edge.
pub const BASE_GROUND_OFFSET: f64 = 15.0;

/// Base footprint (full width / height).
pub const BASE_WIDTH: f64 = 30.0;
pub const BASE_HEIGHT: f64 = 25.0;

/// City x positions as fractions of the play width.
pub const CITY_X_FRACTIONS: [f64; 6] = [0.2, 0.3, 0.4, 0.6, 0.7, 0.8];

/// Vertical offset of a city center above the bottom edge.
pub const CITY_GROUND_OFFSET: f64 = 20.0;

/// City footprint (full width / height).
pub const CITY_WIDTH: f64 = 20.0;
pub const CITY_HEIGHT: f64 = 25.0;

// --- Enemy spawn policy ---

/// Per-tick probability of attempting an enemy spawn.
pub const SPAWN_PROBABILITY: f64 = 0.02;

/// Probability that a spawn attempt picks the city pool over the base pool.
pub const CITY_POOL_CHANCE: f64 = 0.5;

/// Enemy speed at level 0 (pixels per tick).
pub const ENEMY_BASE_SPEED: f64 = 0.5;

/// Enemy speed gained per level.
pub const ENEMY_SPEED_PER_LEVEL: f64 = 0.125;

/// Level a new game starts at.
pub const STARTING_LEVEL: u32 = 1;

// --- Interceptors ---

/// Interceptor speed (pixels per tick).
pub const LAUNCH_SPEED: f64 = 3.5;

/// Nominal missile length used to derive collision and blast sizes.
pub const MISSILE_LENGTH: f64 = 20.0;

/// Proximity that triggers an interceptor detonation, in missile lengths.
pub const DETONATION_PROXIMITY_FACTOR: f64 = 2.0;

/// Detonation blast cap, in missile lengths.
pub const DETONATION_RADIUS_FACTOR: f64 = 5.0;

// --- Explosions ---

/// Initial radius of every explosion.
pub const EXPLOSION_START_RADIUS: f64 = 5.0;

/// Lifetime of a detonation explosion (ticks).
pub const DETONATION_LIFE: i32 = 50;

/// Lifetime of a launch flash (ticks).
pub const LAUNCH_FLASH_LIFE: i32 = 20;

/// Linear growth per tick for explosions without a cap.
pub const EXPLOSION_LINEAR_GROWTH: f64 = 0.5;

/// Fraction of the remaining gap to the cap closed each tick.
pub const EXPLOSION_DECAY_RATE: f64 = 0.1;

// --- Scoring ---

/// Points per enemy missile destroyed.
pub const KILL_SCORE: u32 = 100;
