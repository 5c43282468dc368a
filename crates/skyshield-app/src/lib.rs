//! SKYSHIELD headless runtime.
//!
//! Runs the simulation engine on a fixed-rate thread, translates raw screen
//! input into player commands, and keeps the latest snapshot for a renderer.

pub mod audio;
pub mod game_loop;
pub mod input;
pub mod state;

pub use skyshield_core as core;
pub use skyshield_sim as sim;
