//! Simulation engine for SKYSHIELD.
//!
//! Owns the hecs ECS world, runs systems once per frame,
//! and produces GameStateSnapshots for a renderer.

pub mod audio;
pub mod engine;
pub mod structures;
pub mod systems;
pub mod world_setup;

pub use audio::{AudioPort, SilentAudio};
pub use engine::SimulationEngine;
pub use skyshield_core as core;

#[cfg(test)]
mod tests;
