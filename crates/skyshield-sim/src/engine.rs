//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::commands::PlayerCommand;
use skyshield_core::config::SimConfig;
use skyshield_core::constants::KILL_SCORE;
use skyshield_core::enums::GamePhase;
use skyshield_core::events::AudioEvent;
use skyshield_core::state::GameStateSnapshot;
use skyshield_core::types::{SimTime, Velocity};

use crate::audio::{AudioPort, SilentAudio};
use crate::structures;
use crate::systems;
use crate::systems::snapshot::Scoreboard;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    score: u32,
    level: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    audio: Box<dyn AudioPort>,
}

impl SimulationEngine {
    /// Create a new engine with bases and cities laid out and the game running.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_defenses(&mut world, &config);
        info!(
            "New game: {}x{} play area, level {}, seed {}",
            config.width, config.height, config.starting_level, config.seed
        );

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::Active,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            score: 0,
            level: config.starting_level,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            audio: Box::new(SilentAudio),
            config,
        }
    }

    /// Attach a sound port. Detonations call it without waiting on it.
    pub fn with_audio(mut self, audio: Box<dyn AudioPort>) -> Self {
        self.audio = audio;
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance one frame, and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        self.update();

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.scoreboard(),
            &self.config,
            audio_events,
        )
    }

    /// Advance the simulation by one frame. Does nothing unless the game is
    /// active. Returns whether a frame ran.
    pub fn update(&mut self) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        self.run_systems();
        self.time.advance();
        true
    }

    /// Build a snapshot without advancing. Pending audio events are copied, not drained.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.scoreboard(),
            &self.config,
            self.audio_events.clone(),
        )
    }

    /// Fire an interceptor from `base_id` toward `(target_x, target_y)`.
    ///
    /// No-op (returns false) when the base is unknown or destroyed, or the
    /// game is not active. A target on the base itself fires straight up.
    pub fn launch_interceptor(&mut self, base_id: u32, target_x: f64, target_y: f64) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        let Some(origin) = structures::standing_base_position(&self.world, base_id) else {
            debug!("Launch from base {base_id} ignored: missing or destroyed");
            return false;
        };

        let direction = (DVec2::new(target_x, target_y) - origin.as_dvec2())
            .try_normalize()
            .unwrap_or(DVec2::NEG_Y);
        let velocity = Velocity::from(direction * self.config.launch_speed);

        world_setup::spawn_player_missile(&mut self.world, origin, velocity, base_id);
        world_setup::spawn_launch_flash(&mut self.world, origin);
        self.audio_events.push(AudioEvent::Launch { base_id });
        true
    }

    /// Undestroyed base nearest to `(x, y)`, or `None` if all are destroyed.
    pub fn find_nearest_base(&self, x: f64, y: f64) -> Option<u32> {
        structures::nearest_standing_base(&self.world, x, y)
    }

    /// Fire from the nearest standing base toward `(x, y)`.
    pub fn launch_at(&mut self, x: f64, y: f64) -> bool {
        match self.find_nearest_base(x, y) {
            Some(base_id) => self.launch_interceptor(base_id, x, y),
            None => false,
        }
    }

    /// Get the current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Get the current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the configured time scale.
    pub fn time_scale(&self) -> f64 {
        self.config.time_scale
    }

    /// Get the configuration this engine was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage exact scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            phase: self.phase,
            score: self.score,
            level: self.level,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::LaunchInterceptor {
                base_id,
                target_x,
                target_y,
            } => {
                self.launch_interceptor(base_id, target_x, target_y);
            }
            PlayerCommand::LaunchAtPoint { x, y } => {
                self.launch_at(x, y);
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Restart => self.restart(),
        }
    }

    /// Throw away all entities and start over from the configured seed.
    fn restart(&mut self) {
        self.world.clear();
        world_setup::setup_defenses(&mut self.world, &self.config);
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.score = 0;
        self.level = self.config.starting_level;
        self.audio_events.clear();
        info!("Game restarted");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Enemy spawn
        systems::spawner::run(&mut self.world, &mut self.rng, &self.config, self.level);
        // 2. Enemy advance
        systems::movement::advance_enemies(
            &mut self.world,
            self.config.height,
            &mut self.despawn_buffer,
        );
        // 3. Interceptor advance
        systems::movement::advance_interceptors(
            &mut self.world,
            self.config.width,
            self.config.height,
            &mut self.despawn_buffer,
        );
        // 4. Explosion growth and expiry
        systems::explosions::run(&mut self.world, &mut self.despawn_buffer);
        // 5. Collisions
        let outcome = systems::collision::run(
            &mut self.world,
            &self.config,
            self.audio.as_mut(),
            &mut self.audio_events,
            &mut self.despawn_buffer,
        );
        self.score = self
            .score
            .saturating_add(outcome.kills.saturating_mul(KILL_SCORE));
        for impact in outcome.impacts {
            self.audio_events.push(AudioEvent::Impact {
                kind: impact.kind,
                id: impact.id,
            });
        }
        // 6. Prune anything still past its removal predicate
        systems::cleanup::run(
            &mut self.world,
            self.config.width,
            self.config.height,
            &mut self.despawn_buffer,
        );
        // 7. Game over
        if self.config.game_over_when_defenses_lost && structures::defenses_lost(&self.world) {
            self.phase = GamePhase::GameOver;
            info!("Game over: all defenses lost, final score {}", self.score);
        }
    }
}
