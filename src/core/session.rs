//! The simulation loop: one `GameSession` owns every piece of mutable game
//! state and advances it by measured frame time.

use super::config::{DeathMotion, GameConfig};
use super::error::Result;
use super::geometry::Vec2;
use super::tick::{DeathCause, TickEvent, TickResult};
use crate::collision::{CollisionEngine, PixelMask, Sweep};
use crate::obstacles::{retire_offscreen, scroll_pipes, PipePair, Spawner};
use crate::player::{self, Player};
use crate::scoring::Scoreboard;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player floats at the spawn point, gravity off, no pipes.
    Idle,
    Flying,
    /// Collisions and scoring are off until a restart.
    Dead,
}

/// Discrete input edges delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Context dependent: start when idle, flap when flying, restart when dead.
    Tap,
    Start,
    Flap,
    Restart,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub player: Player,
    pub pipes: Vec<PipePair>,
    pub spawner: Spawner,
    pub scoreboard: Scoreboard,
    pub collision: CollisionEngine,
    /// Cosmetic parallax offset in `[0, backdrop_tile_width)`.
    pub backdrop_offset: f64,
}

impl GameSession {
    /// New idle session using the built-in shrimp sprite.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mask = player::shrimp_mask()?;
        Self::with_mask(config, mask)
    }

    pub fn with_mask(config: GameConfig, mask: PixelMask) -> Result<Self> {
        config.validate()?;
        let spawn = spawn_point(&config);
        let player = Player::new(spawn, mask, config.sprite_scale);
        Ok(Self {
            phase: GamePhase::Idle,
            player,
            pipes: Vec::new(),
            spawner: Spawner::new(),
            scoreboard: Scoreboard::new(0, config.goal_score),
            collision: CollisionEngine::from_config(&config),
            backdrop_offset: 0.0,
            config,
        })
    }

    /// Seed the high score loaded from external storage.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.scoreboard.high_score = high_score;
        self
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score
    }

    pub fn is_alive(&self) -> bool {
        self.player.alive
    }

    /// Apply one input edge. Inputs that mean nothing in the current phase
    /// are ignored.
    pub fn handle_input(&mut self, input: GameInput) -> Option<TickEvent> {
        match (input, self.phase) {
            (GameInput::Tap | GameInput::Start, GamePhase::Idle) => Some(self.start()),
            (GameInput::Tap | GameInput::Flap, GamePhase::Flying) => {
                player::flap(&mut self.player, self.config.flap_velocity);
                Some(TickEvent::Flapped)
            }
            (GameInput::Tap | GameInput::Restart, GamePhase::Dead) => Some(self.restart()),
            _ => None,
        }
    }

    fn start(&mut self) -> TickEvent {
        self.phase = GamePhase::Flying;
        self.player.gravity_enabled = true;
        self.spawner.rearm();
        tracing::info!(strategy = self.config.collision.name(), "run started");
        TickEvent::Started
    }

    fn restart(&mut self) -> TickEvent {
        self.pipes.clear();
        self.player.reset(spawn_point(&self.config));
        self.scoreboard.reset();
        self.spawner.rearm();
        self.phase = GamePhase::Idle;
        tracing::info!("session restarted");
        TickEvent::Restarted
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: backdrop scroll, player kinematics, pipe motion/spawn/retire,
    /// collision, scoring. Non-finite or non-positive `dt` is ignored; large
    /// values are clamped to `max_frame_dt`.
    pub fn step<R: Rng>(&mut self, dt: f64, rng: &mut R) -> TickResult {
        let mut result = TickResult::default();
        if !(dt.is_finite() && dt > 0.0) {
            return result;
        }
        let dt = dt.min(self.config.max_frame_dt);

        if self.phase != GamePhase::Dead && self.config.backdrop_tile_width > 0.0 {
            self.backdrop_offset = (self.backdrop_offset + self.config.backdrop_speed * dt)
                % self.config.backdrop_tile_width;
        }

        match self.phase {
            GamePhase::Idle => {
                player::integrate(&mut self.player, &self.config, dt);
                return result;
            }
            GamePhase::Dead => {
                self.step_dead(dt);
                return result;
            }
            GamePhase::Flying => {}
        }

        // Player
        player::integrate(&mut self.player, &self.config, dt);
        player::update_rotation(&mut self.player, &self.config, dt);
        player::clamp_to_ceiling(&mut self.player);

        // Pipes
        let scroll = self.config.scroll_speed * dt;
        scroll_pipes(&mut self.pipes, -scroll);
        for pipe in self.spawner.advance(dt, &self.config, rng) {
            tracing::debug!(id = pipe.id, gap_center = pipe.gap_center, "pipe spawned");
            result.events.push(TickEvent::Spawned {
                id: pipe.id,
                gap_center: pipe.gap_center,
            });
            self.pipes.push(pipe);
        }
        for id in retire_offscreen(&mut self.pipes) {
            tracing::debug!(id, "pipe retired");
            result.events.push(TickEvent::Retired { id });
        }

        // Collision
        if let Some(cause) = self.detect_collision(scroll) {
            self.kill(cause, &mut result);
            return result;
        }

        // Scoring
        for id in self
            .scoreboard
            .check_zones(&mut self.pipes, self.player.position.x)
        {
            result.events.push(TickEvent::Scored {
                id,
                score: self.scoreboard.score,
            });
        }
        if self.scoreboard.take_goal() {
            tracing::info!(score = self.scoreboard.score, "goal reached");
            result.events.push(TickEvent::GoalReached {
                score: self.scoreboard.score,
            });
        }

        result
    }

    fn step_dead(&mut self, dt: f64) {
        if self.config.death_motion != DeathMotion::Fall {
            return;
        }
        if player::touches_floor(&self.player, self.config.world_height) {
            player::rest_on_floor(&mut self.player, self.config.world_height);
            return;
        }
        player::integrate(&mut self.player, &self.config, dt);
        player::update_rotation(&mut self.player, &self.config, dt);
        if player::touches_floor(&self.player, self.config.world_height) {
            player::rest_on_floor(&mut self.player, self.config.world_height);
        }
    }

    /// Test the player's last motion against every barrier and the floor.
    ///
    /// `scroll` is how far the pipes moved left this frame; the previous pose
    /// is shifted by it so the sweep is relative to the pipes.
    fn detect_collision(&mut self, scroll: f64) -> Option<DeathCause> {
        if !self.player.alive {
            return None;
        }

        let current = self.player.pose();
        let mut previous = self.player.previous_pose();
        previous.center = previous.center - Vec2::new(scroll, 0.0);
        let sweep = Sweep::new(previous, current);

        for pipe in &self.pipes {
            for barrier in &pipe.barriers {
                if self.collision.hits(&self.player.mask, &sweep, &barrier.rect) {
                    return Some(DeathCause::Obstacle(pipe.id));
                }
            }
        }

        if player::touches_floor(&self.player, self.config.world_height) {
            player::rest_on_floor(&mut self.player, self.config.world_height);
            return Some(DeathCause::Floor);
        }
        None
    }

    /// Run the collision test against the current state outside of a step.
    /// Once dead this is a no-op until a restart.
    pub fn check_collisions(&mut self) -> TickResult {
        let mut result = TickResult::default();
        if self.phase != GamePhase::Flying {
            return result;
        }
        if let Some(cause) = self.detect_collision(0.0) {
            self.kill(cause, &mut result);
        }
        result
    }

    /// The single death transition. Re-entrant calls do nothing.
    pub fn kill(&mut self, cause: DeathCause, result: &mut TickResult) {
        if !self.player.alive || self.phase != GamePhase::Flying {
            return;
        }
        self.player.alive = false;
        self.phase = GamePhase::Dead;

        let score = self.scoreboard.score;
        tracing::info!(?cause, score, "player died");
        result.events.push(TickEvent::Died { cause, score });

        if let Some(previous) = self.scoreboard.settle_high_score() {
            tracing::info!(previous, high_score = score, "new high score");
            result.events.push(TickEvent::NewHighScore {
                previous,
                high_score: score,
            });
            result.high_score_changed = true;
        }
    }
}

/// Fixed horizontal offset, vertical centre.
pub fn spawn_point(config: &GameConfig) -> Vec2 {
    Vec2::new(config.player_x(), config.world_height * 0.5)
}
