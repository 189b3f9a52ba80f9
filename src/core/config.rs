//! Session tuning: world size, physics, pipe geometry and collision options.

use super::constants::*;
use super::error::{FlappyError, Result};
use serde::{Deserialize, Serialize};

/// Which collision test decides player-versus-pipe hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Shrunken rectangle hit-box against each barrier.
    BoundingBox,
    /// Swept opacity-mask test with interpolated sub-steps.
    PixelMask,
}

impl CollisionStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bbox" | "bounding_box" => Some(Self::BoundingBox),
            "mask" | "pixel_mask" => Some(Self::PixelMask),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BoundingBox => "bounding_box",
            Self::PixelMask => "pixel_mask",
        }
    }
}

/// What the player does after dying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathMotion {
    /// Physics paused where the player died.
    Freeze,
    /// Player keeps falling until it rests on the floor.
    Fall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,

    pub gravity: f64,
    /// Velocity assigned by a flap (negative = upward).
    pub flap_velocity: f64,
    /// Maximum downward speed.
    pub terminal_velocity: f64,
    /// Player x as a fraction of world width.
    pub player_x_fraction: f64,
    /// World units per sprite pixel.
    pub sprite_scale: f64,

    pub rotation_min_deg: f64,
    pub rotation_max_deg: f64,
    /// Degrees per second toward the nose-up limit while rising.
    pub rotation_rise_rate: f64,
    /// Degrees per second toward the nose-down limit while falling.
    pub rotation_fall_rate: f64,

    /// Leftward pipe speed in world units per second.
    pub scroll_speed: f64,
    pub gap_height: f64,
    pub gap_margin: f64,
    pub pipe_width: f64,
    /// Height of the cap piece at each gap edge. Zero disables caps.
    pub cap_height: f64,
    /// How far a cap sticks out past the pipe body on each side.
    pub cap_overhang: f64,
    pub spawn_period_secs: f64,

    pub collision: CollisionStrategy,
    /// Bounding-box strategy: hit-box size as a fraction of the sprite.
    pub hitbox_fraction: f64,
    /// Pixel-mask strategy: max distance between interpolated samples.
    pub sweep_sample_spacing: f64,
    pub sweep_max_samples: u32,

    pub death_motion: DeathMotion,
    /// Frame deltas above this are clamped (pause/lag protection).
    pub max_frame_dt: f64,
    pub goal_score: Option<u32>,

    pub backdrop_speed: f64,
    pub backdrop_tile_width: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            terminal_velocity: TERMINAL_VELOCITY,
            player_x_fraction: PLAYER_X_FRACTION,
            sprite_scale: SPRITE_SCALE,
            rotation_min_deg: ROTATION_MIN_DEG,
            rotation_max_deg: ROTATION_MAX_DEG,
            rotation_rise_rate: ROTATION_RISE_RATE,
            rotation_fall_rate: ROTATION_FALL_RATE,
            scroll_speed: SCROLL_SPEED,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            pipe_width: PIPE_WIDTH,
            cap_height: CAP_HEIGHT,
            cap_overhang: CAP_OVERHANG,
            spawn_period_secs: SPAWN_PERIOD_SECS,
            collision: CollisionStrategy::PixelMask,
            hitbox_fraction: HITBOX_FRACTION,
            sweep_sample_spacing: SWEEP_SAMPLE_SPACING,
            sweep_max_samples: SWEEP_MAX_SAMPLES,
            death_motion: DeathMotion::Freeze,
            max_frame_dt: MAX_FRAME_DT,
            goal_score: Some(GOAL_SCORE),
            backdrop_speed: BACKDROP_SPEED,
            backdrop_tile_width: BACKDROP_TILE_WIDTH,
        }
    }
}

impl GameConfig {
    /// Default tuning with the rectangle hit-box strategy.
    pub fn bounding_box() -> Self {
        Self {
            collision: CollisionStrategy::BoundingBox,
            ..Default::default()
        }
    }

    /// Rejects values that would make the simulation meaningless.
    ///
    /// A world too short for the gap is *not* rejected; spawning clamps it.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gap_height", self.gap_height),
            ("pipe_width", self.pipe_width),
            ("spawn_period_secs", self.spawn_period_secs),
            ("sprite_scale", self.sprite_scale),
            ("sweep_sample_spacing", self.sweep_sample_spacing),
            ("max_frame_dt", self.max_frame_dt),
            ("terminal_velocity", self.terminal_velocity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlappyError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("scroll_speed", self.scroll_speed),
            ("gap_margin", self.gap_margin),
            ("cap_height", self.cap_height),
            ("cap_overhang", self.cap_overhang),
            ("rotation_rise_rate", self.rotation_rise_rate),
            ("rotation_fall_rate", self.rotation_fall_rate),
            ("backdrop_speed", self.backdrop_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FlappyError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.hitbox_fraction > 0.0 && self.hitbox_fraction <= 1.0) {
            return Err(FlappyError::InvalidConfig(format!(
                "hitbox_fraction must be in (0, 1], got {}",
                self.hitbox_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.player_x_fraction) {
            return Err(FlappyError::InvalidConfig(format!(
                "player_x_fraction must be in [0, 1], got {}",
                self.player_x_fraction
            )));
        }
        let finite = [
            ("flap_velocity", self.flap_velocity),
            ("rotation_min_deg", self.rotation_min_deg),
            ("rotation_max_deg", self.rotation_max_deg),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(FlappyError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.spawn_period_secs < MIN_SPAWN_PERIOD_SECS {
            return Err(FlappyError::InvalidConfig(format!(
                "spawn_period_secs must be at least {MIN_SPAWN_PERIOD_SECS}, got {}",
                self.spawn_period_secs
            )));
        }
        if self.rotation_min_deg > self.rotation_max_deg {
            return Err(FlappyError::InvalidConfig(format!(
                "rotation range inverted: {} > {}",
                self.rotation_min_deg, self.rotation_max_deg
            )));
        }
        if self.sweep_max_samples == 0 {
            return Err(FlappyError::InvalidConfig(
                "sweep_max_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a config from JSON text; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn player_x(&self) -> f64 {
        self.world_width * self.player_x_fraction
    }
}
