// World
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

// Player physics (world units, seconds)
pub const GRAVITY: f64 = 900.0;
pub const FLAP_VELOCITY: f64 = -300.0;
pub const TERMINAL_VELOCITY: f64 = 1000.0;
pub const PLAYER_X_FRACTION: f64 = 0.2;
pub const SPRITE_SCALE: f64 = 3.0;

// Rotation (degrees). Rates equal -4/+2 degrees per 60 Hz frame.
pub const ROTATION_MIN_DEG: f64 = -20.0;
pub const ROTATION_MAX_DEG: f64 = 20.0;
pub const ROTATION_RISE_RATE: f64 = 240.0;
pub const ROTATION_FALL_RATE: f64 = 120.0;

// Pipes
pub const SCROLL_SPEED: f64 = 200.0;
pub const GAP_HEIGHT: f64 = 175.0;
pub const GAP_MARGIN: f64 = 120.0;
pub const PIPE_WIDTH: f64 = 80.0;
pub const CAP_HEIGHT: f64 = 20.0;
pub const CAP_OVERHANG: f64 = 5.0;
pub const SPAWN_PERIOD_SECS: f64 = 1.54;
pub const MIN_SPAWN_PERIOD_SECS: f64 = 0.05;

// Collision
pub const HITBOX_FRACTION: f64 = 0.75;
pub const SWEEP_SAMPLE_SPACING: f64 = 1.0;
pub const SWEEP_MAX_SAMPLES: u32 = 256;

// Timing
pub const MAX_FRAME_DT: f64 = 0.1;
pub const REFERENCE_FRAME_MS: u64 = 16; // ~60 FPS host loop

// Scoring
pub const GOAL_SCORE: u32 = 20;
pub const HIGH_SCORE_KEY: &str = "flappyHighScore";

// Cosmetic backdrop
pub const BACKDROP_SPEED: f64 = 40.0;
pub const BACKDROP_TILE_WIDTH: f64 = 256.0;
