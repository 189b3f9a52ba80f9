//! Simulation core: configuration, geometry, the session loop and its driver.

pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod session;
pub mod tick;

pub use config::{CollisionStrategy, DeathMotion, GameConfig};
pub use driver::Driver;
pub use error::{FlappyError, Result};
pub use geometry::{Aabb, Vec2};
pub use session::{GameInput, GamePhase, GameSession};
pub use tick::{DeathCause, TickEvent, TickResult};
