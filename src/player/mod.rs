//! The player-controlled shrimp: state, kinematics and sprite mask.

pub mod logic;
pub mod sprite;
pub mod types;

pub use logic::*;
pub use sprite::*;
pub use types::*;
