//! Collision engine: opacity masks, swept bounds and interpolated sampling,
//! with a plain bounding-box fallback strategy.

pub mod logic;
pub mod mask;

pub use logic::*;
pub use mask::*;
