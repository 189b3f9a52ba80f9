//! Pipe obstacles: paired barriers around a random gap, scrolling left at a
//! constant speed, each carrying a one-shot score zone.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
