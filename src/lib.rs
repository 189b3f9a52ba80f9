//! Flappy Shrimp - collision and scoring core for a flappy-style game.
//!
//! The simulation (`core::session`) is pure and deterministic given a seeded
//! RNG; hosts plug in through the traits in `host`. The terminal binary and
//! the headless simulator are both thin shells over `core::Driver`.

pub mod collision;
pub mod core;
pub mod host;
pub mod input;
pub mod obstacles;
pub mod player;
pub mod scene;
pub mod scoring;
pub mod ui;
pub mod utils;
