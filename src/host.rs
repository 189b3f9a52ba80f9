//! Collaborator seams between the simulation and whatever hosts it.
//!
//! The core loop only reports events. Drawing, sound and score storage live
//! behind these traits so a terminal, a headless simulator and the tests can
//! each plug in their own.

use crate::core::error::Result;
use crate::core::geometry::{Aabb, Vec2};
use crate::obstacles::BarrierKind;
use std::collections::HashMap;

/// One drawable thing in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Player {
        center: Vec2,
        rotation_deg: f64,
        scale: f64,
    },
    Barrier {
        rect: Aabb,
        kind: BarrierKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Waiting for the first tap.
    GetReady,
    GameOver,
    GoalReached,
}

/// Heads-up display state, pushed whenever it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub banner: Option<Banner>,
    pub backdrop_offset: f64,
}

/// Retained-mode renderer: primitives are created once and then moved.
pub trait Renderer {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn spawn(&mut self, primitive: &Primitive) -> Self::Handle;
    fn update(&mut self, handle: Self::Handle, primitive: &Primitive);
    fn despawn(&mut self, handle: Self::Handle);
    fn set_hud(&mut self, hud: &Hud);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Flap,
    Score,
    Hit,
    Goal,
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Key-value store for the persisted best score.
pub trait HighScoreStore {
    fn load(&mut self, key: &str) -> Result<Option<u32>>;
    fn save(&mut self, key: &str, value: u32) -> Result<()>;
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Records cues in order. Used by the simulator for its summary counts.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<Cue>,
}

impl CueLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

/// In-process store that counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub values: HashMap<String, u32>,
    pub writes: usize,
}

impl MemoryScoreStore {
    pub fn with_value(key: &str, value: u32) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value);
        Self { values, writes: 0 }
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn load(&mut self, key: &str) -> Result<Option<u32>> {
        Ok(self.values.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// Renderer that only tracks what is alive. Handles are never reused.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub live: HashMap<u64, Primitive>,
    pub hud: Option<Hud>,
    pub spawned: usize,
    next_handle: u64,
}

impl Renderer for HeadlessRenderer {
    type Handle = u64;

    fn spawn(&mut self, primitive: &Primitive) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.spawned += 1;
        self.live.insert(handle, primitive.clone());
        handle
    }

    fn update(&mut self, handle: u64, primitive: &Primitive) {
        if let Some(slot) = self.live.get_mut(&handle) {
            *slot = primitive.clone();
        }
    }

    fn despawn(&mut self, handle: u64) {
        self.live.remove(&handle);
    }

    fn set_hud(&mut self, hud: &Hud) {
        self.hud = Some(hud.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", 4).unwrap();
        store.save("k", 9).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(9));
        assert_eq!(store.writes, 2);
    }

    #[test]
    fn test_headless_renderer_handles_unique() {
        let mut r = HeadlessRenderer::default();
        let p = Primitive::Barrier {
            rect: Aabb::new(0.0, 0.0, 1.0, 1.0),
            kind: BarrierKind::UpperBody,
        };
        let a = r.spawn(&p);
        r.despawn(a);
        let b = r.spawn(&p);
        assert_ne!(a, b);
        assert_eq!(r.live.len(), 1);
    }

    #[test]
    fn test_cue_log_counts() {
        let mut log = CueLog::default();
        log.play(Cue::Flap);
        log.play(Cue::Score);
        log.play(Cue::Flap);
        assert_eq!(log.count(Cue::Flap), 2);
        assert_eq!(log.count(Cue::Hit), 0);
    }
}
