//! Keeps renderer primitives in step with the simulation.
//!
//! Handles are held in a side table keyed by [`PieceKey`] so the simulation
//! types stay free of renderer state. Retired pipes lose their handles on the
//! next sync.

use crate::core::session::GameSession;
use crate::host::{Primitive, Renderer};
use crate::obstacles::PieceKey;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct SceneSync<H> {
    pub player: Option<H>,
    pub pieces: HashMap<PieceKey, H>,
}

impl<H> Default for SceneSync<H> {
    fn default() -> Self {
        Self {
            player: None,
            pieces: HashMap::new(),
        }
    }
}

impl<H: Copy> SceneSync<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn, move or despawn primitives so the renderer shows exactly the
    /// session's live player and barriers.
    pub fn sync<R>(&mut self, renderer: &mut R, session: &GameSession)
    where
        R: Renderer<Handle = H>,
    {
        let player = Primitive::Player {
            center: session.player.position,
            rotation_deg: session.player.rotation_deg,
            scale: session.player.scale,
        };
        match self.player {
            Some(handle) => renderer.update(handle, &player),
            None => self.player = Some(renderer.spawn(&player)),
        }

        let mut seen = HashSet::new();
        for pipe in &session.pipes {
            for barrier in &pipe.barriers {
                let key = pipe.piece_key(barrier.kind);
                let primitive = Primitive::Barrier {
                    rect: barrier.rect,
                    kind: barrier.kind,
                };
                match self.pieces.get(&key) {
                    Some(handle) => renderer.update(*handle, &primitive),
                    None => {
                        let handle = renderer.spawn(&primitive);
                        self.pieces.insert(key, handle);
                    }
                }
                seen.insert(key);
            }
        }

        self.pieces.retain(|key, handle| {
            if seen.contains(key) {
                true
            } else {
                renderer.despawn(*handle);
                false
            }
        });
    }

    /// Despawn everything, including the player.
    pub fn clear<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        if let Some(handle) = self.player.take() {
            renderer.despawn(handle);
        }
        for (_, handle) in self.pieces.drain() {
            renderer.despawn(handle);
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}
