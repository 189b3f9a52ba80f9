//! Pipe pair data: barriers, gap and score zone.
//!
//! Plain simulation records. Renderer handles live in [`crate::scene`],
//! keyed by [`PieceKey`], never on these structs.

use crate::core::geometry::{Aabb, Vec2};

pub type ObstacleId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierKind {
    UpperBody,
    UpperCap,
    LowerCap,
    LowerBody,
}

impl BarrierKind {
    pub fn is_cap(&self) -> bool {
        matches!(self, Self::UpperCap | Self::LowerCap)
    }
}

/// One solid rectangle of a pipe pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub kind: BarrierKind,
    pub rect: Aabb,
}

/// Identifies one barrier of one pipe pair across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceKey {
    pub obstacle: ObstacleId,
    pub kind: BarrierKind,
}

/// Invisible strip at the pipe's centre line spanning the gap. Passing it
/// scores once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreZone {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub id: ObstacleId,
    /// Left edge of the pipe body.
    pub x: f64,
    pub gap_center: f64,
    /// Top edge of the gap (bottom of the upper barrier).
    pub gap_top: f64,
    /// Bottom edge of the gap (top of the lower barrier).
    pub gap_bottom: f64,
    /// Non-empty solid pieces only.
    pub barriers: Vec<Barrier>,
    pub zone: ScoreZone,
}

impl PipePair {
    /// Moves every piece horizontally by `dx`.
    pub fn shift_x(&mut self, dx: f64) {
        let offset = Vec2::new(dx, 0.0);
        self.x += dx;
        self.zone.x += dx;
        for barrier in &mut self.barriers {
            barrier.rect = barrier.rect.translate(offset);
        }
    }

    /// Rightmost extent of any piece (caps overhang the body).
    pub fn trailing_edge(&self) -> f64 {
        self.barriers
            .iter()
            .map(|b| b.rect.max_x)
            .fold(self.zone.x, f64::max)
    }

    pub fn upper_height(&self) -> f64 {
        self.gap_top
    }

    pub fn lower_height(&self, world_height: f64) -> f64 {
        world_height - self.gap_bottom
    }

    pub fn piece_key(&self, kind: BarrierKind) -> PieceKey {
        PieceKey {
            obstacle: self.id,
            kind,
        }
    }
}
