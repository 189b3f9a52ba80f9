//! Pipe spawning, scrolling and retirement.

use super::types::{Barrier, BarrierKind, ObstacleId, PipePair, ScoreZone};
use crate::core::config::GameConfig;
use crate::core::geometry::Aabb;
use rand::Rng;

/// Inclusive range for the gap's top edge.
///
/// `[margin, world_height - gap - margin]`, kept inside `[0, world_height - gap]`
/// so the whole gap fits in the world. When the world is too short the range
/// collapses to its lower bound instead of failing.
pub fn gap_top_range(world_height: f64, gap_height: f64, margin: f64) -> (f64, f64) {
    let room = (world_height - gap_height).max(0.0);
    let min = margin.clamp(0.0, room);
    let max = (world_height - gap_height - margin).clamp(0.0, room);
    if max < min {
        (min, min)
    } else {
        (min, max)
    }
}

/// Uniform draw of the gap's top edge, re-clamped afterwards.
pub fn draw_gap_top<R: Rng>(config: &GameConfig, rng: &mut R) -> f64 {
    let (min, max) = gap_top_range(config.world_height, config.gap_height, config.gap_margin);
    let drawn = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    drawn.clamp(min, max)
}

/// Centre of a freshly drawn gap.
pub fn draw_gap_center<R: Rng>(config: &GameConfig, rng: &mut R) -> f64 {
    draw_gap_top(config, rng) + config.gap_height * 0.5
}

/// Build a pipe pair whose body's left edge is at `x`.
pub fn build_pipe_pair(id: ObstacleId, x: f64, gap_center: f64, config: &GameConfig) -> PipePair {
    let world_h = config.world_height;
    let gap_top = (gap_center - config.gap_height * 0.5).clamp(0.0, world_h);
    let gap_bottom = (gap_center + config.gap_height * 0.5).clamp(gap_top, world_h);

    let body_w = config.pipe_width;
    let cap_x = x - config.cap_overhang;
    let cap_w = body_w + config.cap_overhang * 2.0;

    let upper_cap = config.cap_height.min(gap_top);
    let lower_cap = config.cap_height.min(world_h - gap_bottom);

    let pieces = [
        (
            BarrierKind::UpperBody,
            Aabb::new(x, 0.0, body_w, gap_top - upper_cap),
        ),
        (
            BarrierKind::UpperCap,
            Aabb::new(cap_x, gap_top - upper_cap, cap_w, upper_cap),
        ),
        (
            BarrierKind::LowerCap,
            Aabb::new(cap_x, gap_bottom, cap_w, lower_cap),
        ),
        (
            BarrierKind::LowerBody,
            Aabb::new(x, gap_bottom + lower_cap, body_w, world_h - gap_bottom - lower_cap),
        ),
    ];

    let barriers = pieces
        .into_iter()
        .filter(|(_, rect)| !rect.is_empty())
        .map(|(kind, rect)| Barrier { kind, rect })
        .collect();

    PipePair {
        id,
        x,
        gap_center,
        gap_top,
        gap_bottom,
        barriers,
        zone: ScoreZone {
            x: x + body_w * 0.5,
            top: gap_top,
            bottom: gap_bottom,
            passed: false,
        },
    }
}

/// Fixed-period spawn timer driven by frame time instead of a host callback.
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    /// Seconds since the last spawn (or since the timer was armed).
    pub elapsed: f64,
    pub next_id: ObstacleId,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arm the timer. Ids keep counting so renderer keys never repeat.
    pub fn rearm(&mut self) {
        self.elapsed = 0.0;
    }

    /// Accumulate `dt` and emit one pipe per elapsed period at the world's
    /// right edge.
    pub fn advance<R: Rng>(&mut self, dt: f64, config: &GameConfig, rng: &mut R) -> Vec<PipePair> {
        let mut spawned = Vec::new();
        self.elapsed += dt;
        while self.elapsed >= config.spawn_period_secs {
            self.elapsed -= config.spawn_period_secs;
            let gap_center = draw_gap_center(config, rng);
            spawned.push(build_pipe_pair(
                self.next_id,
                config.world_width,
                gap_center,
                config,
            ));
            self.next_id += 1;
        }
        spawned
    }
}

pub fn scroll_pipes(pipes: &mut [PipePair], dx: f64) {
    for pipe in pipes {
        pipe.shift_x(dx);
    }
}

/// Remove pipes whose trailing edge has passed the left world edge.
pub fn retire_offscreen(pipes: &mut Vec<PipePair>) -> Vec<ObstacleId> {
    let mut retired = Vec::new();
    pipes.retain(|p| {
        if p.trailing_edge() < 0.0 {
            retired.push(p.id);
            false
        } else {
            true
        }
    });
    retired
}
