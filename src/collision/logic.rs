//! Player-versus-barrier hit tests.

use super::mask::{PixelMask, SpritePose};
use crate::core::config::{CollisionStrategy, GameConfig};
use crate::core::geometry::{Aabb, Vec2};

/// Player motion over one frame, expressed in the obstacles' current frame
/// of reference. `previous` already includes the scroll displacement, so a
/// player that did not move vertically still sweeps horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub previous: SpritePose,
    pub current: SpritePose,
}

impl Sweep {
    pub fn new(previous: SpritePose, current: SpritePose) -> Self {
        Self { previous, current }
    }

    /// No motion this frame.
    pub fn stationary(pose: SpritePose) -> Self {
        Self {
            previous: pose,
            current: pose,
        }
    }

    pub fn displacement(&self) -> Vec2 {
        self.current.center - self.previous.center
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEngine {
    pub strategy: CollisionStrategy,
    pub hitbox_fraction: f64,
    pub sample_spacing: f64,
    pub max_samples: u32,
}

impl CollisionEngine {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            strategy: config.collision,
            hitbox_fraction: config.hitbox_fraction,
            sample_spacing: config.sweep_sample_spacing,
            max_samples: config.sweep_max_samples,
        }
    }

    pub fn hits(&self, mask: &PixelMask, sweep: &Sweep, barrier: &Aabb) -> bool {
        match self.strategy {
            CollisionStrategy::BoundingBox => {
                bounding_box_hit(mask, &sweep.current, self.hitbox_fraction, barrier)
            }
            CollisionStrategy::PixelMask => pixel_mask_hit(
                mask,
                sweep,
                barrier,
                self.sample_spacing,
                self.max_samples,
            ),
        }
    }
}

/// Hit-box centred on the player, sized as a fraction of the unrotated sprite.
pub fn hitbox(mask: &PixelMask, pose: &SpritePose, fraction: f64) -> Aabb {
    let hw = mask.width() as f64 * pose.scale * fraction * 0.5;
    let hh = mask.height() as f64 * pose.scale * fraction * 0.5;
    Aabb::from_center(pose.center, hw, hh)
}

pub fn bounding_box_hit(mask: &PixelMask, pose: &SpritePose, fraction: f64, barrier: &Aabb) -> bool {
    hitbox(mask, pose, fraction).overlaps(barrier)
}

/// Swept pixel-mask test.
///
/// 1. Union of previous and current sprite bounds, clipped to the barrier.
/// 2. Scan the mask at the current pose over that window.
/// 3. Otherwise walk interpolated poses between previous and current, with no
///    sprite point moving more than `sample_spacing` between samples (capped
///    at `max_samples`), scanning each against the unswept barrier.
pub fn pixel_mask_hit(
    mask: &PixelMask,
    sweep: &Sweep,
    barrier: &Aabb,
    sample_spacing: f64,
    max_samples: u32,
) -> bool {
    let swept = sweep.previous.bounds(mask).union(&sweep.current.bounds(mask));
    let Some(window) = swept.intersection(barrier) else {
        return false;
    };

    if mask.overlaps_region(&sweep.current, &window) {
        return true;
    }

    // Farthest any sprite point travels: centre motion plus the arc swept by
    // the corners as the sprite turns.
    let radius = 0.5
        * sweep.current.scale
        * (mask.width() as f64).hypot(mask.height() as f64);
    let turn = (sweep.current.rotation_deg - sweep.previous.rotation_deg)
        .to_radians()
        .abs();
    let travel = sweep.displacement().length() + turn * radius;
    let samples = ((travel / sample_spacing).ceil() as u32).clamp(1, max_samples.max(1));
    (0..=samples).any(|i| {
        let pose = sweep
            .previous
            .lerp(&sweep.current, i as f64 / samples as f64);
        match pose.bounds(mask).intersection(barrier) {
            Some(region) => mask.overlaps_region(&pose, &region),
            None => false,
        }
    })
}
