//! Player state.

use crate::collision::{PixelMask, SpritePose};
use crate::core::geometry::{Aabb, Vec2};

#[derive(Debug, Clone)]
pub struct Player {
    /// Sprite centre in world units.
    pub position: Vec2,
    /// Vertical velocity (positive = downward). Horizontal velocity is always
    /// zero; the world scrolls instead.
    pub velocity_y: f64,
    /// Visual rotation in degrees, positive = nose down.
    pub rotation_deg: f64,
    pub alive: bool,
    /// Off while idling before the first start input.
    pub gravity_enabled: bool,

    /// Position and rotation at the start of the current frame.
    pub previous_position: Vec2,
    pub previous_rotation_deg: f64,

    /// Opacity mask of the un-scaled sprite, built once at creation.
    pub mask: PixelMask,
    /// World units per sprite pixel.
    pub scale: f64,
}

impl Player {
    pub fn new(spawn: Vec2, mask: PixelMask, scale: f64) -> Self {
        Self {
            position: spawn,
            velocity_y: 0.0,
            rotation_deg: 0.0,
            alive: true,
            gravity_enabled: false,
            previous_position: spawn,
            previous_rotation_deg: 0.0,
            mask,
            scale,
        }
    }

    /// Back to the idle float at `spawn`, keeping the mask.
    pub fn reset(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.previous_position = spawn;
        self.velocity_y = 0.0;
        self.rotation_deg = 0.0;
        self.previous_rotation_deg = 0.0;
        self.alive = true;
        self.gravity_enabled = false;
    }

    pub fn pose(&self) -> SpritePose {
        SpritePose::new(self.position, self.rotation_deg, self.scale)
    }

    pub fn previous_pose(&self) -> SpritePose {
        SpritePose::new(self.previous_position, self.previous_rotation_deg, self.scale)
    }

    pub fn display_width(&self) -> f64 {
        self.mask.width() as f64 * self.scale
    }

    pub fn display_height(&self) -> f64 {
        self.mask.height() as f64 * self.scale
    }

    /// Unrotated sprite rectangle, including transparent padding.
    pub fn display_bounds(&self) -> Aabb {
        Aabb::from_center(
            self.position,
            self.display_width() * 0.5,
            self.display_height() * 0.5,
        )
    }
}
