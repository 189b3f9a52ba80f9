//! Per-pixel opacity masks and the sprite transform used to scan them.

use crate::core::error::{FlappyError, Result};
use crate::core::geometry::{Aabb, Vec2};

/// Opaque/transparent grid matching a sprite's un-scaled pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

impl PixelMask {
    pub fn new(width: u32, height: u32, opaque: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FlappyError::InvalidMask(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize;
        if opaque.len() != expected {
            return Err(FlappyError::InvalidMask(format!(
                "expected {expected} cells, got {}",
                opaque.len()
            )));
        }
        Ok(Self {
            width,
            height,
            opaque,
        })
    }

    /// Build from RGBA8 pixels. A pixel is opaque when its alpha exceeds
    /// `alpha_threshold`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], alpha_threshold: u8) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(FlappyError::InvalidMask(format!(
                "expected {expected} RGBA bytes, got {}",
                rgba.len()
            )));
        }
        let opaque = rgba
            .chunks_exact(4)
            .map(|px| px[3] > alpha_threshold)
            .collect();
        Self::new(width, height, opaque)
    }

    /// Build from text rows: `.` and space are transparent, anything else opaque.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;
        let mut opaque = Vec::with_capacity(width as usize * height as usize);
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(FlappyError::InvalidMask(format!(
                    "row {i} has {} columns, expected {width}",
                    row.chars().count()
                )));
            }
            opaque.extend(row.chars().map(|c| c != '.' && c != ' '));
        }
        Self::new(width, height, opaque)
    }

    /// Fully opaque mask; makes the pixel test degenerate to the sprite rectangle.
    pub fn solid(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, vec![true; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-range coordinates are transparent.
    pub fn is_opaque(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.opaque[y as usize * self.width as usize + x as usize]
    }

    pub fn opaque_count(&self) -> usize {
        self.opaque.iter().filter(|&&o| o).count()
    }

    /// True if any opaque pixel of the sprite, placed at `pose`, overlaps
    /// `region` in world space.
    ///
    /// The region is mapped into mask space (inverse rotate, inverse scale)
    /// to bound the scan; each opaque pixel in that window is then mapped
    /// back to world space and tested against the region.
    pub fn overlaps_region(&self, pose: &SpritePose, region: &Aabb) -> bool {
        if region.is_empty() {
            return false;
        }

        let mut lo_x = f64::INFINITY;
        let mut lo_y = f64::INFINITY;
        let mut hi_x = f64::NEG_INFINITY;
        let mut hi_y = f64::NEG_INFINITY;
        for corner in region.corners() {
            let m = pose.world_to_mask(corner, self);
            lo_x = lo_x.min(m.x);
            lo_y = lo_y.min(m.y);
            hi_x = hi_x.max(m.x);
            hi_y = hi_y.max(m.y);
        }

        // One pixel of slack so partially covered edge pixels are visited.
        let x0 = (lo_x.floor() as i64 - 1).max(0);
        let y0 = (lo_y.floor() as i64 - 1).max(0);
        let x1 = (hi_x.ceil() as i64 + 1).min(self.width as i64 - 1);
        let y1 = (hi_y.ceil() as i64 + 1).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return false;
        }

        let half_extent = pose.pixel_half_extent();
        for my in y0..=y1 {
            for mx in x0..=x1 {
                if !self.is_opaque(mx, my) {
                    continue;
                }
                let c = pose.mask_to_world(Vec2::new(mx as f64 + 0.5, my as f64 + 0.5), self);
                if c.x - half_extent < region.max_x
                    && c.x + half_extent > region.min_x
                    && c.y - half_extent < region.max_y
                    && c.y + half_extent > region.min_y
                {
                    return true;
                }
            }
        }
        false
    }
}

/// Placement of a sprite in the world: centre, scale and visual rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePose {
    pub center: Vec2,
    /// Degrees, positive is clockwise on screen (nose down).
    pub rotation_deg: f64,
    /// World units per sprite pixel.
    pub scale: f64,
}

impl SpritePose {
    pub fn new(center: Vec2, rotation_deg: f64, scale: f64) -> Self {
        Self {
            center,
            rotation_deg,
            scale,
        }
    }

    /// Interpolate position and angle between two poses.
    pub fn lerp(&self, other: &SpritePose, t: f64) -> SpritePose {
        SpritePose {
            center: self.center.lerp(other.center, t),
            rotation_deg: self.rotation_deg + (other.rotation_deg - self.rotation_deg) * t,
            scale: self.scale,
        }
    }

    /// World-space AABB of the rotated sprite rectangle.
    pub fn bounds(&self, mask: &PixelMask) -> Aabb {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let hw = mask.width() as f64 * self.scale * 0.5;
        let hh = mask.height() as f64 * self.scale * 0.5;
        let ex = cos.abs() * hw + sin.abs() * hh;
        let ey = sin.abs() * hw + cos.abs() * hh;
        Aabb::from_center(self.center, ex, ey)
    }

    fn world_to_mask(&self, world: Vec2, mask: &PixelMask) -> Vec2 {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let d = world - self.center;
        let lx = d.x * cos + d.y * sin;
        let ly = -d.x * sin + d.y * cos;
        Vec2::new(
            lx / self.scale + mask.width() as f64 * 0.5,
            ly / self.scale + mask.height() as f64 * 0.5,
        )
    }

    fn mask_to_world(&self, local: Vec2, mask: &PixelMask) -> Vec2 {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let lx = (local.x - mask.width() as f64 * 0.5) * self.scale;
        let ly = (local.y - mask.height() as f64 * 0.5) * self.scale;
        Vec2::new(
            self.center.x + lx * cos - ly * sin,
            self.center.y + lx * sin + ly * cos,
        )
    }

    /// Half side of the world AABB covering one rotated mask pixel.
    fn pixel_half_extent(&self) -> f64 {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        self.scale * 0.5 * (sin.abs() + cos.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> PixelMask {
        // Opaque border, transparent 2x2 hole in the middle.
        PixelMask::from_rows(&["####", "#..#", "#..#", "####"]).unwrap()
    }

    #[test]
    fn test_from_rows_dimensions() {
        let m = ring();
        assert_eq!(m.width(), 4);
        assert_eq!(m.height(), 4);
        assert_eq!(m.opaque_count(), 12);
        assert!(m.is_opaque(0, 0));
        assert!(!m.is_opaque(1, 1));
        assert!(!m.is_opaque(-1, 0));
        assert!(!m.is_opaque(4, 0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = PixelMask::from_rows(&["###", "##"]).unwrap_err();
        assert!(matches!(err, FlappyError::InvalidMask(_)));
    }

    #[test]
    fn test_empty_mask_rejected() {
        assert!(PixelMask::from_rows(&[]).is_err());
        assert!(PixelMask::new(0, 3, vec![]).is_err());
    }

    #[test]
    fn test_from_rgba_uses_alpha() {
        let rgba = [
            255, 0, 0, 255, // opaque
            255, 0, 0, 0, // clear
            0, 0, 0, 10, // below threshold
            0, 0, 0, 200, // opaque
        ];
        let m = PixelMask::from_rgba(2, 2, &rgba, 16).unwrap();
        assert!(m.is_opaque(0, 0));
        assert!(!m.is_opaque(1, 0));
        assert!(!m.is_opaque(0, 1));
        assert!(m.is_opaque(1, 1));
    }

    #[test]
    fn test_from_rgba_length_mismatch() {
        assert!(PixelMask::from_rgba(2, 2, &[0u8; 15], 0).is_err());
    }

    #[test]
    fn test_bounds_unrotated() {
        let m = ring();
        let pose = SpritePose::new(Vec2::new(100.0, 50.0), 0.0, 2.0);
        let b = pose.bounds(&m);
        assert_eq!(b, Aabb::new(96.0, 46.0, 8.0, 8.0));
    }

    #[test]
    fn test_bounds_rotated_grow() {
        let m = PixelMask::solid(10, 2).unwrap();
        let flat = SpritePose::new(Vec2::ZERO, 0.0, 1.0).bounds(&m);
        let tilted = SpritePose::new(Vec2::ZERO, 20.0, 1.0).bounds(&m);
        assert!(tilted.height() > flat.height());
    }

    #[test]
    fn test_region_inside_hole_is_clear() {
        let m = ring();
        let pose = SpritePose::new(Vec2::new(0.0, 0.0), 0.0, 10.0);
        // Sprite spans -20..20; the hole is -10..10.
        let hole = Aabb::new(-8.0, -8.0, 16.0, 16.0);
        assert!(!m.overlaps_region(&pose, &hole));
        let border = Aabb::new(-19.0, -5.0, 4.0, 4.0);
        assert!(m.overlaps_region(&pose, &border));
    }

    #[test]
    fn test_region_outside_sprite_is_clear() {
        let m = PixelMask::solid(4, 4).unwrap();
        let pose = SpritePose::new(Vec2::ZERO, 0.0, 1.0);
        assert!(!m.overlaps_region(&pose, &Aabb::new(5.0, 5.0, 3.0, 3.0)));
    }

    #[test]
    fn test_rotation_moves_opaque_pixels() {
        // Single opaque pixel at the right end of a horizontal bar.
        let m = PixelMask::from_rows(&["........#"]).unwrap();
        let flat = SpritePose::new(Vec2::ZERO, 0.0, 10.0);
        // Unrotated, the pixel centre sits at x = 40, y = 0.
        let probe = Aabb::new(36.0, -4.0, 8.0, 8.0);
        assert!(m.overlaps_region(&flat, &probe));

        // Rotated 90 degrees clockwise it points down: x = 0, y = 40.
        let turned = SpritePose::new(Vec2::ZERO, 90.0, 10.0);
        assert!(!m.overlaps_region(&turned, &probe));
        assert!(m.overlaps_region(&turned, &Aabb::new(-4.0, 36.0, 8.0, 8.0)));
    }
}
