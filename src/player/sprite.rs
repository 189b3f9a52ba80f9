//! Built-in shrimp silhouette. Hosts with real artwork build their own mask
//! with [`PixelMask::from_rgba`].

use crate::collision::PixelMask;
use crate::core::error::Result;

/// 16x11 shrimp facing right; `.` is transparent.
pub const SHRIMP_ROWS: [&str; 11] = [
    "................",
    "......#####.....",
    "....#########...",
    "..###########.#.",
    ".#############..",
    "##############..",
    ".####.#######...",
    "..##...#####....",
    "......#.##.#....",
    ".....#..#...#...",
    "................",
];

pub fn shrimp_mask() -> Result<PixelMask> {
    PixelMask::from_rows(&SHRIMP_ROWS)
}
