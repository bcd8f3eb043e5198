//! Conversions between tile-space and pixel-space.
//!
//! Tile coordinates count whole room cells; pixel coordinates are measured in
//! rendering-surface units under the current (zoomed) tile size. Converting
//! pixels back to tiles always floors, so a pixel lying exactly on a tile
//! boundary belongs to the tile that starts there.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fraction of a tile tolerated when flooring, absorbing float rounding in
/// `tile * size / size`.
const FLOOR_TOLERANCE: f32 = 1e-4;

/// Converts a tile coordinate into pixels.
#[must_use]
pub fn tile_to_pixel(tile: Vec2, tile_size: f32) -> Vec2 {
    tile * tile_size
}

/// Converts a pixel coordinate into the index of the tile containing it.
#[must_use]
pub fn pixel_to_tile(pixel: Vec2, tile_size: f32) -> Vec2 {
    (pixel / tile_size + Vec2::splat(FLOOR_TOLERANCE)).floor()
}

/// Column/row index of a single tile in the room grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    column: u32,
    row: u32,
}

impl TileIndex {
    /// Creates a new tile index.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Finds the tile containing the provided pixel, or `None` when the pixel
    /// lies left of or above the room origin.
    #[must_use]
    pub fn from_pixel(pixel: Vec2, tile_size: f32) -> Option<Self> {
        let tile = pixel_to_tile(pixel, tile_size);
        if tile.x < 0.0 || tile.y < 0.0 || !tile.is_finite() {
            return None;
        }
        Some(Self::new(tile.x as u32, tile.y as u32))
    }

    /// Pixel coordinate of the tile's upper-left corner.
    #[must_use]
    pub fn to_pixel(self, tile_size: f32) -> Vec2 {
        tile_to_pixel(self.as_vec2(), tile_size)
    }

    /// Tile index as a floating point coordinate.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32)
    }
}
