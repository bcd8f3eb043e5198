//! Tile grid, walls and passability.

use glam::Vec2;
use masquerade_core::{
    config::{RoomConfig, WallSegment},
    coords::tile_to_pixel,
    Color, Palette, PixelRect, TileIndex,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::CONTACT_TOLERANCE;

/// Reasons a room layout is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RoomError {
    /// The grid has no columns or no rows.
    #[error("room grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The surface to cover has no area.
    #[error("surface must have a positive size, got {width}x{height}")]
    EmptySurface {
        /// Requested surface width.
        width: f32,
        /// Requested surface height.
        height: f32,
    },
    /// The spawn tile lies outside the grid.
    #[error("spawn tile {spawn:?} lies outside the {columns}x{rows} grid")]
    SpawnOutOfBounds {
        /// Requested spawn tile.
        spawn: TileIndex,
        /// Grid column count.
        columns: u32,
        /// Grid row count.
        rows: u32,
    },
    /// A wall segment reaches outside the grid.
    #[error("wall {segment:?} reaches outside the {columns}x{rows} grid")]
    WallOutOfBounds {
        /// Rejected segment.
        segment: WallSegment,
        /// Grid column count.
        columns: u32,
        /// Grid row count.
        rows: u32,
    },
}

/// Single floor cell as of the last [`Room::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    color: Color,
    passable: bool,
    rect: PixelRect,
}

impl Tile {
    /// Color the presentation layer paints the tile with.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Whether entities may stand on the tile.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }

    /// Pixel rectangle at the current zoomed tile size.
    #[must_use]
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }
}

/// Wall registered as a tile segment and rasterized on every build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    segment: WallSegment,
    rect: PixelRect,
}

impl Wall {
    fn new(segment: WallSegment) -> Self {
        Self {
            segment,
            rect: PixelRect::default(),
        }
    }

    /// Tile segment the wall was registered with.
    #[must_use]
    pub const fn segment(&self) -> WallSegment {
        self.segment
    }

    /// Pixel rectangle at the current zoomed tile size.
    #[must_use]
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }
}

/// Mutable, rebuildable room.
///
/// Tiles and wall rectangles are consistent with [`Room::tile_size`] only after
/// [`Room::build`] has run following the last zoom change or wall registration.
#[derive(Clone, Debug)]
pub struct Room {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    walls: Vec<Wall>,
    spawn: TileIndex,
    palette: Palette,
    zoom: f32,
    base_tile_size: f32,
    zoomed_tile_size: f32,
}

impl Room {
    /// Creates a room covering `surface` with the four border walls in place.
    ///
    /// The base tile size is the larger of the two per-axis fits, so the room
    /// always covers the whole surface.
    pub fn new(
        columns: u32,
        rows: u32,
        surface: Vec2,
        spawn: TileIndex,
    ) -> Result<Self, RoomError> {
        if columns == 0 || rows == 0 {
            return Err(RoomError::EmptyGrid { columns, rows });
        }
        if !(surface.x > 0.0 && surface.y > 0.0) {
            return Err(RoomError::EmptySurface {
                width: surface.x,
                height: surface.y,
            });
        }
        if spawn.column() >= columns || spawn.row() >= rows {
            return Err(RoomError::SpawnOutOfBounds {
                spawn,
                columns,
                rows,
            });
        }

        let base_tile_size = (surface.x / columns as f32).max(surface.y / rows as f32);
        let last_column = columns - 1;
        let last_row = rows - 1;
        let borders = [
            WallSegment::new(TileIndex::new(0, 0), TileIndex::new(last_column, 0)),
            WallSegment::new(TileIndex::new(0, 0), TileIndex::new(0, last_row)),
            WallSegment::new(
                TileIndex::new(last_column, 0),
                TileIndex::new(last_column, last_row),
            ),
            WallSegment::new(
                TileIndex::new(0, last_row),
                TileIndex::new(last_column, last_row),
            ),
        ];

        let mut room = Self {
            columns,
            rows,
            tiles: Vec::new(),
            walls: borders.into_iter().map(Wall::new).collect(),
            spawn,
            palette: Palette::default(),
            zoom: 1.0,
            base_tile_size,
            zoomed_tile_size: base_tile_size,
        };
        room.build();
        Ok(room)
    }

    /// Creates and builds a room from its configuration.
    pub fn from_config(config: &RoomConfig) -> Result<Self, RoomError> {
        let mut room = Self::new(
            config.columns,
            config.rows,
            Vec2::new(config.surface_width, config.surface_height),
            config.spawn,
        )?;
        room.palette = config.palette;
        for segment in &config.walls {
            room.register_wall(*segment)?;
        }
        room.build();
        debug!(
            columns = room.columns,
            rows = room.rows,
            walls = room.walls.len(),
            tile_size = room.base_tile_size,
            "room built"
        );
        Ok(room)
    }

    /// Registers an extra wall. Takes effect on the next [`Room::build`].
    pub fn register_wall(&mut self, segment: WallSegment) -> Result<(), RoomError> {
        let inside = |tile: TileIndex| tile.column() < self.columns && tile.row() < self.rows;
        if !inside(segment.start) || !inside(segment.end) {
            return Err(RoomError::WallOutOfBounds {
                segment,
                columns: self.columns,
                rows: self.rows,
            });
        }
        self.walls.push(Wall::new(segment));
        Ok(())
    }

    /// Replaces the palette. Takes effect on the next [`Room::build`].
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Changes the zoom level. Takes effect on the next [`Room::build`].
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// Recomputes the zoomed tile size, rasterizes walls and rebuilds the grid.
    pub fn build(&mut self) {
        self.zoomed_tile_size = self.base_tile_size * self.zoom;
        let size = self.zoomed_tile_size;

        for wall in &mut self.walls {
            wall.rect = segment_rect(wall.segment, size);
        }

        self.tiles.clear();
        self.tiles
            .reserve((self.columns as usize).saturating_mul(self.rows as usize));
        for row in 0..self.rows {
            for column in 0..self.columns {
                let rect = tile_rect(TileIndex::new(column, row), size);
                let passable = !self
                    .walls
                    .iter()
                    .any(|wall| wall.rect.overlaps_beyond(&rect, CONTACT_TOLERANCE));
                let color = if !passable {
                    self.palette.wall
                } else if (column + row) % 2 == 0 {
                    self.palette.floor_primary
                } else {
                    self.palette.floor_secondary
                };
                self.tiles.push(Tile {
                    color,
                    passable,
                    rect,
                });
            }
        }
        trace!(zoom = self.zoom, tile_size = size, "tiles rebuilt");
    }

    /// Whether the tile may be stood on. Tiles outside the grid are impassable.
    #[must_use]
    pub fn is_passable(&self, tile: TileIndex) -> bool {
        self.tile(tile).is_some_and(Tile::passable)
    }

    /// Whether every tile of the `columns`×`rows` block whose upper-left tile is
    /// `anchor` lies inside the grid and is passable.
    #[must_use]
    pub fn region_is_passable(&self, anchor: TileIndex, columns: u32, rows: u32) -> bool {
        let column = i64::from(anchor.column());
        let row = i64::from(anchor.row());
        (0..i64::from(rows)).all(|dy| {
            (0..i64::from(columns)).all(|dx| {
                self.tile_at(column + dx, row + dy)
                    .is_some_and(|tile| self.is_passable(tile))
            })
        })
    }

    /// Tile at the provided index, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, tile: TileIndex) -> Option<&Tile> {
        self.index(tile).and_then(|index| self.tiles.get(index))
    }

    /// Resolves a signed tile coordinate to an index inside the grid.
    #[must_use]
    pub fn tile_at(&self, column: i64, row: i64) -> Option<TileIndex> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        (column < self.columns && row < self.rows).then(|| TileIndex::new(column, row))
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Registered walls, borders first.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Player spawn tile.
    #[must_use]
    pub const fn spawn(&self) -> TileIndex {
        self.spawn
    }

    /// Raw (zoom-independent) pixel position of the spawn tile.
    #[must_use]
    pub fn spawn_position(&self) -> Vec2 {
        self.spawn.to_pixel(self.base_tile_size)
    }

    /// Current zoom level.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Tile size at zoom level one.
    #[must_use]
    pub const fn base_tile_size(&self) -> f32 {
        self.base_tile_size
    }

    /// Tile size at the current zoom level, as of the last build.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.zoomed_tile_size
    }

    /// Pixel size of the whole room at the current zoom level.
    #[must_use]
    pub fn pixel_size(&self) -> Vec2 {
        tile_to_pixel(
            Vec2::new(self.columns as f32, self.rows as f32),
            self.zoomed_tile_size,
        )
    }

    fn index(&self, tile: TileIndex) -> Option<usize> {
        if tile.column() < self.columns && tile.row() < self.rows {
            let row = usize::try_from(tile.row()).ok()?;
            let column = usize::try_from(tile.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn tile_rect(tile: TileIndex, size: f32) -> PixelRect {
    let origin = tile.to_pixel(size);
    PixelRect::from_position_size(origin, Vec2::splat(size))
}

fn segment_rect(segment: WallSegment, size: f32) -> PixelRect {
    let first = TileIndex::new(
        segment.start.column().min(segment.end.column()),
        segment.start.row().min(segment.end.row()),
    );
    let last = TileIndex::new(
        segment.start.column().max(segment.end.column()) + 1,
        segment.start.row().max(segment.end.row()) + 1,
    );
    let origin = first.to_pixel(size);
    PixelRect::from_position_size(origin, last.to_pixel(size) - origin)
}
