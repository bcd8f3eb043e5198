//! Spatial body shared by the player, the NPCs and the monster.

use glam::Vec2;
use masquerade_core::{Facing, Health, PixelRect, SpriteExtent};

use crate::{collision::resolve_against_walls, room::Room};

/// Position, hurtbox, facing and health of one character.
///
/// The raw position is measured in pixels at zoom level one. Everything the
/// collision resolver and the presentation layer look at (zoomed position,
/// model scale, hurtbox) is derived from it and refreshed immediately after
/// every position or zoom change.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    health: Health,
    speed: f32,
    position: Vec2,
    zoomed_position: Vec2,
    sprite: SpriteExtent,
    base_scale: f32,
    scale: f32,
    zoom: f32,
    hurtbox: PixelRect,
    facing: Facing,
}

impl Character {
    /// Places a new character at the raw `position` inside `room`.
    ///
    /// `speed` is measured in raw pixels per millisecond. The sprite is scaled
    /// so its shorter side spans one tile.
    #[must_use]
    pub fn spawn(
        room: &Room,
        position: Vec2,
        sprite: SpriteExtent,
        speed: f32,
        health: Health,
    ) -> Self {
        let mut character = Self {
            health,
            speed,
            position,
            zoomed_position: position,
            sprite,
            base_scale: sprite.scale_to_tile(room.base_tile_size()),
            scale: 1.0,
            zoom: room.zoom(),
            hurtbox: PixelRect::default(),
            facing: Facing::Right,
        };
        character.refresh();
        character
    }

    /// Re-derives zoomed position, model scale and hurtbox for `zoom`.
    ///
    /// Dead characters are left untouched.
    pub fn update(&mut self, zoom: f32) {
        if !self.is_alive() {
            return;
        }
        self.zoom = zoom;
        self.refresh();
    }

    /// Moves `distance` raw pixels along `direction`, sliding along walls.
    ///
    /// The direction is normalized first; a zero direction leaves the
    /// character in place apart from any wall push-out.
    pub fn move_along(&mut self, direction: Vec2, distance: f32, room: &Room) {
        let step = direction.normalize_or_zero() * distance * self.zoom;
        let tentative = self.hurtbox.translated(step);
        let resolved = resolve_against_walls(tentative, room.walls());
        self.position = resolved.position() / self.zoom;
        self.refresh();
    }

    /// Takes one point of damage if `hitbox` overlaps the hurtbox.
    ///
    /// Returns `true` when health was lost. Nothing prevents the same hitbox
    /// from landing again on the next call.
    pub fn check_hitbox_collision(&mut self, hitbox: &PixelRect) -> bool {
        if !self.is_alive() || !self.hurtbox.overlaps(hitbox) {
            return false;
        }
        self.health = self.health.decremented();
        true
    }

    /// Teleports to the raw `position` and refreshes derived state.
    pub fn force_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh();
    }

    /// Raw position of the upper-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Raw position of the hurtbox center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.raw_size() * 0.5
    }

    /// Hurtbox size at zoom level one.
    #[must_use]
    pub fn raw_size(&self) -> Vec2 {
        self.sprite.scaled(self.base_scale)
    }

    /// Position at the current zoom level.
    #[must_use]
    pub const fn zoomed_position(&self) -> Vec2 {
        self.zoomed_position
    }

    /// Current hurtbox in zoomed pixel-space.
    #[must_use]
    pub const fn hurtbox(&self) -> PixelRect {
        self.hurtbox
    }

    /// Sprite scale at the current zoom level.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Opaque sprite extent the hurtbox derives from.
    #[must_use]
    pub const fn sprite(&self) -> SpriteExtent {
        self.sprite
    }

    /// Zoom level the derived state was computed for.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Overwrites the remaining hit points.
    pub fn set_health(&mut self, health: Health) {
        self.health = health;
    }

    /// Whether any hit points remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Movement speed in raw pixels per millisecond.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Direction the sprite faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Turns the sprite.
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Number of tiles the hurtbox spans along each axis, rounded up.
    #[must_use]
    pub fn footprint_tiles(&self, tile_size: f32) -> (u32, u32) {
        let size = self.raw_size() / tile_size;
        (
            size.x.ceil().max(1.0) as u32,
            size.y.ceil().max(1.0) as u32,
        )
    }

    fn refresh(&mut self) {
        self.zoomed_position = self.position * self.zoom;
        self.scale = self.base_scale * self.zoom;
        self.hurtbox =
            PixelRect::from_position_size(self.zoomed_position, self.sprite.scaled(self.scale));
    }
}
