//! Axis-separated sliding resolution of hurtboxes against walls.
//!
//! Resolution is discrete: the hurtbox is moved to its tentative position and
//! then pushed out of each wall in registration order. Each push happens along
//! the thinner axis of the overlap, which lets an entity slide along a wall
//! instead of sticking to it. Walls later in the list see the already-pushed
//! hurtbox, so a corner formed by two walls may take more than one call to
//! settle.

use glam::Vec2;
use masquerade_core::PixelRect;

use crate::{room::Wall, CONTACT_TOLERANCE};

/// Pushes `hurtbox` out of every wall it penetrates and returns the result.
#[must_use]
pub fn resolve_against_walls(hurtbox: PixelRect, walls: &[Wall]) -> PixelRect {
    walls.iter().fold(hurtbox, |hurtbox, wall| {
        hurtbox.translated(push_out(&hurtbox, &wall.rect()))
    })
}

/// Returns `true` when `hurtbox` penetrates any wall.
#[must_use]
pub fn collides_with_any(hurtbox: &PixelRect, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| penetrates(hurtbox, &wall.rect()))
}

/// Offset that separates `hurtbox` from `obstacle`, or zero when they merely
/// touch or are apart.
///
/// Ties between overlap width and height push vertically.
#[must_use]
pub fn push_out(hurtbox: &PixelRect, obstacle: &PixelRect) -> Vec2 {
    let overlap = hurtbox.intersection(obstacle);
    if !(overlap.width > CONTACT_TOLERANCE && overlap.height > CONTACT_TOLERANCE) {
        return Vec2::ZERO;
    }

    let push = if overlap.height <= overlap.width {
        Vec2::new(0.0, overlap.height)
    } else {
        Vec2::new(overlap.width, 0.0)
    };

    if penetrates(&hurtbox.translated(push), obstacle) {
        -push
    } else {
        push
    }
}

fn penetrates(hurtbox: &PixelRect, obstacle: &PixelRect) -> bool {
    hurtbox.overlaps_beyond(obstacle, CONTACT_TOLERANCE)
}
