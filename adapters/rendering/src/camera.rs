//! Camera that keeps the player centered without showing space outside the room.

use glam::Vec2;
use masquerade_core::PixelRect;

/// Viewport placed over the zoomed room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    origin: Vec2,
    viewport: Vec2,
}

impl Camera {
    /// Centers a `viewport`-sized window on `focus`, clamped to a room of
    /// `room_size` pixels. Axes on which the room is smaller than the viewport
    /// are pinned to zero.
    #[must_use]
    pub fn tracking(focus: Vec2, room_size: Vec2, viewport: Vec2) -> Self {
        let max = (room_size - viewport).max(Vec2::ZERO);
        let origin = (focus - viewport * 0.5).clamp(Vec2::ZERO, max);
        Self { origin, viewport }
    }

    /// Room pixel shown at the upper-left corner of the viewport.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size of the visible window.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Converts a room rectangle to viewport coordinates.
    #[must_use]
    pub fn to_screen(&self, rect: PixelRect) -> PixelRect {
        rect.translated(-self.origin)
    }

    /// Whether any part of the room rectangle is inside the viewport.
    #[must_use]
    pub fn sees(&self, rect: &PixelRect) -> bool {
        PixelRect::from_position_size(self.origin, self.viewport).overlaps(rect)
    }
}
