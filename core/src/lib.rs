#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Masquerade simulation.
//!
//! This crate holds the leaf pieces every other crate builds on: identifiers,
//! the per-tick [`FrameInput`] snapshot sampled by adapters, the [`Event`]
//! values the simulation reports back, the tile/pixel coordinate transform,
//! rectangle geometry, the easing engine and the variable-rate timing model.
//! Nothing in here touches a rendering surface or an input device.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod coords;
pub mod ease;
pub mod geometry;
pub mod timing;

pub use coords::TileIndex;
pub use geometry::PixelRect;

/// Canonical banner emitted when a session boots.
pub const WELCOME_BANNER: &str = "Something in this room is not what it seems.";

/// Unique identifier assigned to a wandering NPC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Names one of the bodies taking part in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// The player-controlled hunter.
    Player,
    /// One of the innocent NPCs.
    Npc(NpcId),
    /// The monster, whether disguised or exposed.
    Monster,
}

/// Remaining hit points of a character. Zero means dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a health value holding the provided hit points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw hit point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the character still has hit points left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.0 > 0
    }

    /// Returns the health left after taking a single point of damage.
    ///
    /// Health never drops below zero.
    #[must_use]
    pub const fn decremented(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// Horizontal direction a sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Sprite drawn mirrored.
    Left,
    /// Sprite drawn as authored.
    #[default]
    Right,
}

impl Facing {
    /// Derives the facing implied by a horizontal delta, keeping `self` when the
    /// delta is zero.
    #[must_use]
    pub fn toward(self, dx: f32) -> Self {
        if dx > 0.0 {
            Self::Right
        } else if dx < 0.0 {
            Self::Left
        } else {
            self
        }
    }

    /// Returns `true` when the sprite is drawn unmirrored.
    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(self, Self::Right)
    }
}

/// Pixel dimensions of an opaque sprite handle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteExtent {
    /// Width of the source image in pixels.
    pub width: f32,
    /// Height of the source image in pixels.
    pub height: f32,
}

impl SpriteExtent {
    /// Creates a new sprite extent.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scale factor that stretches the sprite's shorter side across one tile.
    #[must_use]
    pub fn scale_to_tile(&self, tile_size: f32) -> f32 {
        let shorter = self.width.min(self.height);
        if shorter <= 0.0 {
            return 1.0;
        }
        tile_size / shorter
    }

    /// Size of the sprite once the provided scale is applied.
    #[must_use]
    pub fn scaled(&self, scale: f32) -> Vec2 {
        Vec2::new(self.width * scale, self.height * scale)
    }
}

/// Opaque RGB color handed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Three-color room palette: two checkerboard floor colors and the wall color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Floor color used on even columns of even rows.
    pub floor_primary: Color,
    /// Floor color alternating with [`Palette::floor_primary`].
    pub floor_secondary: Color,
    /// Color applied to impassable tiles.
    pub wall: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            floor_primary: Color::from_rgb(112, 128, 144),
            floor_secondary: Color::from_rgb(132, 144, 153),
            wall: Color::from_rgb(150, 170, 200),
        }
    }
}

/// Input snapshot polled by the adapter once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Movement toward decreasing y is held.
    pub up: bool,
    /// Movement toward increasing y is held.
    pub down: bool,
    /// Movement toward decreasing x is held.
    pub left: bool,
    /// Movement toward increasing x is held.
    pub right: bool,
    /// The attack key or button is held.
    pub attack: bool,
    /// The focus modifier is held.
    pub focus: bool,
}

impl FrameInput {
    /// Composes the held movement keys into an unnormalized direction vector.
    #[must_use]
    pub fn movement(&self) -> Vec2 {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Result of a session as far as the core can tell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Both the player and the monster are alive.
    #[default]
    Running,
    /// The monster's health reached zero.
    PlayerWon,
    /// The player's health reached zero.
    PlayerLost,
}

/// Events reported by the simulation after each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Rate-scaled simulated time that elapsed in the tick.
        dt: Duration,
        /// Time rate in effect during the tick.
        time_rate: f32,
    },
    /// An NPC picked a new wander destination.
    NpcRetargeted {
        /// Identifier of the NPC that retargeted.
        npc: NpcId,
        /// Raw pixel position of the new destination.
        target: Vec2,
    },
    /// The disguised monster noticed the player inside its detection range.
    MonsterDetectedPlayer,
    /// The player left the disguised monster's detection range.
    MonsterEscaped,
    /// The monster dropped its disguise.
    MonsterExposed,
    /// The player began an attack.
    AttackStarted,
    /// A character lost a hit point.
    EntityDamaged {
        /// Character that was hit.
        entity: EntityRef,
        /// Health left after the hit.
        health: Health,
    },
    /// A character's health reached zero.
    EntityKilled {
        /// Character that died.
        entity: EntityRef,
    },
    /// The session countdown reached zero.
    CountdownExpired,
    /// The session outcome changed away from [`Outcome::Running`].
    OutcomeDecided {
        /// Outcome that was reached.
        outcome: Outcome,
    },
}
