#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Room, wall collision and the character body shared by every actor.

pub mod character;
pub mod collision;
pub mod room;

pub use character::Character;
pub use room::{Room, RoomError, Tile, Wall};

/// Overlaps thinner than this many pixels are treated as touching edges.
pub const CONTACT_TOLERANCE: f32 = 1e-3;
