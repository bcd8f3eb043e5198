//! Tunable session configuration.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration file
//! only needs to list the values it overrides. Durations are expressed in whole
//! milliseconds and speeds in tiles per second to keep files readable; the
//! helper methods convert them into the units the simulation works in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{coords::TileIndex, Palette, SpriteExtent};

/// Reasons a configuration is rejected before a session starts.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A rate, speed, size or zoom value was zero or negative.
    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value that was rejected.
        value: f32,
    },
    /// A duration that drives a cycle was zero.
    #[error("`{field}` must be at least one millisecond")]
    ZeroDuration {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A character would start dead.
    #[error("`{field}` must grant at least one hit point")]
    ZeroHealth {
        /// Dotted path of the offending field.
        field: &'static str,
    },
}

/// Straight wall segment expressed as an inclusive pair of tile corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSegment {
    /// First tile covered by the wall.
    pub start: TileIndex,
    /// Last tile covered by the wall.
    pub end: TileIndex,
}

impl WallSegment {
    /// Creates a wall spanning the rectangle between two tiles, inclusive.
    #[must_use]
    pub const fn new(start: TileIndex, end: TileIndex) -> Self {
        Self { start, end }
    }
}

/// Complete configuration of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Room layout.
    pub room: RoomConfig,
    /// Clock and presentation pacing.
    pub timing: TimingConfig,
    /// Player tuning.
    pub player: PlayerConfig,
    /// Innocent NPC tuning.
    pub npc: NpcConfig,
    /// Monster tuning.
    pub monster: MonsterConfig,
    /// Focus ability tuning.
    pub focus: FocusConfig,
    /// Session-wide values.
    pub session: SessionConfig,
}

impl GameConfig {
    /// Checks every value the simulation divides by or cycles on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("timing.frame_rate", self.timing.frame_rate)?;
        positive("timing.time_rate", self.timing.time_rate)?;
        positive("focus.time_rate", self.focus.time_rate)?;
        positive("focus.zoom", self.focus.zoom)?;
        positive("player.speed_tiles_per_second", self.player.speed_tiles_per_second)?;
        positive("player.hitbox_tiles", self.player.hitbox_tiles)?;
        positive("npc.speed_tiles_per_second", self.npc.speed_tiles_per_second)?;
        positive(
            "monster.chase_speed_tiles_per_second",
            self.monster.chase_speed_tiles_per_second,
        )?;
        extent("player.sprite", self.player.sprite)?;
        extent("npc.sprite", self.npc.sprite)?;
        extent("monster.sprite", self.monster.sprite)?;

        if self.player.attack_speed_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "player.attack_speed_ms",
            });
        }
        if self.npc.retarget_cooldown_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "npc.retarget_cooldown_ms",
            });
        }
        if self.player.health == 0 {
            return Err(ConfigError::ZeroHealth {
                field: "player.health",
            });
        }
        if self.npc.health == 0 {
            return Err(ConfigError::ZeroHealth { field: "npc.health" });
        }
        if self.monster.health == 0 {
            return Err(ConfigError::ZeroHealth {
                field: "monster.health",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn extent(field: &'static str, extent: SpriteExtent) -> Result<(), ConfigError> {
    positive(field, extent.width.min(extent.height))
}

/// Room layout in tiles plus the surface it must cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Width of the rendering surface in pixels.
    pub surface_width: f32,
    /// Height of the rendering surface in pixels.
    pub surface_height: f32,
    /// Tile the player spawns on.
    pub spawn: TileIndex,
    /// Walls registered on top of the four border walls.
    pub walls: Vec<WallSegment>,
    /// Floor and wall colors.
    pub palette: Palette,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            columns: 40,
            rows: 30,
            surface_width: 1_440.0,
            surface_height: 1_080.0,
            spawn: TileIndex::new(19, 27),
            walls: Vec::new(),
            palette: Palette::default(),
        }
    }
}

/// Clock pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Presents per second.
    pub frame_rate: f32,
    /// Time rate at session start.
    pub time_rate: f32,
    /// Time for the time rate to rise toward a larger target.
    pub rate_ease_ms: u64,
    /// Time for the time rate to fall toward a smaller target.
    pub rate_release_ms: u64,
}

impl TimingConfig {
    /// Rising time-rate duration.
    #[must_use]
    pub fn rate_ease_duration(&self) -> Duration {
        Duration::from_millis(self.rate_ease_ms)
    }

    /// Falling time-rate duration.
    #[must_use]
    pub fn rate_release_duration(&self) -> Duration {
        Duration::from_millis(self.rate_release_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            time_rate: 1.0,
            rate_ease_ms: 600,
            rate_release_ms: 150,
        }
    }
}

/// Player tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting hit points.
    pub health: u32,
    /// Walking speed.
    pub speed_tiles_per_second: f32,
    /// Duration of the sword draw; the whole attack cycle takes twice as long.
    pub attack_speed_ms: u64,
    /// How long the swing keeps its hitbox active.
    pub hitbox_lasting_ms: u64,
    /// Side length of the square swing hitbox, in tiles.
    pub hitbox_tiles: f32,
    /// Size of the player sprite.
    pub sprite: SpriteExtent,
}

impl PlayerConfig {
    /// Sword draw duration.
    #[must_use]
    pub fn attack_speed(&self) -> Duration {
        Duration::from_millis(self.attack_speed_ms)
    }

    /// Active hitbox window at the start of the swing.
    #[must_use]
    pub fn hitbox_lasting_time(&self) -> Duration {
        Duration::from_millis(self.hitbox_lasting_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 10,
            speed_tiles_per_second: 5.0,
            attack_speed_ms: 1_000,
            hitbox_lasting_ms: 100,
            hitbox_tiles: 2.0,
            sprite: SpriteExtent::new(16.0, 24.0),
        }
    }
}

/// Innocent NPC tuning. The monster's disguise shares these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Number of innocent NPCs placed in the room.
    pub count: u32,
    /// Starting hit points.
    pub health: u32,
    /// Walking speed.
    pub speed_tiles_per_second: f32,
    /// Half-width, in tiles, of the square wander targets are drawn from.
    pub auto_move_max_distance: u32,
    /// Time after which a new target is drawn even if the old one was not reached.
    pub retarget_cooldown_ms: u64,
    /// Pixel distance under which the target counts as reached.
    pub arrival_tolerance: f32,
    /// Size of the NPC sprite.
    pub sprite: SpriteExtent,
}

impl NpcConfig {
    /// Retarget cooldown.
    #[must_use]
    pub fn retarget_cooldown(&self) -> Duration {
        Duration::from_millis(self.retarget_cooldown_ms)
    }
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            count: 12,
            health: 1,
            speed_tiles_per_second: 2.0,
            auto_move_max_distance: 5,
            retarget_cooldown_ms: 4_000,
            arrival_tolerance: 4.0,
            sprite: SpriteExtent::new(16.0, 24.0),
        }
    }
}

/// Monster tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    /// Starting hit points, shared with the disguise.
    pub health: u32,
    /// Chase speed once exposed.
    pub chase_speed_tiles_per_second: f32,
    /// Distance at which the disguised monster notices the player.
    pub detection_range_tiles: f32,
    /// How far the disguise flees when the player comes close.
    pub escape_distance_tiles: f32,
    /// Minimum time between two strikes against the player.
    pub strike_interval_ms: u64,
    /// Size of the monster's true sprite.
    pub sprite: SpriteExtent,
}

impl MonsterConfig {
    /// Minimum time between two strikes.
    #[must_use]
    pub fn strike_interval(&self) -> Duration {
        Duration::from_millis(self.strike_interval_ms)
    }
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            health: 3,
            chase_speed_tiles_per_second: 4.5,
            detection_range_tiles: 4.0,
            escape_distance_tiles: 3.0,
            strike_interval_ms: 800,
            sprite: SpriteExtent::new(24.0, 24.0),
        }
    }
}

/// Focus ability tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Time rate while focusing.
    pub time_rate: f32,
    /// Zoom level while focusing.
    pub zoom: f32,
    /// Time for zoom and filter to reach their focused values.
    pub ease_ms: u64,
    /// Time for zoom and filter to fall back after focus ends.
    pub release_ms: u64,
}

impl FocusConfig {
    /// Engage duration.
    #[must_use]
    pub fn ease_duration(&self) -> Duration {
        Duration::from_millis(self.ease_ms)
    }

    /// Release duration.
    #[must_use]
    pub fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_ms)
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            time_rate: 0.35,
            zoom: 1.5,
            ease_ms: 250,
            release_ms: 900,
        }
    }
}

/// Session-wide values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Time before the monster drops its disguise.
    pub countdown_ms: u64,
    /// Seed for every random draw in the session.
    pub seed: u64,
}

impl SessionConfig {
    /// Countdown length.
    #[must_use]
    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_ms: 60_000,
            seed: 0x6d61_7371_7565_7261,
        }
    }
}
