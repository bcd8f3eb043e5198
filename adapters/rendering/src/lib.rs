#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Masquerade adapters.
//!
//! Nothing here draws. [`Scene::capture`] turns the simulation into a flat,
//! screen-space description that a backend paints however it likes.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use masquerade_core::{FrameInput, Outcome, PixelRect};
use masquerade_system_player::SwordPhase;
use masquerade_system_simulation::Simulation;
use masquerade_world::Character;

pub mod camera;

pub use camera::Camera;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Blends the color toward its own luminance, as the focus filter does.
    ///
    /// A strength of 0 leaves the color untouched; 1 yields pure grey.
    #[must_use]
    pub fn desaturate(self, strength: f32) -> Self {
        let strength = strength.clamp(0.0, 1.0);
        let luma = 0.299 * self.red + 0.587 * self.green + 0.114 * self.blue;
        let blend = |channel: f32| channel + (luma - channel) * strength;

        Self {
            red: blend(self.red),
            green: blend(self.green),
            blue: blend(self.blue),
            alpha: self.alpha,
        }
    }
}

impl From<masquerade_core::Color> for Color {
    fn from(color: masquerade_core::Color) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Which sprite sheet an entity is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// The player character.
    Player,
    /// An NPC, including the monster while it is disguised.
    Npc,
    /// The exposed monster.
    Monster,
}

/// Screen-space placement of one entity sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpritePresentation {
    /// Sprite sheet to draw.
    pub kind: SpriteKind,
    /// Destination rectangle in viewport pixels.
    pub rect: PixelRect,
    /// Uniform scale applied to the source sprite.
    pub scale: f32,
    /// Whether the sprite is mirrored to face left.
    pub flip_x: bool,
}

impl SpritePresentation {
    fn of(kind: SpriteKind, body: &Character, camera: &Camera) -> Self {
        Self {
            kind,
            rect: camera.to_screen(body.hurtbox()),
            scale: body.scale(),
            flip_x: !body.facing().is_right(),
        }
    }
}

/// Sword drawn next to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwordPresentation {
    /// Animation phase of the sword.
    pub phase: SwordPhase,
    /// Point on the player's leading edge the sword hangs from, in viewport pixels.
    pub anchor: Vec2,
    /// Whether the sword points toward increasing x.
    pub facing_right: bool,
}

/// One room tile in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Destination rectangle.
    pub rect: PixelRect,
    /// Fill color after the focus filter.
    pub color: Color,
}

/// Snapshot of everything a backend needs to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Visible tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
    /// Living entities, back to front.
    pub sprites: Vec<SpritePresentation>,
    /// Sword carried by the living player.
    pub sword: Option<SwordPresentation>,
    /// Damage rectangle of an active swing, for debug overlays.
    pub hitbox: Option<PixelRect>,
    /// Camera the snapshot was taken through.
    pub camera: Camera,
    /// Eased zoom level.
    pub zoom: f32,
    /// Eased focus filter strength.
    pub filter_strength: f32,
    /// Whether the frame gate asked for this frame to be shown.
    pub present: bool,
    /// Simulated time left on the countdown.
    pub countdown: Duration,
    /// Session outcome at capture time.
    pub outcome: Outcome,
}

impl Scene {
    /// Captures the simulation as seen through a `viewport`-sized window
    /// centered on the player.
    #[must_use]
    pub fn capture(simulation: &Simulation, viewport: Vec2) -> Self {
        let room = simulation.room();
        let player = simulation.player();
        let filter_strength = simulation.filter_strength();
        let camera = Camera::tracking(
            player.body().hurtbox().center(),
            room.pixel_size(),
            viewport,
        );

        let tiles = room
            .tiles()
            .iter()
            .filter(|tile| camera.sees(&tile.rect()))
            .map(|tile| TilePresentation {
                rect: camera.to_screen(tile.rect()),
                color: Color::from(tile.color()).desaturate(filter_strength),
            })
            .collect();

        let monster = simulation.monster();
        let monster_kind = if monster.is_exposed() {
            SpriteKind::Monster
        } else {
            SpriteKind::Npc
        };
        let mut sprites: Vec<SpritePresentation> = simulation
            .npcs()
            .iter()
            .map(|npc| (SpriteKind::Npc, npc.body()))
            .chain([
                (monster_kind, monster.authoritative()),
                (SpriteKind::Player, player.body()),
            ])
            .filter(|(_, body)| body.is_alive())
            .map(|(kind, body)| SpritePresentation::of(kind, body, &camera))
            .collect();
        sprites.sort_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

        let sword = player.body().is_alive().then(|| {
            let hurtbox = camera.to_screen(player.body().hurtbox());
            let facing_right = player.body().facing().is_right();
            let edge = if facing_right {
                hurtbox.right()
            } else {
                hurtbox.x
            };
            SwordPresentation {
                phase: player.sword_phase(),
                anchor: Vec2::new(edge, hurtbox.center().y),
                facing_right,
            }
        });

        Self {
            tiles,
            sprites,
            sword,
            hitbox: player.hitbox().map(|hitbox| camera.to_screen(hitbox)),
            camera,
            zoom: simulation.zoom(),
            filter_strength,
            present: simulation.last_frame().is_some_and(|frame| frame.present()),
            countdown: simulation.countdown(),
            outcome: simulation.outcome(),
        }
    }
}

/// Window-level settings a backend needs before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Size of the drawable area in pixels.
    pub viewport: Vec2,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, viewport: Vec2) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            viewport,
        }
    }
}

/// Interface implemented by concrete presentation backends.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update` closure receives the host clock reading and the input
    /// polled for the frame, and returns the scene to show. Returning `None`
    /// asks the backend to stop.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput) -> Option<Scene>;
}
