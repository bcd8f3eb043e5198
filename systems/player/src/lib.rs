#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player controller: keyboard movement and the timed sword attack.

use std::time::Duration;

use glam::Vec2;
use masquerade_core::{config::PlayerConfig, Event, FrameInput, Health, PixelRect};
use masquerade_world::{Character, Room};
use tracing::debug;

pub mod attack;

pub use attack::{AttackTimer, SwordPhase};

/// Character steered by the human player.
#[derive(Clone, Debug)]
pub struct Player {
    body: Character,
    attack: AttackTimer,
    hitbox_side: f32,
}

impl Player {
    /// Spawns the player on the room's spawn tile.
    #[must_use]
    pub fn spawn(room: &Room, config: &PlayerConfig) -> Self {
        let tile_size = room.base_tile_size();
        let body = Character::spawn(
            room,
            room.spawn_position(),
            config.sprite,
            config.speed_tiles_per_second * tile_size / 1_000.0,
            Health::new(config.health),
        );
        Self {
            body,
            attack: AttackTimer::new(config.attack_speed(), config.hitbox_lasting_time()),
            hitbox_side: config.hitbox_tiles * tile_size,
        }
    }

    /// Applies one tick of input over `dt` of simulated time.
    ///
    /// The running attack advances before a new one may start, so holding the
    /// attack key chains swings back to back.
    pub fn tick(&mut self, room: &Room, input: &FrameInput, dt: Duration, out: &mut Vec<Event>) {
        if !self.body.is_alive() {
            return;
        }

        self.attack.advance(dt);
        if input.attack && self.attack.start() {
            debug!(facing = ?self.body.facing(), "attack started");
            out.push(Event::AttackStarted);
        }

        let direction = input.movement();
        if direction == Vec2::ZERO {
            return;
        }
        self.body.set_facing(self.body.facing().toward(direction.x));
        let distance = self.body.speed() * dt.as_secs_f32() * 1_000.0;
        self.body.move_along(direction, distance, room);
    }

    /// Damaging square level with the top of the hurtbox on the side the
    /// player faces, present only during the hitbox window of the swing.
    #[must_use]
    pub fn hitbox(&self) -> Option<PixelRect> {
        if !self.attack.hitbox_active() || !self.body.is_alive() {
            return None;
        }
        let hurtbox = self.body.hurtbox();
        let side = self.hitbox_side * self.body.zoom();
        let x = if self.body.facing().is_right() {
            hurtbox.right()
        } else {
            hurtbox.x - side
        };
        Some(PixelRect::new(x, hurtbox.y, side, side))
    }

    /// Whether a new attack may start.
    #[must_use]
    pub const fn can_attack(&self) -> bool {
        self.attack.can_attack()
    }

    /// Current phase of the sword animation.
    #[must_use]
    pub fn sword_phase(&self) -> SwordPhase {
        self.attack.phase()
    }

    /// Attack cycle state.
    #[must_use]
    pub const fn attack(&self) -> &AttackTimer {
        &self.attack
    }

    /// Spatial body of the player.
    #[must_use]
    pub const fn body(&self) -> &Character {
        &self.body
    }

    /// Mutable access to the spatial body, used for zoom refreshes and hits.
    pub fn body_mut(&mut self) -> &mut Character {
        &mut self.body
    }
}
