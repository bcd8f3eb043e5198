#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Monster that hides inside a wandering NPC until it is exposed.
//!
//! The monster owns two bodies: its own and the disguise NPC's. Exactly one of
//! them drives at any time. While disguised the NPC wanders and the monster
//! copies the NPC's position and health; once exposed the monster chases the
//! player and copies its own state back onto the NPC. Exposure is one-way and
//! only happens through [`Monster::set_expose_self`].

use std::time::Duration;

use glam::Vec2;
use masquerade_core::{
    config::{MonsterConfig, NpcConfig},
    EntityRef, Event, Health, NpcId, PixelRect,
};
use masquerade_system_wander::Npc;
use masquerade_world::{Character, Room};
use rand::Rng;
use tracing::{debug, info};

/// Disguised or exposed monster.
#[derive(Clone, Debug)]
pub struct Monster {
    body: Character,
    disguise: Npc,
    exposed: bool,
    escaped: bool,
    detection_range: f32,
    escape_distance: f32,
    strike_interval: Duration,
    since_strike: Duration,
}

impl Monster {
    /// Spawns a disguised monster at the raw `position`.
    ///
    /// The disguise uses the regular NPC tuning so it is indistinguishable
    /// from the crowd, but carries the monster's health.
    #[must_use]
    pub fn spawn(
        disguise_id: NpcId,
        room: &Room,
        position: Vec2,
        monster: &MonsterConfig,
        npc: &NpcConfig,
    ) -> Self {
        let tile_size = room.base_tile_size();
        let health = Health::new(monster.health);
        let body = Character::spawn(
            room,
            position,
            monster.sprite,
            monster.chase_speed_tiles_per_second * tile_size / 1_000.0,
            health,
        );
        let mut disguise = Npc::spawn(disguise_id, room, position, npc);
        disguise.set_health(health);

        Self {
            body,
            disguise,
            exposed: false,
            escaped: false,
            detection_range: monster.detection_range_tiles * tile_size,
            escape_distance: monster.escape_distance_tiles * tile_size,
            strike_interval: monster.strike_interval(),
            since_strike: monster.strike_interval(),
        }
    }

    /// Advances the monster by `dt` of simulated time.
    pub fn tick<R>(
        &mut self,
        room: &Room,
        dt: Duration,
        player: &Character,
        rng: &mut R,
        out: &mut Vec<Event>,
    ) where
        R: Rng + ?Sized,
    {
        if !self.is_alive() {
            return;
        }

        if self.exposed {
            self.since_strike = self.since_strike.saturating_add(dt);
            self.chase(room, dt, player);
        } else {
            self.lurk(room, dt, player, rng, out);
        }
    }

    /// Drops the disguise. Further calls have no effect.
    pub fn set_expose_self(&mut self, out: &mut Vec<Event>) {
        if self.exposed {
            return;
        }
        self.exposed = true;
        self.escaped = false;
        self.body.force_position(self.disguise.body().position());
        self.body.set_facing(self.disguise.body().facing());
        info!(position = ?self.body.position(), "monster exposed");
        out.push(Event::MonsterExposed);
    }

    /// Damages the player on contact, at most once per strike interval.
    ///
    /// Only an exposed monster strikes. Returns `true` when the player lost
    /// health.
    pub fn strike(&mut self, player: &mut Character, out: &mut Vec<Event>) -> bool {
        if !self.exposed || !self.is_alive() || self.since_strike < self.strike_interval {
            return false;
        }
        if !player.check_hitbox_collision(&self.body.hurtbox()) {
            return false;
        }

        self.since_strike = Duration::ZERO;
        let health = player.health();
        debug!(health = health.get(), "monster struck the player");
        out.push(Event::EntityDamaged {
            entity: EntityRef::Player,
            health,
        });
        if !health.is_alive() {
            out.push(Event::EntityKilled {
                entity: EntityRef::Player,
            });
        }
        true
    }

    /// Applies a hitbox to whichever body currently drives.
    pub fn check_hitbox_collision(&mut self, hitbox: &PixelRect) -> bool {
        if self.exposed {
            let hit = self.body.check_hitbox_collision(hitbox);
            self.disguise.set_health(self.body.health());
            hit
        } else {
            let hit = self.disguise.body_mut().check_hitbox_collision(hitbox);
            self.body.set_health(self.disguise.body().health());
            hit
        }
    }

    /// Refreshes both bodies for the provided zoom level.
    pub fn update(&mut self, zoom: f32) {
        self.body.update(zoom);
        self.disguise.body_mut().update(zoom);
    }

    /// Body that is currently rendered and hit-tested.
    #[must_use]
    pub fn authoritative(&self) -> &Character {
        if self.exposed {
            &self.body
        } else {
            self.disguise.body()
        }
    }

    /// Monster's own body.
    #[must_use]
    pub const fn body(&self) -> &Character {
        &self.body
    }

    /// NPC the monster hides inside.
    #[must_use]
    pub const fn disguise(&self) -> &Npc {
        &self.disguise
    }

    /// Whether the disguise has been dropped.
    #[must_use]
    pub const fn is_exposed(&self) -> bool {
        self.exposed
    }

    /// Whether the disguise already fled from the player currently in range.
    #[must_use]
    pub const fn has_escaped(&self) -> bool {
        self.escaped
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.body.health()
    }

    /// Whether any hit points remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn lurk<R>(
        &mut self,
        room: &Room,
        dt: Duration,
        player: &Character,
        rng: &mut R,
        out: &mut Vec<Event>,
    ) where
        R: Rng + ?Sized,
    {
        let away = self.disguise.body().center() - player.center();
        let in_range = player.is_alive() && away.length() <= self.detection_range;

        if in_range && !self.escaped {
            let target = self.disguise.body().position()
                + away.normalize_or_zero() * self.escape_distance;
            self.disguise.set_target(target);
            self.escaped = true;
            debug!(?target, "disguised monster fleeing the player");
            out.push(Event::MonsterDetectedPlayer);
        } else if !in_range && self.escaped {
            self.escaped = false;
            out.push(Event::MonsterEscaped);
        }

        self.disguise.tick(room, dt, rng, out);

        let disguise = self.disguise.body();
        self.body.force_position(disguise.position());
        self.body.set_health(disguise.health());
        self.body.set_facing(disguise.facing());
    }

    fn chase(&mut self, room: &Room, dt: Duration, player: &Character) {
        if player.is_alive() {
            let toward = player.center() - self.body.center();
            let distance = (self.body.speed() * dt.as_secs_f32() * 1_000.0).min(toward.length());
            if distance > 0.0 {
                self.body.set_facing(self.body.facing().toward(toward.x));
                self.body.move_along(toward, distance, room);
            }
        }

        self.disguise.force_position(self.body.position());
        self.disguise.set_health(self.body.health());
    }
}
