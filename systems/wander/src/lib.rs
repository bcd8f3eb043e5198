#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wander controller that keeps NPCs drifting between random reachable tiles.
//!
//! Each NPC travels in a straight line toward its current target and samples a
//! new one once it arrives or its retarget cooldown elapses. Candidates are
//! drawn from a square of tiles around the NPC and rejected when the NPC's
//! full footprint would cover an impassable or out-of-bounds tile. Sampling is
//! capped; an NPC that exhausts its attempts stays put until the next cooldown.

use std::time::Duration;

use glam::Vec2;
use masquerade_core::{config::NpcConfig, Event, Health, NpcId, TileIndex};
use masquerade_world::{Character, Room};
use rand::Rng;
use tracing::debug;

/// Number of candidate tiles drawn before an NPC gives up and stays in place.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Wandering non-player character.
#[derive(Clone, Debug)]
pub struct Npc {
    id: NpcId,
    body: Character,
    target: Vec2,
    since_retarget: Duration,
    cooldown: Duration,
    max_distance: i64,
    arrival_tolerance: f32,
    stranded: bool,
}

impl Npc {
    /// Places an NPC at the raw `position` using the provided tuning.
    ///
    /// The NPC starts out "arrived" at its own position so it picks a
    /// destination on its first tick.
    #[must_use]
    pub fn spawn(id: NpcId, room: &Room, position: Vec2, config: &NpcConfig) -> Self {
        let speed = config.speed_tiles_per_second * room.base_tile_size() / 1_000.0;
        let body = Character::spawn(
            room,
            position,
            config.sprite,
            speed,
            Health::new(config.health),
        );
        Self {
            id,
            body,
            target: position,
            since_retarget: Duration::ZERO,
            cooldown: config.retarget_cooldown(),
            max_distance: i64::from(config.auto_move_max_distance),
            arrival_tolerance: config.arrival_tolerance,
            stranded: false,
        }
    }

    /// Advances the NPC by `dt` of simulated time.
    pub fn tick<R>(&mut self, room: &Room, dt: Duration, rng: &mut R, out: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        if !self.body.is_alive() {
            return;
        }

        self.since_retarget = self.since_retarget.saturating_add(dt);
        let arrived = self.has_arrived();
        if self.since_retarget >= self.cooldown || (arrived && !self.stranded) {
            self.retarget(room, rng, out);
        }

        let remaining = self.target - self.body.position();
        let length = remaining.length();
        let distance = (self.body.speed() * dt.as_secs_f32() * 1_000.0).min(length);
        if distance <= 0.0 {
            return;
        }

        self.body.set_facing(self.body.facing().toward(remaining.x));
        self.body.move_along(remaining, distance, room);
    }

    /// Overrides the wander destination and restarts the retarget cooldown.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
        self.since_retarget = Duration::ZERO;
        self.stranded = false;
    }

    /// Teleports the NPC to the raw `position`.
    pub fn force_position(&mut self, position: Vec2) {
        self.body.force_position(position);
    }

    /// Overwrites the NPC's remaining hit points.
    pub fn set_health(&mut self, health: Health) {
        self.body.set_health(health);
    }

    /// Identifier assigned at spawn.
    #[must_use]
    pub const fn id(&self) -> NpcId {
        self.id
    }

    /// Current raw destination.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Spatial body of the NPC.
    #[must_use]
    pub const fn body(&self) -> &Character {
        &self.body
    }

    /// Mutable access to the spatial body, used for zoom refreshes and hits.
    pub fn body_mut(&mut self) -> &mut Character {
        &mut self.body
    }

    /// Whether the last sampling round found no reachable tile.
    #[must_use]
    pub const fn is_stranded(&self) -> bool {
        self.stranded
    }

    fn has_arrived(&self) -> bool {
        self.body.position().distance(self.target) <= self.arrival_tolerance
    }

    fn retarget<R>(&mut self, room: &Room, rng: &mut R, out: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        self.since_retarget = Duration::ZERO;
        match self.sample_target(room, rng) {
            Some(tile) => {
                self.target = tile.to_pixel(room.base_tile_size());
                self.stranded = false;
                debug!(npc = self.id.get(), ?tile, "npc retargeted");
                out.push(Event::NpcRetargeted {
                    npc: self.id,
                    target: self.target,
                });
            }
            None => {
                self.target = self.body.position();
                self.stranded = true;
                debug!(
                    npc = self.id.get(),
                    attempts = MAX_SAMPLE_ATTEMPTS,
                    "no reachable wander target, staying in place"
                );
            }
        }
    }

    fn sample_target<R>(&self, room: &Room, rng: &mut R) -> Option<TileIndex>
    where
        R: Rng + ?Sized,
    {
        let tile_size = room.base_tile_size();
        let origin = TileIndex::from_pixel(self.body.position(), tile_size)?;
        let (width, height) = self.body.footprint_tiles(tile_size);
        let column = i64::from(origin.column());
        let row = i64::from(origin.row());

        (0..MAX_SAMPLE_ATTEMPTS).find_map(|_| {
            let dx = rng.gen_range(-self.max_distance..=self.max_distance);
            let dy = rng.gen_range(-self.max_distance..=self.max_distance);
            let candidate = room.tile_at(column + dx, row + dy)?;
            room.region_is_passable(candidate, width, height)
                .then_some(candidate)
        })
    }
}
