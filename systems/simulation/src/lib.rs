#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation context that owns the room and every actor and steps them in a
//! fixed order once per tick.
//!
//! A tick runs: timing update, focus easing, countdown, NPC, player and
//! monster updates, room rebuild at the eased zoom, then damage resolution and
//! the outcome check. Ticks with no elapsed wall-clock time are skipped.

use std::time::Duration;

use masquerade_core::{
    config::{ConfigError, FocusConfig, GameConfig},
    ease::Ease,
    timing::{FrameTime, Timing},
    EntityRef, Event, FrameInput, Health, Outcome, PixelRect,
};
use masquerade_system_disguise::Monster;
use masquerade_system_player::Player;
use masquerade_system_wander::Npc;
use masquerade_world::{Room, RoomError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, trace};

mod crowd;

/// Reasons a session cannot be set up.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The room layout was rejected.
    #[error("invalid room layout: {0}")]
    Room(#[from] RoomError),
    /// No tile can hold an NPC.
    #[error("room has no free tile to place the crowd on")]
    NoFreeTiles,
}

/// One running session.
#[derive(Debug)]
pub struct Simulation {
    room: Room,
    timing: Timing,
    base_time_rate: f32,
    focus: FocusConfig,
    zoom: Ease,
    filter: Ease,
    player: Player,
    npcs: Vec<Npc>,
    monster: Monster,
    countdown: Duration,
    swing_hits: Vec<EntityRef>,
    rng: ChaCha8Rng,
    outcome: Outcome,
    last_frame: Option<FrameTime>,
}

impl Simulation {
    /// Validates `config`, builds the room and places every actor.
    pub fn new(config: &GameConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let room = Room::from_config(&config.room)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.session.seed);
        let player = Player::spawn(&room, &config.player);
        let (npcs, monster) = crowd::place(&room, config, &mut rng)?;
        info!(
            npcs = npcs.len(),
            seed = config.session.seed,
            columns = room.columns(),
            rows = room.rows(),
            "session ready"
        );

        let focus = config.focus.clone();
        Ok(Self {
            timing: Timing::new(&config.timing),
            base_time_rate: config.timing.time_rate,
            zoom: Ease::quintic(room.zoom(), focus.ease_duration(), focus.release_duration()),
            filter: Ease::quintic(0.0, focus.ease_duration(), focus.release_duration()),
            focus,
            room,
            player,
            npcs,
            monster,
            countdown: config.session.countdown(),
            swing_hits: Vec::new(),
            rng,
            outcome: Outcome::Running,
            last_frame: None,
        })
    }

    /// Steps the session to the host clock reading `now`.
    ///
    /// Returns the tick's time measurements, or `None` when the tick was
    /// skipped because no time elapsed.
    pub fn tick(
        &mut self,
        input: &FrameInput,
        now: Duration,
        out: &mut Vec<Event>,
    ) -> Option<FrameTime> {
        let Some(frame) = self.timing.update(now) else {
            trace!(?now, "no time elapsed, tick skipped");
            return None;
        };
        self.last_frame = Some(frame);
        out.push(Event::TimeAdvanced {
            dt: frame.scaled(),
            time_rate: frame.time_rate(),
        });

        let running = self.outcome == Outcome::Running;
        self.apply_focus(input.focus && running, frame.raw());
        if !running {
            self.rebuild();
            return Some(frame);
        }

        let dt = frame.scaled();
        self.run_countdown(dt, out);

        for npc in &mut self.npcs {
            npc.tick(&self.room, dt, &mut self.rng, out);
        }
        let mark = out.len();
        self.player.tick(&self.room, input, dt, out);
        if out[mark..].contains(&Event::AttackStarted) {
            self.swing_hits.clear();
        }
        self.monster
            .tick(&self.room, dt, self.player.body(), &mut self.rng, out);

        self.rebuild();
        self.resolve_damage(out);
        self.decide_outcome(out);
        Some(frame)
    }

    /// Drops the monster's disguise ahead of the countdown.
    pub fn expose_monster(&mut self, out: &mut Vec<Event>) {
        self.monster.set_expose_self(out);
    }

    /// Room in its current, rebuilt state.
    #[must_use]
    pub const fn room(&self) -> &Room {
        &self.room
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Ordinary NPCs, excluding the monster's disguise.
    #[must_use]
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// The monster.
    #[must_use]
    pub const fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Eased zoom level in effect.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom.value()
    }

    /// Eased focus filter strength, from 0 (off) to 1 (full).
    #[must_use]
    pub fn filter_strength(&self) -> f32 {
        self.filter.value()
    }

    /// Time rate in effect.
    #[must_use]
    pub const fn time_rate(&self) -> f32 {
        self.timing.time_rate()
    }

    /// Simulated time left before the monster is exposed.
    #[must_use]
    pub const fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Session outcome so far.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Measurements of the last accepted tick.
    #[must_use]
    pub const fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    fn apply_focus(&mut self, focused: bool, raw: Duration) {
        let (rate, zoom, filter) = if focused {
            (self.focus.time_rate, self.focus.zoom, 1.0)
        } else {
            (self.base_time_rate, 1.0, 0.0)
        };
        self.timing.set_time_rate(rate);
        let _ = self.zoom.ease_value(zoom, raw);
        let _ = self.filter.ease_value(filter, raw);
    }

    fn run_countdown(&mut self, dt: Duration, out: &mut Vec<Event>) {
        if self.monster.is_exposed() || self.countdown.is_zero() {
            return;
        }
        self.countdown = self.countdown.saturating_sub(dt);
        if self.countdown.is_zero() {
            info!("countdown expired");
            out.push(Event::CountdownExpired);
            self.monster.set_expose_self(out);
        }
    }

    fn rebuild(&mut self) {
        let zoom = self.zoom.value();
        if self.room.zoom() != zoom {
            self.room.set_zoom(zoom);
            self.room.build();
        }
        for npc in &mut self.npcs {
            npc.body_mut().update(zoom);
        }
        self.player.body_mut().update(zoom);
        self.monster.update(zoom);
    }

    fn resolve_damage(&mut self, out: &mut Vec<Event>) {
        if let Some(hitbox) = self.player.hitbox() {
            self.apply_swing(&hitbox, out);
        }
        let _ = self.monster.strike(self.player.body_mut(), out);
    }

    /// Each swing damages a given character at most once.
    fn apply_swing(&mut self, hitbox: &PixelRect, out: &mut Vec<Event>) {
        for npc in &mut self.npcs {
            let entity = EntityRef::Npc(npc.id());
            if self.swing_hits.contains(&entity) {
                continue;
            }
            if npc.body_mut().check_hitbox_collision(hitbox) {
                self.swing_hits.push(entity);
                report_hit(entity, npc.body().health(), out);
            }
        }

        let entity = EntityRef::Monster;
        if !self.swing_hits.contains(&entity) && self.monster.check_hitbox_collision(hitbox) {
            self.swing_hits.push(entity);
            report_hit(entity, self.monster.health(), out);
        }
    }

    fn decide_outcome(&mut self, out: &mut Vec<Event>) {
        let outcome = if !self.player.body().is_alive() {
            Outcome::PlayerLost
        } else if !self.monster.is_alive() {
            Outcome::PlayerWon
        } else {
            return;
        };
        self.outcome = outcome;
        info!(?outcome, "session decided");
        out.push(Event::OutcomeDecided { outcome });
    }
}

fn report_hit(entity: EntityRef, health: Health, out: &mut Vec<Event>) {
    debug!(?entity, health = health.get(), "character hit");
    out.push(Event::EntityDamaged { entity, health });
    if !health.is_alive() {
        info!(?entity, "character killed");
        out.push(Event::EntityKilled { entity });
    }
}
