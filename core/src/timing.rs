//! Variable-rate timing model.
//!
//! The host hands [`Timing::update`] its monotonic clock reading once per
//! tick. The model turns it into a rate-scaled delta for the simulation and a
//! raw delta for presentation throttling, which stays independent of the time
//! rate so slow motion does not also lower the frame rate.

use std::time::Duration;

use crate::{config::TimingConfig, ease::Ease};

/// Time measurements for a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    raw: Duration,
    scaled: Duration,
    time_rate: f32,
    present: bool,
}

impl FrameTime {
    /// Wall-clock time since the previous tick.
    #[must_use]
    pub const fn raw(&self) -> Duration {
        self.raw
    }

    /// Simulated time since the previous tick, after applying the time rate.
    #[must_use]
    pub const fn scaled(&self) -> Duration {
        self.scaled
    }

    /// Rate-scaled delta in milliseconds, the unit entity speeds are expressed in.
    #[must_use]
    pub fn scaled_millis(&self) -> f32 {
        self.scaled.as_secs_f32() * 1_000.0
    }

    /// Time rate applied during the tick.
    #[must_use]
    pub const fn time_rate(&self) -> f32 {
        self.time_rate
    }

    /// Whether the frame gate opened on this tick.
    #[must_use]
    pub const fn present(&self) -> bool {
        self.present
    }
}

/// Accumulates raw time and opens once per presentation interval.
#[derive(Clone, Debug)]
pub struct FrameGate {
    interval: Duration,
    accumulated: Duration,
}

impl FrameGate {
    /// Creates a gate opening `frame_rate` times per second.
    #[must_use]
    pub fn new(frame_rate: f32) -> Self {
        let interval = if frame_rate > 0.0 {
            Duration::from_secs_f32(1.0 / frame_rate)
        } else {
            Duration::ZERO
        };
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Time between two presents.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds raw elapsed time and reports whether a present is due.
    ///
    /// Time left over beyond a full interval is discarded, so a long stall
    /// opens the gate once rather than several ticks in a row.
    pub fn advance(&mut self, raw: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(raw);
        if self.accumulated < self.interval {
            return false;
        }

        self.accumulated -= self.interval;
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
        }
        true
    }
}

/// Tracks wall-clock progress, the eased time rate and the frame gate.
#[derive(Clone, Debug)]
pub struct Timing {
    last_update: Duration,
    time_rate: f32,
    requested_rate: f32,
    rate_ease: Ease,
    gate: FrameGate,
}

impl Timing {
    /// Creates a timing model whose clock starts at zero.
    #[must_use]
    pub fn new(config: &TimingConfig) -> Self {
        Self {
            last_update: Duration::ZERO,
            time_rate: config.time_rate,
            requested_rate: config.time_rate,
            rate_ease: Ease::quintic(
                config.time_rate,
                config.rate_ease_duration(),
                config.rate_release_duration(),
            ),
            gate: FrameGate::new(config.frame_rate),
        }
    }

    /// Requests a new time rate; the rate eases toward it over the next ticks.
    pub fn set_time_rate(&mut self, rate: f32) {
        self.requested_rate = rate.max(0.0);
    }

    /// Applies a new time rate immediately.
    pub fn snap_time_rate(&mut self, rate: f32) {
        let rate = rate.max(0.0);
        self.requested_rate = rate;
        self.time_rate = rate;
        self.rate_ease.snap_to(rate);
    }

    /// Time rate currently in effect.
    #[must_use]
    pub const fn time_rate(&self) -> f32 {
        self.time_rate
    }

    /// Clock reading of the last accepted tick.
    #[must_use]
    pub const fn last_update(&self) -> Duration {
        self.last_update
    }

    /// Advances the model to the host clock reading `now`.
    ///
    /// Returns `None` when no time elapsed since the previous tick; such ticks
    /// must be skipped entirely.
    pub fn update(&mut self, now: Duration) -> Option<FrameTime> {
        let raw = now.saturating_sub(self.last_update);
        if raw.is_zero() {
            return None;
        }
        self.last_update = now;

        self.time_rate = self
            .rate_ease
            .ease_value(self.requested_rate, raw)
            .max(0.0);
        let scaled = raw.mul_f32(self.time_rate);
        let present = self.gate.advance(raw);

        Some(FrameTime {
            raw,
            scaled,
            time_rate: self.time_rate,
            present,
        })
    }
}
