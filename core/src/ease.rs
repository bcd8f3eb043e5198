//! Eased interpolation of scalar parameters.
//!
//! An [`Ease`] tracks one scalar (zoom level, time rate, filter strength) and
//! moves it toward whatever target the caller asks for on each tick. Changing
//! the requested target restarts the animation from the current value; asking
//! for the same target keeps accumulating progress until it saturates.

use std::time::Duration;

/// Shaping function mapping linear progress in `0.0..=1.0` onto eased progress.
pub type EaseCurve = fn(f32) -> f32;

/// Ease-out quintic curve: fast start, long gentle settle.
#[must_use]
pub fn ease_out_quintic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

/// Scalar value eased toward a target over a configurable duration.
#[derive(Clone, Debug)]
pub struct Ease {
    current: f32,
    start: f32,
    target: f32,
    progress: f32,
    curve: EaseCurve,
    time_to_ease: Duration,
    time_to_release: Duration,
}

impl Ease {
    /// Creates an ease resting at `initial`.
    ///
    /// `time_to_ease` applies when moving toward a larger target and
    /// `time_to_release` when moving toward a smaller one.
    #[must_use]
    pub fn new(
        initial: f32,
        curve: EaseCurve,
        time_to_ease: Duration,
        time_to_release: Duration,
    ) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            progress: 1.0,
            curve,
            time_to_ease,
            time_to_release,
        }
    }

    /// Creates an ease resting at `initial` that follows [`ease_out_quintic`].
    #[must_use]
    pub fn quintic(initial: f32, time_to_ease: Duration, time_to_release: Duration) -> Self {
        Self::new(initial, ease_out_quintic, time_to_ease, time_to_release)
    }

    /// Advances the animation toward `target` by `dt` and returns the new value.
    pub fn ease_value(&mut self, target: f32, dt: Duration) -> f32 {
        if target != self.target {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }

        let distance = self.target - self.start;
        if self.progress >= 1.0 || distance == 0.0 {
            self.progress = 1.0;
            self.current = self.target;
            return self.current;
        }

        let duration = if distance > 0.0 {
            self.time_to_ease
        } else {
            self.time_to_release
        };
        self.progress = if duration.is_zero() {
            1.0
        } else {
            (self.progress + dt.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };

        self.current = if self.progress >= 1.0 {
            self.target
        } else {
            self.start + (self.curve)(self.progress) * distance
        };
        self.current
    }

    /// Current value without advancing the animation.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Target most recently requested.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns `true` once the value rests at its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    /// Jumps straight to `value`, cancelling any animation in flight.
    pub fn snap_to(&mut self, value: f32) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.progress = 1.0;
    }
}
