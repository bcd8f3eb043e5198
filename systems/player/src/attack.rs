//! Sword attack cycle.

use std::time::Duration;

/// Visual phase of the sword animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwordPhase {
    /// Sword sheathed or recovering after a swing.
    #[default]
    Idle,
    /// Sword being drawn back.
    Draw,
    /// Sword sweeping in front of the player.
    Swing,
}

/// Timed attack: draw for `attack_speed`, swing for half of that, then recover
/// until twice `attack_speed` has passed since the start.
///
/// The damaging hitbox exists during the first `hitbox_lasting` of the swing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackTimer {
    attack_speed: Duration,
    hitbox_lasting: Duration,
    elapsed: Duration,
    active: bool,
}

impl AttackTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new(attack_speed: Duration, hitbox_lasting: Duration) -> Self {
        Self {
            attack_speed,
            hitbox_lasting,
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    /// Starts a new attack if the previous cycle has completed.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.elapsed = Duration::ZERO;
        true
    }

    /// Advances a running attack by `dt`, ending it once the cycle completes.
    pub fn advance(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.cycle() {
            self.active = false;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Whether a new attack may start.
    #[must_use]
    pub const fn can_attack(&self) -> bool {
        !self.active
    }

    /// Time since the running attack started.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current animation phase.
    #[must_use]
    pub fn phase(&self) -> SwordPhase {
        if !self.active {
            SwordPhase::Idle
        } else if self.elapsed < self.attack_speed {
            SwordPhase::Draw
        } else if self.elapsed < self.swing_end() {
            SwordPhase::Swing
        } else {
            SwordPhase::Idle
        }
    }

    /// Whether the damaging hitbox exists right now.
    #[must_use]
    pub fn hitbox_active(&self) -> bool {
        let window_end = self
            .attack_speed
            .saturating_add(self.hitbox_lasting)
            .min(self.swing_end());
        self.active && self.elapsed >= self.attack_speed && self.elapsed < window_end
    }

    fn swing_end(&self) -> Duration {
        self.attack_speed.saturating_add(self.attack_speed / 2)
    }

    fn cycle(&self) -> Duration {
        self.attack_speed.saturating_mul(2)
    }
}
