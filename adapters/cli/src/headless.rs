//! Window-less backend that replays a fixed clock and steers the player with
//! a simple autopilot.

use std::time::Duration;

use anyhow::{ensure, Result as AnyResult};
use glam::Vec2;
use masquerade_core::FrameInput;
use masquerade_rendering::{Presentation, RenderingBackend, Scene, SpriteKind};
use tracing::debug;

/// Ticks spent on each leg of the patrol loop.
const PATROL_LEG: u32 = 90;
/// The autopilot swings whenever the target is closer than this many sprite widths.
const STRIKE_REACH: f32 = 1.5;

/// Drives the update closure with a synthetic clock instead of a window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadlessBackend {
    ticks: u32,
    step: Duration,
}

impl HeadlessBackend {
    pub(crate) fn new(ticks: u32, step: Duration) -> Self {
        Self { ticks, step }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput) -> Option<Scene>,
    {
        ensure!(!self.step.is_zero(), "step must be longer than zero");
        debug!(title = %presentation.window_title, ticks = self.ticks, "headless run");

        let mut clock = Duration::ZERO;
        let mut last: Option<Scene> = None;
        for tick in 0..self.ticks {
            clock += self.step;
            let input = autopilot(tick, last.as_ref());
            match update(clock, input) {
                Some(scene) => last = Some(scene),
                None => break,
            }
        }
        Ok(())
    }
}

/// Hunts the monster once it shows itself and patrols a square until then.
fn autopilot(tick: u32, scene: Option<&Scene>) -> FrameInput {
    let Some(scene) = scene else {
        return FrameInput::default();
    };
    let player = scene
        .sprites
        .iter()
        .find(|sprite| sprite.kind == SpriteKind::Player);
    let monster = scene
        .sprites
        .iter()
        .find(|sprite| sprite.kind == SpriteKind::Monster);

    match (player, monster) {
        (Some(player), Some(monster)) => {
            let offset = monster.rect.center() - player.rect.center();
            let reach = player.rect.width * STRIKE_REACH;
            let mut input = steer(offset);
            input.attack = offset.length() <= reach;
            input
        }
        _ => patrol(tick),
    }
}

fn steer(offset: Vec2) -> FrameInput {
    FrameInput {
        left: offset.x < -1.0,
        right: offset.x > 1.0,
        up: offset.y < -1.0,
        down: offset.y > 1.0,
        ..FrameInput::default()
    }
}

fn patrol(tick: u32) -> FrameInput {
    let leg = (tick / PATROL_LEG) % 4;
    FrameInput {
        up: leg == 0,
        right: leg == 1,
        down: leg == 2,
        left: leg == 3,
        ..FrameInput::default()
    }
}
