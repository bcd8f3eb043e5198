use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use masquerade_core::{config::GameConfig, Event, FrameInput};
use masquerade_system_simulation::Simulation;

#[test]
fn deterministic_replay_produces_identical_sessions() {
    let first = replay(&GameConfig::default(), scripted_inputs());
    let second = replay(&GameConfig::default(), scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first.retargets > 0, "crowd never wandered");
    assert!(first.attacks > 0, "scripted attacks never started");
}

#[test]
fn different_seeds_produce_different_crowds() {
    let mut reseeded = GameConfig::default();
    reseeded.session.seed ^= 0x5a5a_5a5a;

    let first = replay(&GameConfig::default(), scripted_inputs());
    let second = replay(&reseeded, scripted_inputs());

    assert_ne!(first.fingerprint(), second.fingerprint());
}

fn scripted_inputs() -> Vec<(Duration, FrameInput)> {
    let mut script = Vec::new();
    let mut clock = Duration::ZERO;
    for tick in 0_u32..900 {
        // Irregular host clock, including a repeated reading every 50 ticks.
        let step = if tick % 50 == 0 { 0 } else { 10 + u64::from(tick % 7) };
        clock += Duration::from_millis(step);
        let input = FrameInput {
            up: (100..220).contains(&tick),
            left: (220..300).contains(&tick),
            right: (500..620).contains(&tick),
            down: (620..700).contains(&tick),
            attack: tick % 120 == 30,
            focus: (300..450).contains(&tick),
        };
        script.push((clock, input));
    }
    script
}

fn replay(config: &GameConfig, script: Vec<(Duration, FrameInput)>) -> ReplayOutcome {
    let mut simulation = Simulation::new(config).expect("simulation");
    let mut events = Vec::new();
    let mut skipped = 0_u32;

    for (now, input) in script {
        if simulation.tick(&input, now, &mut events).is_none() {
            skipped += 1;
        }
    }

    let mut positions: Vec<(u32, u32, u32)> = simulation
        .npcs()
        .iter()
        .map(|npc| {
            let position = npc.body().position();
            (npc.id().get(), position.x.to_bits(), position.y.to_bits())
        })
        .collect();
    let monster = simulation.monster().body().position();
    positions.push((u32::MAX, monster.x.to_bits(), monster.y.to_bits()));
    let player = simulation.player().body().position();
    positions.push((u32::MAX - 1, player.x.to_bits(), player.y.to_bits()));

    ReplayOutcome {
        positions,
        log: events.iter().map(EventRecord::from).collect(),
        skipped,
        retargets: events
            .iter()
            .filter(|event| matches!(event, Event::NpcRetargeted { .. }))
            .count(),
        attacks: events
            .iter()
            .filter(|event| matches!(event, Event::AttackStarted))
            .count(),
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    positions: Vec<(u32, u32, u32)>,
    log: Vec<EventRecord>,
    skipped: u32,
    retargets: usize,
    attacks: usize,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced { micros: u128, rate_bits: u32 },
    NpcRetargeted { npc: u32, x_bits: u32, y_bits: u32 },
    Other(String),
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimeAdvanced { dt, time_rate } => Self::TimeAdvanced {
                micros: dt.as_micros(),
                rate_bits: time_rate.to_bits(),
            },
            Event::NpcRetargeted { npc, target } => Self::NpcRetargeted {
                npc: npc.get(),
                x_bits: target.x.to_bits(),
                y_bits: target.y.to_bits(),
            },
            other => Self::Other(format!("{other:?}")),
        }
    }
}
