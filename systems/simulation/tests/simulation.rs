use std::time::Duration;

use masquerade_core::{
    config::{GameConfig, RoomConfig},
    EntityRef, Event, FrameInput, Outcome, SpriteExtent, TileIndex,
};
use masquerade_system_simulation::{Simulation, SimulationError};

const STEP: Duration = Duration::from_millis(16);

fn run_until<F>(
    simulation: &mut Simulation,
    input: &FrameInput,
    clock: &mut Duration,
    limit: Duration,
    mut done: F,
) -> Vec<Event>
where
    F: FnMut(&Simulation) -> bool,
{
    let mut events = Vec::new();
    let deadline = *clock + limit;
    while *clock < deadline && !done(simulation) {
        *clock += STEP;
        let _ = simulation.tick(input, *clock, &mut events);
    }
    events
}

/// Four by three room: the player on (1, 1), a single free tile on (2, 1).
fn corridor() -> GameConfig {
    let mut config = GameConfig::default();
    config.room = RoomConfig {
        columns: 4,
        rows: 3,
        surface_width: 128.0,
        surface_height: 96.0,
        spawn: TileIndex::new(1, 1),
        ..RoomConfig::default()
    };
    config.npc.count = 0;
    config.npc.sprite = SpriteExtent::new(16.0, 16.0);
    config.player.sprite = SpriteExtent::new(16.0, 16.0);
    config
}

#[test]
fn crowd_is_placed_on_passable_tiles() {
    let config = GameConfig::default();
    let simulation = Simulation::new(&config).expect("simulation");
    let room = simulation.room();

    assert_eq!(simulation.npcs().len(), config.npc.count as usize);
    let mut ids: Vec<_> = simulation.npcs().iter().map(|npc| npc.id().get()).collect();
    ids.push(simulation.monster().disguise().id().get());
    ids.sort_unstable();
    assert_eq!(ids, (0..=config.npc.count).collect::<Vec<_>>());

    let bodies = simulation
        .npcs()
        .iter()
        .map(|npc| npc.body())
        .chain(std::iter::once(simulation.monster().authoritative()));
    for body in bodies {
        let tile = TileIndex::from_pixel(body.position(), room.base_tile_size()).expect("tile");
        assert!(room.is_passable(tile));
        assert_ne!(tile, room.spawn());
    }
}

#[test]
fn rejects_invalid_configuration() {
    let mut config = GameConfig::default();
    config.timing.frame_rate = 0.0;
    assert!(matches!(
        Simulation::new(&config),
        Err(SimulationError::Config(_))
    ));

    let mut config = GameConfig::default();
    config.room.spawn = TileIndex::new(40, 0);
    assert!(matches!(
        Simulation::new(&config),
        Err(SimulationError::Room(_))
    ));
}

#[test]
fn crowd_that_fits_nowhere_is_rejected() {
    let mut config = corridor();
    config.npc.sprite = SpriteExtent::new(16.0, 24.0);
    assert!(matches!(
        Simulation::new(&config),
        Err(SimulationError::NoFreeTiles)
    ));
}

#[test]
fn zero_delta_ticks_are_skipped() {
    let mut simulation = Simulation::new(&GameConfig::default()).expect("simulation");
    let mut events = Vec::new();

    assert!(simulation
        .tick(&FrameInput::default(), Duration::ZERO, &mut events)
        .is_none());
    assert!(events.is_empty());

    let frame = simulation
        .tick(&FrameInput::default(), STEP, &mut events)
        .expect("frame");
    assert_eq!(frame.raw(), STEP);
    assert!(matches!(events.first(), Some(Event::TimeAdvanced { .. })));

    events.clear();
    assert!(simulation
        .tick(&FrameInput::default(), STEP, &mut events)
        .is_none());
    assert!(events.is_empty());
}

#[test]
fn focus_eases_time_rate_zoom_and_filter() {
    let config = GameConfig::default();
    let mut simulation = Simulation::new(&config).expect("simulation");
    let base_tile = simulation.room().base_tile_size();
    let mut clock = Duration::ZERO;
    let focus = FrameInput {
        focus: true,
        ..FrameInput::default()
    };

    let _ = run_until(&mut simulation, &focus, &mut clock, Duration::from_secs(1), |_| false);
    assert!((simulation.time_rate() - config.focus.time_rate).abs() < 1e-4);
    assert!((simulation.zoom() - config.focus.zoom).abs() < 1e-4);
    assert!((simulation.filter_strength() - 1.0).abs() < 1e-4);
    assert!((simulation.room().tile_size() - base_tile * config.focus.zoom).abs() < 1e-3);
    assert!((simulation.player().body().zoom() - config.focus.zoom).abs() < 1e-4);

    let _ = run_until(
        &mut simulation,
        &FrameInput::default(),
        &mut clock,
        Duration::from_secs(2),
        |_| false,
    );
    assert!((simulation.time_rate() - 1.0).abs() < 1e-4);
    assert!((simulation.zoom() - 1.0).abs() < 1e-4);
    assert!(simulation.filter_strength().abs() < 1e-4);
}

#[test]
fn slowed_time_stretches_the_countdown() {
    let mut config = GameConfig::default();
    config.session.countdown_ms = 10_000;
    let mut simulation = Simulation::new(&config).expect("simulation");
    let mut clock = Duration::ZERO;
    let focus = FrameInput {
        focus: true,
        ..FrameInput::default()
    };

    let _ = run_until(&mut simulation, &focus, &mut clock, Duration::from_secs(2), |_| false);
    let remaining = simulation.countdown();
    assert!(remaining > Duration::from_secs(8));
    assert!(remaining < Duration::from_secs(10));
}

#[test]
fn countdown_expiry_exposes_the_monster() {
    let mut config = GameConfig::default();
    config.session.countdown_ms = 500;
    let mut simulation = Simulation::new(&config).expect("simulation");
    let mut clock = Duration::ZERO;

    let events = run_until(
        &mut simulation,
        &FrameInput::default(),
        &mut clock,
        Duration::from_secs(1),
        |simulation| simulation.monster().is_exposed(),
    );

    let expired = events
        .iter()
        .position(|event| *event == Event::CountdownExpired)
        .expect("countdown event");
    assert_eq!(events.get(expired + 1), Some(&Event::MonsterExposed));
    assert_eq!(simulation.countdown(), Duration::ZERO);
    assert!(clock >= Duration::from_millis(500));
}

#[test]
fn exposed_monster_hunts_down_the_player() {
    let mut config = GameConfig::default();
    config.player.health = 1;
    let mut simulation = Simulation::new(&config).expect("simulation");
    let mut events = Vec::new();
    simulation.expose_monster(&mut events);
    assert_eq!(events, vec![Event::MonsterExposed]);

    let mut clock = Duration::ZERO;
    let events = run_until(
        &mut simulation,
        &FrameInput::default(),
        &mut clock,
        Duration::from_secs(60),
        |simulation| simulation.outcome() != Outcome::Running,
    );

    assert_eq!(simulation.outcome(), Outcome::PlayerLost);
    assert!(events.contains(&Event::EntityKilled {
        entity: EntityRef::Player
    }));
    assert_eq!(
        events.last(),
        Some(&Event::OutcomeDecided {
            outcome: Outcome::PlayerLost
        })
    );

    let frozen = simulation.monster().body().position();
    let _ = run_until(
        &mut simulation,
        &FrameInput::default(),
        &mut clock,
        Duration::from_secs(1),
        |_| false,
    );
    assert_eq!(simulation.monster().body().position(), frozen);
}

#[test]
fn each_swing_lands_once_and_three_swings_win() {
    let mut config = corridor();
    config.player.attack_speed_ms = 100;
    config.player.hitbox_lasting_ms = 50;
    config.player.hitbox_tiles = 1.0;
    config.monster.chase_speed_tiles_per_second = 0.001;
    let mut simulation = Simulation::new(&config).expect("simulation");
    let mut events = Vec::new();
    simulation.expose_monster(&mut events);

    let attack = FrameInput {
        attack: true,
        ..FrameInput::default()
    };
    let mut clock = Duration::ZERO;
    let events = run_until(
        &mut simulation,
        &attack,
        &mut clock,
        Duration::from_secs(2),
        |simulation| simulation.outcome() != Outcome::Running,
    );

    let monster_hits = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::EntityDamaged {
                    entity: EntityRef::Monster,
                    ..
                }
            )
        })
        .count();
    assert_eq!(monster_hits, 3);
    assert!(events.contains(&Event::EntityKilled {
        entity: EntityRef::Monster
    }));
    assert_eq!(simulation.outcome(), Outcome::PlayerWon);
    assert!(simulation.player().body().is_alive());
}
