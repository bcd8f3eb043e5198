use std::time::Duration;

use glam::Vec2;
use masquerade_core::{config::NpcConfig, Event, Facing, Health, NpcId, SpriteExtent, TileIndex};
use masquerade_system_wander::Npc;
use masquerade_world::Room;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn open_room() -> Room {
    Room::new(16, 16, Vec2::splat(512.0), TileIndex::new(8, 8)).expect("room")
}

fn config() -> NpcConfig {
    NpcConfig {
        speed_tiles_per_second: 2.5,
        auto_move_max_distance: 3,
        retarget_cooldown_ms: 4_000,
        sprite: SpriteExtent::new(16.0, 24.0),
        ..NpcConfig::default()
    }
}

#[test]
fn first_tick_picks_a_reachable_target_nearby() {
    let room = open_room();
    let spawn = TileIndex::new(8, 8).to_pixel(room.base_tile_size());
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for id in 0..32 {
        let mut npc = Npc::spawn(NpcId::new(id), &room, spawn, &config());
        let mut events = Vec::new();
        npc.tick(&room, Duration::from_millis(16), &mut rng, &mut events);

        let [Event::NpcRetargeted { npc: who, target }] = events.as_slice() else {
            panic!("expected a single retarget event, got {events:?}");
        };
        assert_eq!(*who, NpcId::new(id));
        assert_eq!(*target, npc.target());

        let tile = TileIndex::from_pixel(*target, room.base_tile_size()).expect("tile");
        assert!(tile.column().abs_diff(8) <= 3);
        assert!(tile.row().abs_diff(8) <= 3);
        assert!(room.is_passable(tile));
        assert!(room.is_passable(TileIndex::new(tile.column(), tile.row() + 1)));
    }
}

#[test]
fn walks_toward_target_at_configured_speed() {
    let room = open_room();
    let mut npc = Npc::spawn(NpcId::new(0), &room, Vec2::new(64.0, 64.0), &config());
    npc.set_target(Vec2::new(320.0, 64.0));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    npc.tick(&room, Duration::from_millis(500), &mut rng, &mut events);

    // 2.5 tiles/s at 32 px/tile.
    assert!((npc.body().position().x - 104.0).abs() < 1e-3);
    assert_eq!(npc.body().position().y, 64.0);
    assert_eq!(npc.body().facing(), Facing::Right);
    assert!(events.is_empty());
}

#[test]
fn final_step_stops_on_the_target() {
    let room = open_room();
    let mut npc = Npc::spawn(NpcId::new(0), &room, Vec2::new(200.0, 64.0), &config());
    npc.set_target(Vec2::new(192.0, 64.0));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    npc.tick(&room, Duration::from_millis(1_000), &mut rng, &mut events);

    assert!(npc.body().position().distance(Vec2::new(192.0, 64.0)) < 1e-3);
    assert_eq!(npc.body().facing(), Facing::Left);
}

#[test]
fn cooldown_forces_a_new_target() {
    let room = open_room();
    let mut npc = Npc::spawn(NpcId::new(3), &room, Vec2::new(256.0, 256.0), &config());
    let far_away = Vec2::new(64.0, 256.0);
    npc.set_target(far_away);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut events = Vec::new();

    npc.tick(&room, Duration::from_millis(3_999), &mut rng, &mut events);
    assert!(events.is_empty());
    assert_eq!(npc.target(), far_away);

    npc.tick(&room, Duration::from_millis(1), &mut rng, &mut events);
    assert!(matches!(
        events.as_slice(),
        [Event::NpcRetargeted { npc, .. }] if *npc == NpcId::new(3)
    ));
}

#[test]
fn walled_in_npc_stays_in_place() {
    // Only tile (1, 1) is passable and the footprint is two tiles tall.
    let room = Room::new(3, 3, Vec2::splat(96.0), TileIndex::new(1, 1)).expect("room");
    let start = room.spawn_position();
    let mut npc = Npc::spawn(NpcId::new(0), &room, start, &config());
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut events = Vec::new();

    for _ in 0..10 {
        npc.tick(&room, Duration::from_millis(100), &mut rng, &mut events);
    }

    assert!(events.is_empty());
    assert!(npc.is_stranded());
    assert_eq!(npc.target(), start);
    assert_eq!(npc.body().position(), start);
}

#[test]
fn dead_npcs_do_not_move() {
    let room = open_room();
    let start = Vec2::new(128.0, 128.0);
    let mut npc = Npc::spawn(NpcId::new(0), &room, start, &config());
    npc.set_health(Health::new(0));
    npc.set_target(Vec2::new(300.0, 300.0));
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut events = Vec::new();

    npc.tick(&room, Duration::from_millis(500), &mut rng, &mut events);

    assert!(events.is_empty());
    assert_eq!(npc.body().position(), start);
}

#[test]
fn same_seed_wanders_identically() {
    let room = open_room();
    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);
        let mut npc = Npc::spawn(NpcId::new(0), &room, room.spawn_position(), &config());
        let mut events = Vec::new();
        for _ in 0..600 {
            npc.tick(&room, Duration::from_millis(16), &mut rng, &mut events);
        }
        (npc.body().position(), events)
    };

    let (first_position, first_events) = run();
    let (second_position, second_events) = run();
    assert_eq!(first_position, second_position);
    assert_eq!(first_events, second_events);
    assert!(!first_events.is_empty());
}
