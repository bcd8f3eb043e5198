use std::time::Duration;

use glam::Vec2;
use masquerade_core::{
    config::PlayerConfig, Event, Facing, FrameInput, PixelRect, SpriteExtent, TileIndex,
};
use masquerade_system_player::{Player, SwordPhase};
use masquerade_world::Room;

fn room() -> Room {
    Room::new(12, 12, Vec2::splat(384.0), TileIndex::new(5, 5)).expect("room")
}

fn config() -> PlayerConfig {
    PlayerConfig {
        speed_tiles_per_second: 5.0,
        attack_speed_ms: 1_000,
        hitbox_lasting_ms: 100,
        hitbox_tiles: 2.0,
        sprite: SpriteExtent::new(16.0, 24.0),
        ..PlayerConfig::default()
    }
}

const ATTACK: FrameInput = FrameInput {
    up: false,
    down: false,
    left: false,
    right: false,
    attack: true,
    focus: false,
};

fn run(player: &mut Player, room: &Room, input: FrameInput, total_ms: u64, step_ms: u64) {
    let mut events = Vec::new();
    let mut remaining = total_ms;
    while remaining > 0 {
        let step = step_ms.min(remaining);
        player.tick(room, &input, Duration::from_millis(step), &mut events);
        remaining -= step;
    }
}

#[test]
fn attack_cycle_timing() {
    let room = room();
    let mut player = Player::spawn(&room, &config());
    let mut events = Vec::new();

    player.tick(&room, &ATTACK, Duration::from_millis(16), &mut events);
    assert_eq!(events, vec![Event::AttackStarted]);
    assert!(!player.can_attack());

    run(&mut player, &room, FrameInput::default(), 1_050, 10);
    assert!(player.hitbox().is_some());
    assert_eq!(player.sword_phase(), SwordPhase::Swing);

    run(&mut player, &room, FrameInput::default(), 100, 10);
    assert!(player.hitbox().is_none());

    run(&mut player, &room, FrameInput::default(), 849, 7);
    assert_eq!(player.attack().elapsed(), Duration::from_millis(1_999));
    assert!(!player.can_attack());

    run(&mut player, &room, FrameInput::default(), 1, 1);
    assert!(player.can_attack());
}

#[test]
fn holding_attack_does_not_restart_a_running_swing() {
    let room = room();
    let mut player = Player::spawn(&room, &config());
    let mut events = Vec::new();

    for _ in 0..100 {
        player.tick(&room, &ATTACK, Duration::from_millis(10), &mut events);
    }

    assert_eq!(events, vec![Event::AttackStarted]);
    assert_eq!(player.attack().elapsed(), Duration::from_millis(990));
}

#[test]
fn hitbox_sits_on_the_facing_side() {
    let room = room();
    let mut player = Player::spawn(&room, &config());
    let mut events = Vec::new();
    player.tick(&room, &ATTACK, Duration::from_millis(1), &mut events);
    run(&mut player, &room, FrameInput::default(), 1_000, 100);

    // Spawn tile (5, 5) at 32 px, hurtbox 32x48, hitbox two tiles square.
    assert_eq!(
        player.hitbox(),
        Some(PixelRect::new(192.0, 160.0, 64.0, 64.0))
    );

    let left = FrameInput {
        left: true,
        ..FrameInput::default()
    };
    player.tick(&room, &left, Duration::from_millis(10), &mut events);
    assert_eq!(player.body().facing(), Facing::Left);
    let hitbox = player.hitbox().expect("hitbox");
    let hurtbox = player.body().hurtbox();
    assert!((hitbox.right() - hurtbox.x).abs() < 1e-3);
    assert_eq!(hitbox.width, 64.0);
}

#[test]
fn diagonal_movement_is_normalized() {
    let room = room();
    let mut player = Player::spawn(&room, &config());
    let start = player.body().position();
    let input = FrameInput {
        down: true,
        right: true,
        ..FrameInput::default()
    };

    run(&mut player, &room, input, 100, 100);

    // 5 tiles/s at 32 px/tile covers 16 px in 100 ms.
    let travelled = player.body().position().distance(start);
    assert!((travelled - 16.0).abs() < 1e-3);
    assert_eq!(player.body().facing(), Facing::Right);
}

#[test]
fn walls_stop_the_player() {
    let room = room();
    let mut player = Player::spawn(&room, &config());
    let input = FrameInput {
        up: true,
        ..FrameInput::default()
    };

    run(&mut player, &room, input, 3_000, 16);

    assert!((player.body().position().y - 32.0).abs() < 1e-2);
    assert_eq!(player.body().position().x, 160.0);
}

#[test]
fn zoom_scales_the_hitbox() {
    let mut room = room();
    room.set_zoom(2.0);
    room.build();
    let mut player = Player::spawn(&room, &config());
    let mut events = Vec::new();
    player.tick(&room, &ATTACK, Duration::from_millis(1), &mut events);
    run(&mut player, &room, FrameInput::default(), 1_000, 250);

    let hitbox = player.hitbox().expect("hitbox");
    assert_eq!(hitbox.width, 128.0);
    assert_eq!(hitbox.x, player.body().hurtbox().right());
}
