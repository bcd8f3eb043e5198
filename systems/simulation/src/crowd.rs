//! Initial placement of the NPC crowd and the disguised monster.

use masquerade_core::{config::GameConfig, NpcId, TileIndex};
use masquerade_system_disguise::Monster;
use masquerade_system_wander::Npc;
use masquerade_world::Room;
use rand::Rng;

use crate::SimulationError;

/// Spawns `npc.count` NPCs plus the monster on random free tiles.
///
/// The monster takes one of the `count + 1` identifiers at random so its
/// disguise cannot be told apart by id. The player's spawn tile is never used.
pub(crate) fn place<R>(
    room: &Room,
    config: &GameConfig,
    rng: &mut R,
) -> Result<(Vec<Npc>, Monster), SimulationError>
where
    R: Rng + ?Sized,
{
    let tile_size = room.base_tile_size();
    let sprite = config.npc.sprite;
    let extent = sprite.scaled(sprite.scale_to_tile(tile_size)) / tile_size;
    let width = extent.x.ceil().max(1.0) as u32;
    let height = extent.y.ceil().max(1.0) as u32;

    let free: Vec<TileIndex> = (0..room.rows())
        .flat_map(|row| (0..room.columns()).map(move |column| TileIndex::new(column, row)))
        .filter(|tile| *tile != room.spawn() && room.region_is_passable(*tile, width, height))
        .collect();
    if free.is_empty() {
        return Err(SimulationError::NoFreeTiles);
    }

    let monster_slot = rng.gen_range(0..=config.npc.count);
    let mut npcs = Vec::with_capacity(config.npc.count as usize);
    let mut monster = None;
    for slot in 0..=config.npc.count {
        let tile = free[rng.gen_range(0..free.len())];
        let position = tile.to_pixel(tile_size);
        let id = NpcId::new(slot);
        if slot == monster_slot {
            monster = Some(Monster::spawn(
                id,
                room,
                position,
                &config.monster,
                &config.npc,
            ));
        } else {
            npcs.push(Npc::spawn(id, room, position, &config.npc));
        }
    }

    monster
        .map(|monster| (npcs, monster))
        .ok_or(SimulationError::NoFreeTiles)
}
