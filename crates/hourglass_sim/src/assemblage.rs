//! Entity templates.
//!
//! Each function creates one entity with a fixed component set and returns
//! its handle. None of them queue events; the first level refresh draws
//! everything.

use hourglass_core::ecs::{
    AdjList, Ascender, Attack, Camera, Carriable, Collideable, DeathKind, Defense, Depth,
    Descender, Entity, Faction, Health, Inventory, Layer, Location, Npc, OnDeath, Player, Prop,
    RenderData, Time, Timer, World, Yendor,
};
use hourglass_services::RuleSettings;

pub const PLAYER_FACTION: i32 = 0;
pub const MONSTER_FACTION: i32 = 1;

/// Player inventory size before the configured cap applies.
const PLAYER_PACK: usize = 10;

fn placed(world: &mut World, x: i32, y: i32, z: i32, layer: Layer, glyph: char) -> Entity {
    let e = world.create_entity();
    world.add(e, Location::new(x, y));
    world.add(e, Depth::new(z));
    world.add(e, RenderData::new(layer, glyph));
    e
}

pub fn player(world: &mut World, x: i32, y: i32, z: i32, rules: &RuleSettings) -> Entity {
    let e = placed(world, x, y, z, Layer::Front, '@');
    world.add(e, Player);
    world.add(e, Health { value: rules.heal_cap });
    world.add(e, Attack { value: 1 });
    world.add(e, Defense { value: 1 });
    world.add(e, Time { value: 200, decay_rate: 1 });
    world.add(e, Faction { value: PLAYER_FACTION });
    world.add(e, Collideable { blocks: true });
    world.add(e, Inventory::new(PLAYER_PACK.min(rules.inventory_max)));
    world.add(e, Timer::new(rules.regen_period));
    world.add(e, OnDeath { kind: DeathKind::Player });
    e
}

/// Free-floating camera. Has a location but no depth, so nothing collides
/// with it.
pub fn camera(world: &mut World, x: i32, y: i32) -> Entity {
    let e = world.create_entity();
    world.add(e, Camera);
    world.add(e, Location::new(x, y));
    e
}

fn monster(
    world: &mut World,
    (x, y, z): (i32, i32, i32),
    glyph: char,
    health: i32,
    attack: i32,
    time: i32,
) -> Entity {
    let e = placed(world, x, y, z, Layer::Front, glyph);
    world.add(e, Npc);
    world.add(e, Health { value: health });
    world.add(e, Attack { value: attack });
    world.add(e, Defense { value: 0 });
    world.add(e, Time { value: time, decay_rate: 1 });
    world.add(e, Faction { value: MONSTER_FACTION });
    world.add(e, Collideable { blocks: true });
    world.add(e, OnDeath { kind: DeathKind::Npc });
    e
}

pub fn zombie(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    monster(world, (x, y, z), 'z', 4, 1, 60)
}

/// Rare, harder-hitting monster.
pub fn wight(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    monster(world, (x, y, z), 'W', 6, 2, 120)
}

pub fn floor(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = placed(world, x, y, z, Layer::Back, '.');
    world.add(e, AdjList::default());
    e
}

/// Wall tile. Border walls are indestructible; interior ones can be dug
/// through.
pub fn wall(world: &mut World, x: i32, y: i32, z: i32, destructible: bool) -> Entity {
    let e = placed(world, x, y, z, Layer::Back, '#');
    world.add(e, Collideable { blocks: true });
    world.add(e, AdjList::default());
    if destructible {
        world.add(e, Health { value: 3 });
        world.add(e, OnDeath { kind: DeathKind::Wall });
    }
    e
}

/// Stair going up. Link it with `dungeon::link_stairs`.
pub fn up_stairs(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = placed(world, x, y, z, Layer::MidBack, '<');
    world.add(e, Ascender::default());
    world.add(e, AdjList::default());
    e
}

pub fn down_stairs(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = placed(world, x, y, z, Layer::MidBack, '>');
    world.add(e, Descender::default());
    world.add(e, AdjList::default());
    e
}

pub fn sword(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = placed(world, x, y, z, Layer::Mid, ')');
    world.add(e, Prop);
    world.add(e, Carriable);
    e
}

/// The hourglass. Carrying it out of the top level wins.
pub fn objective(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = placed(world, x, y, z, Layer::Mid, '&');
    world.add(e, Prop);
    world.add(e, Carriable);
    world.add(e, Yendor);
    e
}
