//! Spatial queries over `Location + Depth`.
//!
//! Entities without both components never show up here. All scans walk
//! owned snapshots in ascending handle order, so ties go to the lowest handle.

use hourglass_core::ecs::{Collideable, ComponentKind, Depth, Entity, Faction, Location, World};

/// The entity's position and depth, when it has both.
pub fn placement(world: &World, entity: Entity) -> Option<(Location, Depth)> {
    let location = world.get::<Location>(entity)?;
    let depth = world.get::<Depth>(entity)?;
    Some((*location, *depth))
}

/// Other placed entities on the same depth strictly inside `radius`.
pub fn all_in_radius(world: &World, entity: Entity, radius: i32) -> Vec<Entity> {
    let Some((origin, depth)) = placement(world, entity) else {
        return Vec::new();
    };
    let radius2 = radius * radius;

    world
        .entities_with(&[ComponentKind::Location, ComponentKind::Depth])
        .into_iter()
        .filter(|&other| other != entity)
        .filter(|&other| match placement(world, other) {
            Some((location, other_depth)) => {
                other_depth.same_level(&depth) && location.distance2(&origin) < radius2
            }
            None => false,
        })
        .collect()
}

/// Kinds that make a placed entity an actor.
const ACTOR_KINDS: [ComponentKind; 2] = [ComponentKind::Player, ComponentKind::Npc];

/// Placed player and NPC entities, ascending.
fn actors(world: &World) -> Vec<Entity> {
    world
        .entities_with(&[ComponentKind::Location, ComponentKind::Depth])
        .into_iter()
        .filter(|&e| ACTOR_KINDS.iter().any(|&kind| world.has_kind(e, kind)))
        .collect()
}

fn nearest_matching<F>(world: &World, entity: Entity, mut accept: F) -> Option<(Entity, i32)>
where
    F: FnMut(Entity) -> bool,
{
    let (origin, depth) = placement(world, entity)?;
    let mut best: Option<(Entity, i32)> = None;

    for candidate in actors(world) {
        if candidate == entity || !accept(candidate) {
            continue;
        }
        let Some((location, candidate_depth)) = placement(world, candidate) else {
            continue;
        };
        if !candidate_depth.same_level(&depth) {
            continue;
        }
        let dist2 = location.distance2(&origin);
        if best.map_or(true, |(_, best_dist)| dist2 < best_dist) {
            best = Some((candidate, dist2));
        }
    }
    best
}

/// Nearest player or NPC on the same depth, with its squared distance.
pub fn nearest_entity(world: &World, entity: Entity) -> Option<(Entity, i32)> {
    nearest_matching(world, entity, |_| true)
}

/// Nearest player or NPC on the same depth belonging to another faction.
pub fn nearest_enemy(world: &World, entity: Entity) -> Option<(Entity, i32)> {
    world.get::<Faction>(entity)?;
    nearest_matching(world, entity, |candidate| is_hostile(world, entity, candidate))
}

/// Both sides have a faction and they differ.
pub fn is_hostile(world: &World, a: Entity, b: Entity) -> bool {
    match (world.get::<Faction>(a), world.get::<Faction>(b)) {
        (Some(fa), Some(fb)) => fa.value != fb.value,
        _ => false,
    }
}

/// Lowest-handle collideable at `(x, y)` on depth `z`, other than `except`.
pub fn collider_at(world: &World, x: i32, y: i32, z: i32, except: Entity) -> Option<Entity> {
    world
        .entities_with(&[
            ComponentKind::Collideable,
            ComponentKind::Location,
            ComponentKind::Depth,
        ])
        .into_iter()
        .filter(|&other| other != except)
        .find(|&other| world.has::<Collideable>(other) && is_placed_at(world, other, x, y, z))
}

fn is_placed_at(world: &World, entity: Entity, x: i32, y: i32, z: i32) -> bool {
    placement(world, entity).map_or(false, |(location, depth)| location.is_at(x, y) && depth.z == z)
}

/// Placed entities carrying every kind in `kinds` at `(x, y)` on depth `z`.
pub fn entities_at(world: &World, x: i32, y: i32, z: i32, kinds: &[ComponentKind]) -> Vec<Entity> {
    let mut wanted = vec![ComponentKind::Location, ComponentKind::Depth];
    wanted.extend_from_slice(kinds);
    world
        .entities_with(&wanted)
        .into_iter()
        .filter(|&e| is_placed_at(world, e, x, y, z))
        .collect()
}
