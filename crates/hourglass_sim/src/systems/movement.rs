//! Movement phases: stairs, physics, collisions and level-change redraws.
//!
//! The first three pop a single event per call. The pipeline reruns them
//! until the intent queues drain.

use crate::spatial;
use hourglass_core::ecs::{
    Ascender, Attack, Collideable, ComponentKind, Depth, Descender, Entity, Inventory, Location,
    World, Yendor,
};
use hourglass_core::event::{
    Ascent, ClearScreen, Collision, Damage, Descent, Events, MoveAction, Quit, Refresh,
    Reversible, TimeSiphon, Win,
};
use hourglass_core::math::GridBounds;

/// Index of the top level. Going up from here leaves the dungeon.
pub const TOP_DEPTH: i32 = 0;

/// Take one stair intent.
///
/// The actor must stand on a stair of the matching direction on its own
/// depth. A linked stair moves the actor to the far end; an unlinked one
/// drops the intent. The player climbing the top stair ends the run.
pub fn update_depth(world: &mut World, events: &mut Events) {
    let Some(mut change) = events.level_changes.pop() else {
        return;
    };
    let actor = change.entity;
    let Some((location, depth)) = spatial::placement(world, actor) else {
        tracing::debug!(%actor, "level change without placement dropped");
        return;
    };

    let direction = change.z - depth.z;
    let stair_kind = match direction {
        d if d < 0 => ComponentKind::Ascender,
        d if d > 0 => ComponentKind::Descender,
        _ => return,
    };

    let Some(stair) = spatial::entities_at(world, location.x, location.y, depth.z, &[stair_kind])
        .into_iter()
        .next()
    else {
        events.log(if direction < 0 {
            "There is no way up here."
        } else {
            "There is no way down here."
        });
        return;
    };

    if direction < 0 && world.player() == Some(actor) && depth.z == TOP_DEPTH {
        leave_dungeon(world, events, actor);
        return;
    }

    let link = if direction < 0 {
        world.get::<Ascender>(stair).and_then(|a| a.up)
    } else {
        world.get::<Descender>(stair).and_then(|d| d.down)
    };
    let Some(destination) = link.and_then(|linked| world.get::<Location>(linked).copied()) else {
        tracing::warn!(%actor, %stair, "stair has no link, intent dropped");
        return;
    };

    if !change.execute(world) {
        return;
    }
    tracing::info!(%actor, from = depth.z, to = change.z, "changed level");
    if direction < 0 {
        events.ascents.push(Ascent);
    } else {
        events.descents.push(Descent);
    }
    events
        .moves
        .push(MoveAction::arriving(change, destination.x, destination.y));
}

fn leave_dungeon(world: &World, events: &mut Events, actor: Entity) {
    let carrying_yendor = world
        .get::<Inventory>(actor)
        .map_or(false, |inventory| {
            inventory.items().any(|item| world.has::<Yendor>(item))
        });
    if carrying_yendor {
        tracing::info!(%actor, "escaped with the objective");
        events.log("You escape with the hourglass!");
        events.wins.push(Win);
    } else {
        tracing::info!(%actor, "left the dungeon empty-handed");
        events.log("You flee the dungeon.");
    }
    events.log("Press any key to continue...");
    events.quits.push(Quit);
}

/// Take one move intent: execute it, revert it if it left the map, queue
/// a redraw and at most one collision.
///
/// The collision partner is the lowest-handle collideable sharing the
/// mover's cell on the mover's depth after the move.
pub fn update_physics(world: &mut World, events: &mut Events, bounds: GridBounds) {
    let Some(mut action) = events.moves.pop() else {
        return;
    };
    let actor = action.entity;
    if !action.execute(world) {
        tracing::debug!(%actor, "move without location dropped");
        return;
    }

    if !bounds.contains(action.x, action.y) {
        action.undo(world);
    }
    events.refreshes.push(Refresh::draw(actor));

    let Some((location, depth)) = spatial::placement(world, actor) else {
        return;
    };
    if let Some(receiver) = spatial::collider_at(world, location.x, location.y, depth.z, actor) {
        tracing::debug!(initiator = %actor, %receiver, x = location.x, y = location.y, "collision");
        events.collisions.push(Collision {
            initiator: actor,
            receiver,
            action,
        });
    }
}

/// Take one collision: push the mover back off blockers, and let an
/// attacker hit what it ran into. A blocked stair arrival also returns the
/// mover to the depth it came from.
pub fn update_collisions(world: &mut World, events: &mut Events) {
    let Some(collision) = events.collisions.pop() else {
        return;
    };

    let blocks = world
        .get::<Collideable>(collision.receiver)
        .map_or(false, |c| c.blocks);
    if blocks {
        collision.action.undo(world);
    }

    if let Some(attack) = world.get::<Attack>(collision.initiator) {
        events.damage.push(Damage {
            amount: attack.value,
            target: collision.receiver,
        });
        events.time_siphons.push(TimeSiphon {
            actor: collision.initiator,
            target: collision.receiver,
        });
    }
}

/// Drain the ascent and descent signals. If any were pending, redraw the
/// player's new level from scratch.
pub fn resolve_level_change(world: &World, events: &mut Events) {
    let mut changed = false;
    while events.ascents.pop().is_some() {
        changed = true;
    }
    while events.descents.pop().is_some() {
        changed = true;
    }
    if changed {
        refresh_player_level(world, events);
    }
}

/// Queue draws for everything on the player's depth, erases for the rest,
/// and a screen clear.
pub fn refresh_player_level(world: &World, events: &mut Events) {
    let Some(player_depth) = world.player().and_then(|p| world.get::<Depth>(p)).map(|d| d.z)
    else {
        return;
    };

    let drawable = world.entities_with(&[
        ComponentKind::Depth,
        ComponentKind::RenderData,
        ComponentKind::Location,
    ]);
    for entity in drawable {
        let on_level = world
            .get::<Depth>(entity)
            .map_or(false, |depth| depth.z == player_depth);
        events.refreshes.push(if on_level {
            Refresh::draw(entity)
        } else {
            Refresh::erase(entity)
        });
    }
    events.clear_screen.push(ClearScreen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hero, monster, placed};
    use hourglass_core::ecs::{Layer, RenderData};
    use hourglass_core::event::ChangeLevel;

    fn bounds() -> GridBounds {
        GridBounds::new(20, 20)
    }

    #[test]
    fn mover_into_stacked_blockers_is_reverted_once() {
        let mut world = World::new();
        let mut events = Events::new();
        let first = placed(&mut world, 5, 5, 0);
        world.add(first, Collideable { blocks: true });
        let second = placed(&mut world, 5, 5, 0);
        world.add(second, Collideable { blocks: true });
        let mover = placed(&mut world, 4, 5, 0);
        world.add(mover, Collideable { blocks: true });
        world.add(mover, Attack { value: 2 });

        events.moves.push(MoveAction::new(mover, 5, 5));
        update_physics(&mut world, &mut events, bounds());
        assert_eq!(events.collisions.len(), 1);
        assert_eq!(events.collisions.peek().unwrap().receiver, first);
        update_collisions(&mut world, &mut events);

        let location = world.get::<Location>(mover).unwrap();
        assert_eq!((location.x, location.y), (4, 5));
        assert_eq!(events.damage.len(), 1);
        assert_eq!(
            events.damage.pop(),
            Some(Damage { amount: 2, target: first })
        );
        assert_eq!(events.time_siphons.len(), 1);
    }

    #[test]
    fn non_blocking_collideable_lets_mover_through() {
        let mut world = World::new();
        let mut events = Events::new();
        let corpse = placed(&mut world, 5, 5, 0);
        world.add(corpse, Collideable { blocks: false });
        let mover = placed(&mut world, 4, 5, 0);

        events.moves.push(MoveAction::new(mover, 5, 5));
        update_physics(&mut world, &mut events, bounds());
        update_collisions(&mut world, &mut events);

        assert!(world.get::<Location>(mover).unwrap().is_at(5, 5));
        assert!(events.damage.is_empty());
    }

    #[test]
    fn blocker_on_other_depth_is_ignored() {
        let mut world = World::new();
        let mut events = Events::new();
        let wall = placed(&mut world, 5, 5, 1);
        world.add(wall, Collideable { blocks: true });
        let mover = placed(&mut world, 4, 5, 0);

        events.moves.push(MoveAction::new(mover, 5, 5));
        update_physics(&mut world, &mut events, bounds());
        assert!(events.collisions.is_empty());
        assert_eq!(events.refreshes.pop(), Some(Refresh::draw(mover)));
    }

    #[test]
    fn out_of_bounds_move_is_undone() {
        let mut world = World::new();
        let mut events = Events::new();
        let mover = placed(&mut world, 0, 3, 0);

        events.moves.push(MoveAction::new(mover, -1, 3));
        update_physics(&mut world, &mut events, bounds());
        assert_eq!(*world.get::<Location>(mover).unwrap(), Location::new(0, 3));
    }

    fn linked_stairs(world: &mut World) -> (Entity, Entity) {
        let down = placed(world, 3, 3, 0);
        let up = placed(world, 8, 9, 1);
        world.add(down, Descender { down: Some(up) });
        world.add(up, Ascender { up: Some(down) });
        (down, up)
    }

    #[test]
    fn descending_moves_to_linked_stair() {
        let mut world = World::new();
        let mut events = Events::new();
        linked_stairs(&mut world);
        let player = hero(&mut world, 3, 3, 0);

        events.level_changes.push(ChangeLevel::new(player, 1));
        update_depth(&mut world, &mut events);
        assert_eq!(world.get::<Depth>(player).unwrap().z, 1);
        assert_eq!(events.descents.len(), 1);

        update_physics(&mut world, &mut events, bounds());
        assert!(world.get::<Location>(player).unwrap().is_at(8, 9));

        resolve_level_change(&world, &mut events);
        assert!(events.descents.is_empty());
        assert_eq!(events.clear_screen.len(), 1);
    }

    #[test]
    fn blocked_arrival_returns_to_the_upper_level() {
        let mut world = World::new();
        let mut events = Events::new();
        let (_, up) = linked_stairs(&mut world);
        let player = hero(&mut world, 3, 3, 0);
        let guard = monster(&mut world, 8, 9, 1);
        assert!(up < guard);

        events.level_changes.push(ChangeLevel::new(player, 1));
        update_depth(&mut world, &mut events);
        update_physics(&mut world, &mut events, bounds());
        assert_eq!(events.collisions.peek().unwrap().receiver, guard);
        update_collisions(&mut world, &mut events);

        assert!(world.get::<Location>(player).unwrap().is_at(3, 3));
        assert_eq!(world.get::<Depth>(player).unwrap().z, 0);
        assert_eq!(events.damage.pop(), Some(Damage { amount: 1, target: guard }));

        resolve_level_change(&world, &mut events);
        let refreshes: Vec<Refresh> = std::iter::from_fn(|| events.refreshes.pop()).collect();
        assert!(refreshes.contains(&Refresh::draw(player)));
        assert!(refreshes.contains(&Refresh::erase(guard)));
    }

    #[test]
    fn receiver_that_lost_collideable_does_not_block() {
        let mut world = World::new();
        let mut events = Events::new();
        let wall = placed(&mut world, 5, 5, 0);
        world.add(wall, Collideable { blocks: true });
        let mover = placed(&mut world, 4, 5, 0);
        world.add(mover, Attack { value: 1 });

        events.moves.push(MoveAction::new(mover, 5, 5));
        update_physics(&mut world, &mut events, bounds());
        assert_eq!(events.collisions.len(), 1);
        world.remove::<Collideable>(wall);
        update_collisions(&mut world, &mut events);

        assert!(world.get::<Location>(mover).unwrap().is_at(5, 5));
        assert_eq!(events.damage.pop(), Some(Damage { amount: 1, target: wall }));
    }

    #[test]
    fn descending_off_a_stair_does_nothing() {
        let mut world = World::new();
        let mut events = Events::new();
        linked_stairs(&mut world);
        let player = hero(&mut world, 4, 3, 0);

        events.level_changes.push(ChangeLevel::new(player, 1));
        update_depth(&mut world, &mut events);
        assert_eq!(world.get::<Depth>(player).unwrap().z, 0);
        assert!(events.moves.is_empty());
    }

    #[test]
    fn unlinked_stair_drops_intent() {
        let mut world = World::new();
        let mut events = Events::new();
        let stair = placed(&mut world, 2, 2, 1);
        world.add(stair, Descender::default());
        let npc = monster(&mut world, 2, 2, 1);

        events.level_changes.push(ChangeLevel::new(npc, 2));
        update_depth(&mut world, &mut events);
        assert_eq!(world.get::<Depth>(npc).unwrap().z, 1);
        assert!(events.descents.is_empty());
        assert!(events.moves.is_empty());
    }

    #[test]
    fn top_stair_with_objective_wins() {
        let mut world = World::new();
        let mut events = Events::new();
        let exit = placed(&mut world, 1, 1, TOP_DEPTH);
        world.add(exit, Ascender::default());
        let player = hero(&mut world, 1, 1, TOP_DEPTH);
        let relic = world.create_entity();
        world.add(relic, Yendor);
        let mut inventory = Inventory::new(4);
        inventory.store(relic);
        world.add(player, inventory);

        events.level_changes.push(ChangeLevel::new(player, TOP_DEPTH - 1));
        update_depth(&mut world, &mut events);
        assert_eq!(events.wins.len(), 1);
        assert_eq!(events.quits.len(), 1);
        assert_eq!(world.get::<Depth>(player).unwrap().z, TOP_DEPTH);
    }

    #[test]
    fn top_stair_without_objective_only_quits() {
        let mut world = World::new();
        let mut events = Events::new();
        let exit = placed(&mut world, 1, 1, TOP_DEPTH);
        world.add(exit, Ascender::default());
        let player = hero(&mut world, 1, 1, TOP_DEPTH);
        world.add(player, Inventory::new(4));

        events.level_changes.push(ChangeLevel::new(player, TOP_DEPTH - 1));
        update_depth(&mut world, &mut events);
        assert!(events.wins.is_empty());
        assert_eq!(events.quits.len(), 1);
    }

    #[test]
    fn level_refresh_splits_by_player_depth() {
        let mut world = World::new();
        let mut events = Events::new();
        let player = hero(&mut world, 1, 1, 1);
        let here = placed(&mut world, 2, 2, 1);
        world.add(here, RenderData::new(Layer::Back, '.'));
        let there = placed(&mut world, 2, 2, 0);
        world.add(there, RenderData::new(Layer::Back, '.'));

        events.ascents.push(Ascent);
        resolve_level_change(&world, &mut events);
        let refreshes: Vec<Refresh> = std::iter::from_fn(|| events.refreshes.pop()).collect();
        assert!(refreshes.contains(&Refresh::draw(player)));
        assert!(refreshes.contains(&Refresh::draw(here)));
        assert!(refreshes.contains(&Refresh::erase(there)));
        assert_eq!(events.clear_screen.len(), 1);
    }
}
