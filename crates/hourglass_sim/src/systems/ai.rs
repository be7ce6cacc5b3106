//! NPC decisions.

use crate::spatial;
use hourglass_core::ecs::{ComponentKind, Depth, Location, World};
use hourglass_core::event::{Events, MoveAction};
use hourglass_core::math::{step_toward, IVec2};
use rand::Rng;

/// Queue one move per NPC on the player's depth.
///
/// An NPC whose nearest enemy is inside `fov_radius` steps toward it.
/// Everyone else wanders one random step, possibly in place.
pub fn fire_npc_actions<R: Rng + ?Sized>(
    world: &World,
    events: &mut Events,
    fov_radius: i32,
    rng: &mut R,
) {
    let Some(player_depth) = world
        .player()
        .and_then(|player| world.get::<Depth>(player))
        .map(|depth| depth.z)
    else {
        return;
    };

    let npcs = world.entities_with(&[
        ComponentKind::Npc,
        ComponentKind::Location,
        ComponentKind::Depth,
    ]);
    for npc in npcs {
        let Some((location, depth)) = spatial::placement(world, npc) else {
            continue;
        };
        if depth.z != player_depth {
            continue;
        }

        let here = IVec2::new(location.x, location.y);
        let chase = spatial::nearest_enemy(world, npc)
            .map(|(target, _)| target)
            .filter(|target| spatial::all_in_radius(world, npc, fov_radius).contains(target))
            .and_then(|target| world.get::<Location>(target));

        let step = match chase {
            Some(target) => step_toward(here, IVec2::new(target.x, target.y)),
            None => IVec2::new(rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
        };
        let next = here + step;
        events.moves.push(MoveAction::new(npc, next.x, next.y));
    }
}
