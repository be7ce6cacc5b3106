//! Item pickup.

use crate::spatial;
use hourglass_core::ecs::{ComponentKind, Depth, Inventory, Location, World};
use hourglass_core::event::Events;

/// Take one pickup intent.
///
/// Every carriable at the cell on the actor's depth goes into the lowest
/// free slot and leaves the map. Once the inventory is full the rest stay
/// where they are.
pub fn resolve_pickup(world: &mut World, events: &mut Events) {
    let Some(pickup) = events.pickups.pop() else {
        return;
    };
    let actor = pickup.entity;
    let Some(z) = world.get::<Depth>(actor).map(|depth| depth.z) else {
        return;
    };
    if !world.has::<Inventory>(actor) {
        tracing::debug!(%actor, "pickup without inventory dropped");
        return;
    }

    let items = spatial::entities_at(world, pickup.x, pickup.y, z, &[ComponentKind::Carriable]);
    if items.is_empty() {
        events.log("There is nothing here.");
        return;
    }

    for item in items {
        let Some(inventory) = world.get_mut::<Inventory>(actor) else {
            return;
        };
        match inventory.store(item) {
            Some(slot) => {
                world.remove::<Location>(item);
                tracing::info!(%actor, %item, %slot, "picked up");
                events.log(format!("{slot} - picked up {item}"));
            }
            None => {
                tracing::info!(%actor, %item, "inventory full");
                events.log("Your pack is full.");
                break;
            }
        }
    }
}
