//! Periodic regeneration timers.

use hourglass_core::ecs::{ComponentKind, Timer, World};
use hourglass_core::event::{Events, Heal};

/// Tick every timer once; a timer reaching its period wraps to zero and
/// queues a heal for its owner.
pub fn update_timers(world: &mut World, events: &mut Events) {
    for entity in world.entities_with(&[ComponentKind::Timer]) {
        let Some(timer) = world.get_mut::<Timer>(entity) else {
            continue;
        };
        timer.time += 1;
        if timer.time >= timer.max_time {
            timer.time = 0;
            events.heals.push(Heal { target: entity });
        }
    }
}
