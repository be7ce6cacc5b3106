//! Stat phases: pulses, heals, damage, siphons and time decay.
//!
//! A stat only produces a `Death` when it crosses from positive to zero or
//! below. Hitting something that is already down does nothing further.

use hourglass_core::ecs::{Attack, ComponentKind, Depth, Health, Time, World};
use hourglass_core::event::{Damage, Death, Events, TimeDamage};

/// Apply `amount` and report whether the value just dropped out.
#[inline]
fn subtract(value: &mut i32, amount: i32) -> bool {
    let before = *value;
    *value -= amount;
    before > 0 && *value <= 0
}

/// Drain every pulse. Each one costs the actor its attack in time and deals
/// the same amount to a target that has health.
pub fn resolve_special(world: &World, events: &mut Events) {
    while let Some(pulse) = events.time_pulses.pop() {
        if !world.has::<Health>(pulse.target) {
            continue;
        }
        let Some(attack) = world.get::<Attack>(pulse.actor) else {
            continue;
        };
        events.time_damage.push(TimeDamage {
            amount: attack.value,
            target: pulse.actor,
        });
        events.damage.push(Damage {
            amount: attack.value,
            target: pulse.target,
        });
    }
}

/// Drain heals: one point each, never past `cap`.
pub fn resolve_heals(world: &mut World, events: &mut Events, cap: i32) {
    while let Some(heal) = events.heals.pop() {
        if let Some(health) = world.get_mut::<Health>(heal.target) {
            if health.value < cap {
                health.value += 1;
            }
        }
    }
}

/// Drain health damage, then time damage.
pub fn resolve_damage(world: &mut World, events: &mut Events) {
    while let Some(damage) = events.damage.pop() {
        let Some(health) = world.get_mut::<Health>(damage.target) else {
            continue;
        };
        if subtract(&mut health.value, damage.amount) {
            tracing::info!(target_entity = %damage.target, "health depleted");
            events.deaths.push(Death {
                target: damage.target,
            });
        }
    }

    while let Some(damage) = events.time_damage.pop() {
        let Some(time) = world.get_mut::<Time>(damage.target) else {
            continue;
        };
        if subtract(&mut time.value, damage.amount) {
            tracing::info!(target_entity = %damage.target, "time ran out");
            events.deaths.push(Death {
                target: damage.target,
            });
        }
    }
}

/// Drain siphons. With attack `a` against a target that has time: the
/// target loses `a`, the initiator pays `a - 1` and is credited `a` on the
/// spot, for a net gain of one.
///
/// The time damage is queued and lands on the next damage pass.
pub fn resolve_time_siphon(world: &mut World, events: &mut Events) {
    while let Some(siphon) = events.time_siphons.pop() {
        if !world.has::<Time>(siphon.target) {
            continue;
        }
        let Some(amount) = world.get::<Attack>(siphon.actor).map(|a| a.value) else {
            continue;
        };

        events.time_damage.push(TimeDamage {
            amount,
            target: siphon.target,
        });
        if amount - 1 > 0 {
            events.time_damage.push(TimeDamage {
                amount: amount - 1,
                target: siphon.actor,
            });
        }
        if let Some(time) = world.get_mut::<Time>(siphon.actor) {
            time.value += amount;
        }
        tracing::debug!(actor = %siphon.actor, target_entity = %siphon.target, amount, "time siphoned");
    }
}

/// Drain `decay_rate` from every timed entity within one level of the
/// player. Levels further away are frozen.
pub fn update_time_decay(world: &mut World, events: &mut Events) {
    let Some(player_depth) = world
        .player()
        .and_then(|player| world.get::<Depth>(player))
        .map(|depth| depth.z)
    else {
        return;
    };

    for entity in world.entities_with(&[ComponentKind::Time, ComponentKind::Depth]) {
        let near = world
            .get::<Depth>(entity)
            .map_or(false, |depth| (depth.z - player_depth).abs() <= 1);
        if !near {
            continue;
        }
        let Some(time) = world.get_mut::<Time>(entity) else {
            continue;
        };
        let rate = time.decay_rate;
        if subtract(&mut time.value, rate) {
            tracing::info!(%entity, "time decayed away");
            events.deaths.push(Death { target: entity });
        }
    }
}
