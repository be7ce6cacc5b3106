//! Death triggers
//!
//! `OnDeath` picks one of a closed set of behaviours and is consumed when it
//! fires, so an entity dies once however many deaths were queued for it.
//! Triggers may strip components and queue more events; anything they queue
//! on the death queue is handled in the same drain.

use hourglass_core::ecs::{
    Collideable, ComponentGroup, DeathKind, Entity, Health, Layer, OnDeath, Prop, RenderData,
    Time, World,
};
use hourglass_core::event::{Events, Quit, Refresh};

/// Glyph left behind by a dead creature.
pub const CORPSE_GLYPH: char = '%';
/// Glyph left behind by a destroyed wall.
pub const RUBBLE_GLYPH: char = ',';

/// Drain the death queue one entity at a time. Returns how many ran a trigger.
pub fn resolve_deaths(world: &mut World, events: &mut Events) -> usize {
    let mut triggered = 0;
    while let Some(death) = events.deaths.pop() {
        let Some(on_death) = world.get::<OnDeath>(death.target).copied() else {
            tracing::debug!(target_entity = %death.target, "death without trigger");
            continue;
        };
        trigger(world, events, death.target, on_death.kind);
        triggered += 1;
    }
    triggered
}

pub fn trigger(world: &mut World, events: &mut Events, entity: Entity, kind: DeathKind) {
    world.remove::<OnDeath>(entity);
    tracing::info!(%entity, ?kind, "death trigger");
    match kind {
        DeathKind::Player => player_death(world, events, entity),
        DeathKind::Npc => npc_death(world, events, entity),
        DeathKind::Wall => wall_death(world, events, entity),
    }
}

fn become_corpse(world: &mut World, entity: Entity) {
    if let Some(render) = world.get_mut::<RenderData>(entity) {
        render.glyph = CORPSE_GLYPH;
        render.layer = Layer::Mid;
    }
    world.add(entity, Prop);
}

/// The player leaves a corpse and the run ends. Stats go with it, so
/// nothing can kill the player twice.
fn player_death(world: &mut World, events: &mut Events, entity: Entity) {
    become_corpse(world, entity);
    world.remove_group(entity, ComponentGroup::Stat);
    events.log("You die...");
    events.refreshes.push(Refresh::draw(entity));
    events.quits.push(Quit);
}

fn npc_death(world: &mut World, events: &mut Events, entity: Entity) {
    world.remove_group(entity, ComponentGroup::Stat);
    world.remove_group(entity, ComponentGroup::Ai);
    become_corpse(world, entity);
    if let Some(collideable) = world.get_mut::<Collideable>(entity) {
        collideable.blocks = false;
    }
    events.refreshes.push(Refresh::draw(entity));
}

fn wall_death(world: &mut World, events: &mut Events, entity: Entity) {
    world.remove::<Health>(entity);
    world.remove::<Time>(entity);
    if let Some(render) = world.get_mut::<RenderData>(entity) {
        render.glyph = RUBBLE_GLYPH;
    }
    world.remove::<Collideable>(entity);
    events.refreshes.push(Refresh::draw(entity));
}
