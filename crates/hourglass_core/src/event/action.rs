//! Reversible intents.
//!
//! `execute` applies the change and keeps a copy of the state it replaced;
//! `undo` puts that copy back. Undo is single-level and only ever follows the
//! execute of the same action within one resolution step.

use crate::ecs::{Depth, Entity, Location, World};

/// An intent that can be applied to the world and rolled back.
pub trait Reversible {
    /// Apply the change. Returns `false` when the actor lacks the component
    /// the action operates on, in which case nothing happened.
    fn execute(&mut self, world: &mut World) -> bool;

    /// Restore the state captured by the last `execute`. No-op if the action
    /// never executed or the component has since been removed.
    fn undo(&self, world: &mut World);
}

/// Move `entity` to `(x, y)`.
///
/// A move that finishes a stair trip carries the executed level change;
/// undoing the move puts the entity back on its old depth too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAction {
    pub entity: Entity,
    pub x: i32,
    pub y: i32,
    arrival: Option<ChangeLevel>,
    previous: Option<Location>,
}

impl MoveAction {
    pub fn new(entity: Entity, x: i32, y: i32) -> Self {
        Self {
            entity,
            x,
            y,
            arrival: None,
            previous: None,
        }
    }

    /// Move to the far end of a stair after `change` has executed.
    pub fn arriving(change: ChangeLevel, x: i32, y: i32) -> Self {
        let entity = change.entity;
        Self {
            arrival: Some(change),
            ..Self::new(entity, x, y)
        }
    }

    pub fn arrival(&self) -> Option<&ChangeLevel> {
        self.arrival.as_ref()
    }

    pub fn has_executed(&self) -> bool {
        self.previous.is_some()
    }
}

impl Reversible for MoveAction {
    fn execute(&mut self, world: &mut World) -> bool {
        let Some(location) = world.get_mut::<Location>(self.entity) else {
            return false;
        };
        self.previous = Some(*location);
        location.last_x = location.x;
        location.last_y = location.y;
        location.x = self.x;
        location.y = self.y;
        true
    }

    fn undo(&self, world: &mut World) {
        let Some(previous) = self.previous else {
            return;
        };
        if let Some(location) = world.get_mut::<Location>(self.entity) {
            *location = previous;
        }
        if let Some(change) = &self.arrival {
            change.undo(world);
        }
    }
}

/// Move `entity` to depth `z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLevel {
    pub entity: Entity,
    pub z: i32,
    previous: Option<Depth>,
}

impl ChangeLevel {
    pub fn new(entity: Entity, z: i32) -> Self {
        Self {
            entity,
            z,
            previous: None,
        }
    }
}

impl Reversible for ChangeLevel {
    fn execute(&mut self, world: &mut World) -> bool {
        let Some(depth) = world.get_mut::<Depth>(self.entity) else {
            return false;
        };
        self.previous = Some(*depth);
        depth.last_z = depth.z;
        depth.z = self.z;
        true
    }

    fn undo(&self, world: &mut World) {
        let Some(previous) = self.previous else {
            return;
        };
        if let Some(depth) = world.get_mut::<Depth>(self.entity) {
            *depth = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_undo_is_exact() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut start = Location::new(4, 7);
        start.last_x = 3;
        start.last_y = 6;
        world.add(e, start);

        let mut action = MoveAction::new(e, 5, 8);
        assert!(action.execute(&mut world));
        let moved = *world.get::<Location>(e).unwrap();
        assert_eq!((moved.x, moved.y, moved.last_x, moved.last_y), (5, 8, 4, 7));

        action.undo(&mut world);
        assert_eq!(*world.get::<Location>(e).unwrap(), start);
    }

    #[test]
    fn move_without_location_does_nothing() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut action = MoveAction::new(e, 1, 1);
        assert!(!action.execute(&mut world));
        assert!(!action.has_executed());
        action.undo(&mut world);
        assert!(world.get::<Location>(e).is_none());
    }

    #[test]
    fn undoing_an_arrival_restores_depth() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Location::new(3, 3));
        world.add(e, Depth::new(0));

        let mut change = ChangeLevel::new(e, 1);
        assert!(change.execute(&mut world));
        let mut arrival = MoveAction::arriving(change, 8, 9);
        assert!(arrival.execute(&mut world));
        assert_eq!(world.get::<Depth>(e).unwrap().z, 1);

        arrival.undo(&mut world);
        assert_eq!(*world.get::<Location>(e).unwrap(), Location::new(3, 3));
        assert_eq!(*world.get::<Depth>(e).unwrap(), Depth::new(0));
    }

    #[test]
    fn change_level_round_trip() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Depth::new(2));

        let mut action = ChangeLevel::new(e, 3);
        assert!(action.execute(&mut world));
        assert_eq!(world.get::<Depth>(e).unwrap().z, 3);
        assert_eq!(world.get::<Depth>(e).unwrap().last_z, 2);

        action.undo(&mut world);
        assert_eq!(*world.get::<Depth>(e).unwrap(), Depth::new(2));
    }
}
