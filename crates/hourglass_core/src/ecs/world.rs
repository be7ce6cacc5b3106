// world.rs - Entity registry, component tables and singleton roles

use crate::ecs::{
    Component, ComponentGroup, ComponentKind, Components, Entity, EntityRegistry, WorldError,
};

/// The main container: every entity handle and every component table.
///
/// The active player and camera are plain handle fields. They are written
/// once while the world is being assembled and only read afterwards.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityRegistry,
    components: Components,
    player: Option<Entity>,
    camera: Option<Entity>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity handle with no components.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Total number of entity handles issued.
    pub fn entity_count(&self) -> usize {
        self.entities.count()
    }

    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.exists(entity)
    }

    /// Insert or overwrite a component.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) {
        T::table_mut(&mut self.components).insert(entity, component);
    }

    /// Get an immutable reference to a component, or `None` when absent.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::table(&self.components).get(entity)
    }

    /// Get a mutable reference to a component, or `None` when absent.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::table_mut(&mut self.components).get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        T::table(&self.components).contains(entity)
    }

    pub fn has_kind(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.components.contains(kind, entity)
    }

    /// Remove a component, recording it in the kind's pending-removal buffer.
    ///
    /// Nothing else is removed along with it.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> bool {
        T::table_mut(&mut self.components).remove(entity)
    }

    pub fn remove_kind(&mut self, entity: Entity, kind: ComponentKind) -> bool {
        self.components.remove(kind, entity)
    }

    /// Remove every kind belonging to `group`. Returns how many were present.
    pub fn remove_group(&mut self, entity: Entity, group: ComponentGroup) -> usize {
        let removed = group
            .kinds()
            .iter()
            .filter(|&&kind| self.remove_kind(entity, kind))
            .count();
        tracing::debug!(%entity, group = group.name(), removed, "removed component group");
        removed
    }

    /// Owned snapshot of the entities present in every listed table.
    ///
    /// Intersects starting from the smallest table. The result is ascending,
    /// so callers may mutate the world while walking it.
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        let mut ordered: Vec<ComponentKind> = kinds.to_vec();
        ordered.sort_unstable();
        ordered.dedup();
        ordered.sort_by_key(|&kind| self.components.len_of(kind));

        let Some((&first, rest)) = ordered.split_first() else {
            return Vec::new();
        };

        let mut result = self.components.entities_of(first);
        result.retain(|&entity| self.entities.exists(entity));
        for &kind in rest {
            if result.is_empty() {
                break;
            }
            result.retain(|&entity| self.components.contains(kind, entity));
        }
        result
    }

    /// Direct access to the tables, for iteration and removal buffers.
    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Clear every table's pending-removal buffer. Call once per turn.
    pub fn cleanup(&mut self) {
        self.components.cleanup();
    }

    /// Mark `entity` as the active player.
    pub fn set_player(&mut self, entity: Entity) -> Result<(), WorldError> {
        Self::claim(&mut self.player, "player", entity)
    }

    /// Mark `entity` as the active camera.
    pub fn set_camera(&mut self, entity: Entity) -> Result<(), WorldError> {
        Self::claim(&mut self.camera, "camera", entity)
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn camera(&self) -> Option<Entity> {
        self.camera
    }

    fn claim(
        slot: &mut Option<Entity>,
        role: &'static str,
        requested: Entity,
    ) -> Result<(), WorldError> {
        match *slot {
            Some(existing) if existing != requested => Err(WorldError::DuplicateSingleton {
                role,
                existing,
                requested,
            }),
            _ => {
                *slot = Some(requested);
                tracing::debug!(%requested, role, "singleton role assigned");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Attack, Camera, Depth, Health, Location, Npc, Player, Time};

    fn kinds_pairs() -> Vec<(ComponentKind, ComponentKind)> {
        let kinds = [
            ComponentKind::Location,
            ComponentKind::Depth,
            ComponentKind::Health,
            ComponentKind::Npc,
        ];
        let mut pairs = Vec::new();
        for &a in &kinds {
            for &b in &kinds {
                pairs.push((a, b));
            }
        }
        pairs
    }

    fn populated() -> World {
        let mut world = World::new();
        for i in 0..12 {
            let e = world.create_entity();
            if i % 2 == 0 {
                world.add(e, Location::new(i, i));
            }
            if i % 3 == 0 {
                world.add(e, Depth::new(0));
            }
            if i % 4 == 0 {
                world.add(e, Health { value: 3 });
            }
            if i % 5 == 0 {
                world.add(e, Npc);
            }
        }
        world
    }

    #[test]
    fn removal_is_visible_until_cleanup() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Health { value: 5 });

        assert!(world.remove::<Health>(e));
        assert!(!world.has::<Health>(e));
        assert_eq!(
            world.components().removed_from(ComponentKind::Health),
            vec![e]
        );
        assert_eq!(world.components().health.just_removed()[0].1.value, 5);

        world.cleanup();
        assert!(world.components().health.just_removed().is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(!world.remove::<Health>(e));
        assert!(world.components().removed_from(ComponentKind::Health).is_empty());
    }

    #[test]
    fn entities_with_is_symmetric_intersection() {
        let world = populated();
        for (a, b) in kinds_pairs() {
            let ab = world.entities_with(&[a, b]);
            let ba = world.entities_with(&[b, a]);
            assert_eq!(ab, ba, "{:?} vs {:?}", a, b);

            let only_a = world.entities_with(&[a]);
            let only_b = world.entities_with(&[b]);
            let manual: Vec<Entity> = only_a
                .iter()
                .copied()
                .filter(|e| only_b.contains(e))
                .collect();
            assert_eq!(ab, manual);
        }
    }

    #[test]
    fn entities_with_empty_list_is_empty() {
        let world = populated();
        assert!(world.entities_with(&[]).is_empty());
    }

    #[test]
    fn entities_with_ignores_foreign_handles() {
        let mut world = World::new();
        world.add(Entity::from_raw(99), Health { value: 1 });
        assert!(world.entities_with(&[ComponentKind::Health]).is_empty());
    }

    #[test]
    fn group_removal_strips_only_members() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Npc);
        world.add(e, Health { value: 2 });
        world.add(e, Attack { value: 1 });
        world.add(e, Time { value: 9, decay_rate: 1 });
        world.add(e, Location::new(0, 0));

        assert_eq!(world.remove_group(e, ComponentGroup::Ai), 1);
        assert!(!world.has::<Npc>(e));
        assert!(!world.has_kind(e, ComponentKind::Npc));
        assert!(world.has::<Health>(e));

        assert_eq!(world.remove_group(e, ComponentGroup::Stat), 3);
        assert!(!world.has::<Health>(e));
        assert!(!world.has::<Time>(e));
        assert!(world.has::<Location>(e));
    }

    #[test]
    fn singleton_roles_are_exclusive() {
        let mut world = World::new();
        let first = world.create_entity();
        let second = world.create_entity();
        world.add(first, Player);
        world.add(second, Camera);

        world.set_player(first).unwrap();
        world.set_player(first).unwrap();
        let err = world.set_player(second).unwrap_err();
        assert!(matches!(
            err,
            WorldError::DuplicateSingleton { role: "player", .. }
        ));

        world.set_camera(second).unwrap();
        assert_eq!(world.player(), Some(first));
        assert_eq!(world.camera(), Some(second));
    }
}
