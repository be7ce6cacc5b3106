// component.rs - Per-kind component tables
//
// Every component kind owns one table keyed by entity handle. Removals are
// recorded in a per-table "just removed" buffer so the renderer can still see
// the last known state of something that vanished mid-turn.

use crate::ecs::{ComponentKind, Components, Entity};
use std::collections::BTreeMap;

/// Trait for typed component records.
///
/// Implemented by `declare_components!`, which also generates the matching
/// `ComponentKind` variant and the field on `Components`.
pub trait Component: 'static + Sized {
    /// Runtime tag for this kind.
    const KIND: ComponentKind;

    /// The table holding every instance of this kind.
    fn table(components: &Components) -> &Table<Self>;

    /// Mutable access to the table holding every instance of this kind.
    fn table_mut(components: &mut Components) -> &mut Table<Self>;
}

/// Storage for one component kind.
///
/// Rows iterate in ascending entity order, which is what gives the phases a
/// stable "first match wins" order.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<Entity, T>,
    just_removed: Vec<(Entity, T)>,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            just_removed: Vec::new(),
        }
    }

    /// Insert or overwrite. An overwritten value is returned, not buffered.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        self.rows.insert(entity, value)
    }

    /// Remove the instance for `entity`, recording it as just removed.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.rows.remove(&entity) {
            Some(old) => {
                self.just_removed.push((entity, old));
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.rows.get(&entity)
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.rows.get_mut(&entity)
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.rows.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entities with an instance in this table, ascending.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rows.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.rows.iter().map(|(entity, value)| (*entity, value))
    }

    /// Instances removed since the last cleanup, oldest first.
    pub fn just_removed(&self) -> &[(Entity, T)] {
        &self.just_removed
    }

    pub fn clear_removed(&mut self) {
        self.just_removed.clear();
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare the closed set of component kinds.
///
/// Generates the `ComponentKind` tag enum, the `Components` struct with one
/// `Table` per kind, kind-erased helpers on `Components`, and a `Component`
/// impl for every listed type.
///
/// # Example
/// ```ignore
/// declare_components! {
///     location: Location,
///     depth: Depth,
/// }
/// ```
macro_rules! declare_components {
    ($($field:ident: $ty:ident),+ $(,)?) => {
        /// Runtime tag for each component kind.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ComponentKind {
            $($ty),+
        }

        impl ComponentKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$ty),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$ty => stringify!($ty)),+
                }
            }
        }

        /// One table per component kind.
        #[derive(Debug, Default)]
        pub struct Components {
            $(pub $field: $crate::ecs::Table<$ty>,)+
        }

        impl Components {
            pub fn contains(&self, kind: ComponentKind, entity: $crate::ecs::Entity) -> bool {
                match kind {
                    $(ComponentKind::$ty => self.$field.contains(entity)),+
                }
            }

            pub fn remove(&mut self, kind: ComponentKind, entity: $crate::ecs::Entity) -> bool {
                match kind {
                    $(ComponentKind::$ty => self.$field.remove(entity)),+
                }
            }

            pub fn len_of(&self, kind: ComponentKind) -> usize {
                match kind {
                    $(ComponentKind::$ty => self.$field.len()),+
                }
            }

            pub fn entities_of(&self, kind: ComponentKind) -> Vec<$crate::ecs::Entity> {
                match kind {
                    $(ComponentKind::$ty => self.$field.entities().collect()),+
                }
            }

            /// Entities removed from `kind` since the last cleanup.
            pub fn removed_from(&self, kind: ComponentKind) -> Vec<$crate::ecs::Entity> {
                match kind {
                    $(ComponentKind::$ty => self.$field.just_removed().iter().map(|(e, _)| *e).collect()),+
                }
            }

            /// Drop every table's pending-removal buffer.
            pub fn cleanup(&mut self) {
                $(self.$field.clear_removed();)+
            }
        }

        $(
            impl $crate::ecs::Component for $ty {
                const KIND: ComponentKind = ComponentKind::$ty;

                #[inline]
                fn table(components: &Components) -> &$crate::ecs::Table<Self> {
                    &components.$field
                }

                #[inline]
                fn table_mut(components: &mut Components) -> &mut $crate::ecs::Table<Self> {
                    &mut components.$field
                }
            }
        )+
    };
}
