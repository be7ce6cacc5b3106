//! Entity handles and the registry that issues them.
//!
//! Handles are plain monotonically increasing ids. They are never reused
//! within a process, so a handle whose components were all removed is simply
//! an empty key rather than a tombstone.

use std::fmt;

/// Entity handle (opaque ID)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates entity handles and answers existence queries.
#[derive(Debug)]
pub struct EntityRegistry {
    next_entity_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self { next_entity_id: 1 }
    }

    /// Issue a fresh handle.
    pub fn create(&mut self) -> Entity {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        Entity(id)
    }

    /// Total number of handles issued so far.
    pub fn count(&self) -> usize {
        (self.next_entity_id - 1) as usize
    }

    /// Whether this registry issued `entity`.
    pub fn exists(&self, entity: Entity) -> bool {
        entity.0 >= 1 && entity.0 < self.next_entity_id
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
