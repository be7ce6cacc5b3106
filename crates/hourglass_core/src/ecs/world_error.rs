use crate::ecs::Entity;
use thiserror::Error;

/// Invariant violations detected by the world.
///
/// Absence of a component is never an error; these are structural defects.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("{role} role already held by {existing}, refusing to assign it to {requested}")]
    DuplicateSingleton {
        role: &'static str,
        existing: Entity,
        requested: Entity,
    },
}
