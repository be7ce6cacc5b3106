use hourglass_core::ecs::WorldError;
use hourglass_services::InputError;
use thiserror::Error;

/// Failures that stop a run.
///
/// Missing components never end up here; phases skip what does not apply.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),
    #[error("dungeon has no active player")]
    NoPlayer,
}
