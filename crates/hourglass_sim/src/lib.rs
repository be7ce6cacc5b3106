//! Hourglass Simulation
//!
//! The turn pipeline and everything it schedules:
//! - Phases (movement, combat, items, regeneration, camera, AI)
//! - Spatial queries and death triggers
//! - Player action dispatch and the render feed
//! - Dungeon generation and entity templates

pub mod actions;
pub mod assemblage;
pub mod death;
pub mod dungeon;
pub mod error;
pub mod mapgen;
pub mod pipeline;
pub mod render;
pub mod spatial;
pub mod systems;

#[cfg(test)]
mod testing;

pub use error::SimError;
pub use pipeline::{Outcome, Phase, RunSummary, Simulation};
pub use render::{FrameInfo, Renderer, StatusLine};
