//! Hourglass Core
//!
//! Contains the fundamental simulation building blocks:
//! - Entity registry and per-kind component tables
//! - Typed event queues and reversible actions
//! - Turn clock and grid math

pub mod ecs;
pub mod event;
pub mod math;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
