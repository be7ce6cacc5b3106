//! Pipeline phases.
//!
//! Every phase is a free function over the world and the event queues.
//! Phases that walk entities while mutating them take an owned snapshot
//! from `World::entities_with` first.

pub mod ai;
pub mod camera;
pub mod combat;
pub mod items;
pub mod movement;
pub mod regen;

pub use ai::fire_npc_actions;
pub use camera::update_camera;
pub use combat::{
    resolve_damage, resolve_heals, resolve_special, resolve_time_siphon, update_time_decay,
};
pub use items::resolve_pickup;
pub use movement::{
    refresh_player_level, resolve_level_change, update_collisions, update_depth, update_physics,
};
pub use regen::update_timers;
