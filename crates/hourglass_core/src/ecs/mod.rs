//! Entity Component System core types.
//!
//! Entities are bare handles. Each component kind lives in its own table
//! keyed by handle, and capability groups name families of kinds that are
//! removed together. Multi-kind queries return owned snapshots so phases can
//! mutate the world while walking the result.

#[macro_use]
mod component;
mod components;
mod entity;
mod group;
mod world;
mod world_error;

pub use component::{Component, Table};
pub use components::{
    AdjList, Ascender, Attack, Camera, Carriable, Collideable, ComponentKind, Components, Defense,
    DeathKind, Depth, Descender, Faction, Health, Inventory, Layer, Location, Npc, OnDeath, Player,
    Prop, RenderData, Time, Timer, Yendor,
};
pub use entity::{Entity, EntityRegistry};
pub use group::ComponentGroup;
pub use world::World;
pub use world_error::WorldError;
