//! Component kinds.
//!
//! Behaviour of an entity is decided by which of these it carries. Empty
//! marker components add behaviour without data.

use crate::ecs::Entity;
use std::collections::BTreeMap;

/// Position on the grid plus the pre-move snapshot used for undo and erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub last_x: i32,
    pub last_y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            last_x: x,
            last_y: y,
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Location) -> bool {
        self.x == other.x && self.y == other.y
    }

    #[inline]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Squared distance between two locations.
    pub fn distance2(&self, other: &Location) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Dungeon level index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    pub z: i32,
    pub last_z: i32,
}

impl Depth {
    pub fn new(z: i32) -> Self {
        Self { z, last_z: z }
    }

    #[inline]
    pub fn same_level(&self, other: &Depth) -> bool {
        self.z == other.z
    }
}

/// Draw layer. Lower layers are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Back,
    MidBack,
    Mid,
    MidFront,
    Front,
}

impl Layer {
    pub const COUNT: usize = 5;
    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Back,
        Layer::MidBack,
        Layer::Mid,
        Layer::MidFront,
        Layer::Front,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderData {
    pub layer: Layer,
    pub last_layer: Layer,
    pub glyph: char,
}

impl RenderData {
    pub fn new(layer: Layer, glyph: char) -> Self {
        Self {
            layer,
            last_layer: layer,
            glyph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defense {
    pub value: i32,
}

/// Remaining time. Drains by `decay_rate` each turn near the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub value: i32,
    pub decay_rate: i32,
}

/// Collideables that run into each other produce collision events.
/// Non-blocking ones (corpses) do not push the mover back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collideable {
    pub blocks: bool,
}

/// Fixed set of lettered slots holding carried entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub capacity: usize,
    pub slots: BTreeMap<char, Option<Entity>>,
}

impl Inventory {
    /// Slot labels in creation order: the first `capacity` of these exist.
    /// Filling follows plain `char` order, so once uppercase slots exist
    /// they fill before the lowercase ones.
    pub fn slot_letters() -> impl Iterator<Item = char> {
        ('a'..='z').chain('A'..='Z')
    }

    pub fn new(capacity: usize) -> Self {
        let slots = Self::slot_letters()
            .take(capacity)
            .map(|letter| (letter, None))
            .collect::<BTreeMap<_, _>>();
        Self {
            capacity: slots.len(),
            slots,
        }
    }

    /// Lowest free slot in `char` order (`'A' < 'a'`).
    pub fn first_free(&self) -> Option<char> {
        self.slots
            .iter()
            .find(|(_, held)| held.is_none())
            .map(|(letter, _)| *letter)
    }

    /// Put `item` into the lowest free slot, returning the slot used.
    pub fn store(&mut self, item: Entity) -> Option<char> {
        let letter = self.first_free()?;
        self.slots.insert(letter, Some(item));
        Some(letter)
    }

    pub fn items(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.values().filter_map(|held| *held)
    }

    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }
}

/// Group id. Equal factions never target each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faction {
    pub value: i32,
}

/// Closed set of death behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathKind {
    Player,
    Npc,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnDeath {
    pub kind: DeathKind,
}

/// Up staircase. `up` is the linked down staircase one depth above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascender {
    pub up: Option<Entity>,
}

/// Down staircase. `down` is the linked up staircase one depth below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descender {
    pub down: Option<Entity>,
}

/// Neighbouring tiles of a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjList {
    pub neighbors: Vec<Entity>,
}

/// Periodic regeneration: fires a heal every `max_time` turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub time: u32,
    pub max_time: u32,
}

impl Timer {
    pub fn new(max_time: u32) -> Self {
        Self { time: 0, max_time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Npc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Prop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera;

/// Can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carriable;

/// The item that wins the run when carried out of the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Yendor;

declare_components! {
    location: Location,
    depth: Depth,
    render: RenderData,
    health: Health,
    attack: Attack,
    defense: Defense,
    time: Time,
    collideable: Collideable,
    inventory: Inventory,
    faction: Faction,
    on_death: OnDeath,
    ascender: Ascender,
    descender: Descender,
    adj_list: AdjList,
    timer: Timer,
    player: Player,
    npc: Npc,
    prop: Prop,
    camera: Camera,
    carriable: Carriable,
    yendor: Yendor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_fills_lowest_slot_first() {
        let mut inventory = Inventory::new(3);
        assert_eq!(inventory.store(Entity::from_raw(10)), Some('a'));
        assert_eq!(inventory.store(Entity::from_raw(11)), Some('b'));
        inventory.slots.insert('a', None);
        assert_eq!(inventory.store(Entity::from_raw(12)), Some('a'));
        assert_eq!(inventory.store(Entity::from_raw(13)), Some('c'));
        assert!(inventory.is_full());
        assert_eq!(inventory.store(Entity::from_raw(14)), None);
    }

    #[test]
    fn inventory_capacity_limits_slots() {
        let inventory = Inventory::new(30);
        assert_eq!(inventory.capacity, 30);
        assert!(inventory.slots.contains_key(&'A'));
        assert!(inventory.slots.contains_key(&'D'));
        assert!(!inventory.slots.contains_key(&'E'));
    }

    #[test]
    fn large_inventory_fills_in_char_order() {
        let mut small = Inventory::new(26);
        assert_eq!(small.store(Entity::from_raw(1)), Some('a'));

        let mut large = Inventory::new(28);
        assert_eq!(large.store(Entity::from_raw(1)), Some('A'));
        assert_eq!(large.store(Entity::from_raw(2)), Some('B'));
        assert_eq!(large.store(Entity::from_raw(3)), Some('a'));
    }

    #[test]
    fn kind_names_follow_types() {
        assert_eq!(ComponentKind::Location.name(), "Location");
        assert_eq!(ComponentKind::RenderData.name(), "RenderData");
        assert_eq!(ComponentKind::ALL.len(), 21);
    }
}
