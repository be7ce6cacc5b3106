//! Capability groups: named families of component kinds handled as a bundle.
//!
//! Membership is a static table rather than anything discovered at runtime.

use crate::ecs::ComponentKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComponentGroup {
    /// Behaviour drivers: player control, NPC brains, props, the camera.
    Ai,
    /// Scalar stats.
    Stat,
}

const AI_MEMBERS: &[ComponentKind] = &[
    ComponentKind::Player,
    ComponentKind::Npc,
    ComponentKind::Prop,
    ComponentKind::Camera,
];

const STAT_MEMBERS: &[ComponentKind] = &[
    ComponentKind::Health,
    ComponentKind::Attack,
    ComponentKind::Defense,
    ComponentKind::Time,
];

impl ComponentGroup {
    pub fn name(self) -> &'static str {
        match self {
            ComponentGroup::Ai => "Ai",
            ComponentGroup::Stat => "Stat",
        }
    }

    pub fn kinds(self) -> &'static [ComponentKind] {
        match self {
            ComponentGroup::Ai => AI_MEMBERS,
            ComponentGroup::Stat => STAT_MEMBERS,
        }
    }
}
