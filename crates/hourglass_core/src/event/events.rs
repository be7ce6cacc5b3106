//! Event payloads passed between phases.

use crate::ecs::Entity;
use crate::event::MoveAction;

/// Pick up whatever is carriable at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub entity: Entity,
    pub x: i32,
    pub y: i32,
}

/// Area pulse: the actor spends time to hurt the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePulse {
    pub actor: Entity,
    pub target: Entity,
}

/// The actor steals time from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSiphon {
    pub actor: Entity,
    pub target: Entity,
}

/// `initiator` moved into `receiver`. Carries the move so it can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub initiator: Entity,
    pub receiver: Entity,
    pub action: MoveAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: i32,
    pub target: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDamage {
    pub amount: i32,
    pub target: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death {
    pub target: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heal {
    pub target: Entity,
}

/// Redraw `entity`, or only erase its previous cell when `erase` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    pub entity: Entity,
    pub erase: bool,
}

impl Refresh {
    pub fn draw(entity: Entity) -> Self {
        Self {
            entity,
            erase: false,
        }
    }

    pub fn erase(entity: Entity) -> Self {
        Self {
            entity,
            erase: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Win;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quit;

/// The input was non-committal; prompt again without advancing the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbortTurn;
