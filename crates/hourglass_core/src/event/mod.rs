//! Typed event queues.
//!
//! Phases communicate only through these queues. Each kind has exactly one
//! consuming phase; producers may be anywhere.

mod action;
mod events;
mod queue;

pub use action::{ChangeLevel, MoveAction, Reversible};
pub use events::{
    AbortTurn, Ascent, ClearScreen, Collision, Damage, Death, Descent, Heal, Log, Pickup, Quit,
    Refresh, TimeDamage, TimePulse, TimeSiphon, Win,
};
pub use queue::EventQueue;

/// One queue per event kind.
#[derive(Debug, Default)]
pub struct Events {
    pub moves: EventQueue<MoveAction>,
    pub pickups: EventQueue<Pickup>,
    pub level_changes: EventQueue<ChangeLevel>,
    pub time_pulses: EventQueue<TimePulse>,
    pub time_siphons: EventQueue<TimeSiphon>,
    pub collisions: EventQueue<Collision>,
    pub damage: EventQueue<Damage>,
    pub time_damage: EventQueue<TimeDamage>,
    pub deaths: EventQueue<Death>,
    pub heals: EventQueue<Heal>,
    pub refreshes: EventQueue<Refresh>,
    pub clear_screen: EventQueue<ClearScreen>,
    pub descents: EventQueue<Descent>,
    pub ascents: EventQueue<Ascent>,
    pub logs: EventQueue<Log>,
    pub wins: EventQueue<Win>,
    pub quits: EventQueue<Quit>,
    pub aborts: EventQueue<AbortTurn>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any queue driving the inner resolution loop still has work.
    pub fn intents_pending(&self) -> bool {
        !(self.moves.is_empty()
            && self.pickups.is_empty()
            && self.level_changes.is_empty()
            && self.descents.is_empty()
            && self.ascents.is_empty())
    }

    /// Whether the run should stop after this turn.
    pub fn finished(&self) -> bool {
        self.quits.peek().is_some() || self.wins.peek().is_some()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.logs.push(Log(line.into()));
    }
}
