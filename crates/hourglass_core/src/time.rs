//! Turn clock
//!
//! Counts completed turns. Aborted prompts do not advance it.

/// Turn counter for the simulation.
#[derive(Debug)]
pub struct TurnClock {
    turn_count: u64,
}

impl TurnClock {
    pub fn new() -> Self {
        Self { turn_count: 0 }
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn advance_turn(&mut self) {
        self.turn_count += 1;
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new()
    }
}
