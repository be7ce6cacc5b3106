//! Turn timing, excluding time spent blocked on input

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TurnTimer {
    turn_start: Option<Instant>,
    turn_times: RingBuffer<Duration>,
}

impl TurnTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            turn_start: None,
            turn_times: RingBuffer::new(capacity),
        }
    }

    pub fn begin(&mut self) {
        self.turn_start = Some(Instant::now());
    }

    /// Close the span opened by `begin`. Unpaired calls are ignored.
    pub fn end(&mut self) {
        if let Some(start) = self.turn_start.take() {
            self.turn_times.push(start.elapsed());
        }
    }

    pub fn turn_time_ms(&self) -> f64 {
        self.turn_times.average().as_secs_f64() * 1000.0
    }

    pub fn samples(&self) -> usize {
        self.turn_times.len()
    }
}
