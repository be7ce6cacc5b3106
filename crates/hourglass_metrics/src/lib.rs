//! Hourglass Metrics - turn and phase instrumentation
//!
//! Records how long each pipeline phase takes, how long whole turns take,
//! and how often named simulation events happen. Everything compiles down to
//! no-op stubs without the `metrics` feature.
//!
//! # Usage
//!
//! ```ignore
//! use hourglass_metrics::{Counter, PhaseProfiler, TurnTimer};
//!
//! let mut profiler = PhaseProfiler::new();
//! let mut timer = TurnTimer::new(32);
//! timer.begin();
//! profiler.time_phase("physics", || update_physics(&mut world, &mut events));
//! timer.end();
//! ```

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod phase_profiler;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod turn_timer;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use phase_profiler::{PhaseProfiler, PhaseTiming};
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use turn_timer::TurnTimer;

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self { Self }
    pub fn increment(&mut self, _name: &'static str, _value: u64) {}
    pub fn get(&self, _name: &str) -> u64 { 0 }
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> { std::iter::empty() }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTiming {
    pub total: std::time::Duration,
    pub calls: u64,
}

#[cfg(not(feature = "metrics"))]
impl PhaseTiming {
    pub fn average(&self) -> std::time::Duration { std::time::Duration::ZERO }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct PhaseProfiler;

#[cfg(not(feature = "metrics"))]
impl PhaseProfiler {
    pub fn new() -> Self { Self }
    pub fn time_phase<F, R>(&mut self, _name: &'static str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn timing(&self, _name: &str) -> PhaseTiming { PhaseTiming::default() }
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PhaseTiming)> { std::iter::empty() }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct TurnTimer;

#[cfg(not(feature = "metrics"))]
impl TurnTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) {}
    pub fn turn_time_ms(&self) -> f64 { 0.0 }
}
