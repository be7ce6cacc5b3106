//! Per-phase wall-clock profiler

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Accumulated time and call count for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTiming {
    pub total: Duration,
    pub calls: u64,
}

impl PhaseTiming {
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total / self.calls as u32
    }
}

#[derive(Debug, Default)]
pub struct PhaseProfiler {
    timings: BTreeMap<&'static str, PhaseTiming>,
}

impl PhaseProfiler {
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
        }
    }

    pub fn time_phase<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = self.timings.entry(name).or_default();
        timing.total += elapsed;
        timing.calls += 1;
        result
    }

    pub fn timing(&self, name: &str) -> PhaseTiming {
        self.timings.get(name).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PhaseTiming)> + '_ {
        self.timings.iter().map(|(name, timing)| (*name, *timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_calls_per_phase() {
        let mut profiler = PhaseProfiler::new();
        for _ in 0..3 {
            profiler.time_phase("physics", || ());
        }
        profiler.time_phase("render", || ());
        assert_eq!(profiler.timing("physics").calls, 3);
        assert_eq!(profiler.timing("render").calls, 1);
        assert_eq!(profiler.timing("death").calls, 0);
    }
}
