//! Named counters for simulation events (deaths, collisions, turns)

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Counter {
    counters: BTreeMap<&'static str, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    pub fn increment(&mut self, name: &'static str, value: u64) {
        *self.counters.entry(name).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Counters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counters.iter().map(|(name, value)| (*name, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_by_name() {
        let mut counter = Counter::new();
        counter.increment("death", 1);
        counter.increment("death", 2);
        counter.increment("collision", 1);
        assert_eq!(counter.get("death"), 3);
        assert_eq!(counter.get("missing"), 0);
        let names: Vec<&str> = counter.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["collision", "death"]);
    }
}
