//! In-memory scenario cache.
//!
//! Caches compiled scenarios by scenario string so playlist and segment
//! requests for the same scenario skip re-parsing. Compilation is pure, so
//! a lost race only costs a recompile.

use dashmap::DashMap;
use hlsfixture_scenario::Scenario;
use std::sync::Arc;
use std::time::Instant;

/// Entry in the scenario cache.
struct CacheEntry {
    scenario: Arc<Scenario>,
    last_accessed: Instant,
}

/// Thread-safe, bounded cache of compiled scenarios.
pub struct ScenarioCache {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
}

impl ScenarioCache {
    /// Create a cache holding at most `max_entries` scenarios.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Get a compiled scenario from cache or compile it.
    pub fn get_or_compile(&self, scenario_path: &str) -> Arc<Scenario> {
        if let Some(mut entry) = self.entries.get_mut(scenario_path) {
            entry.last_accessed = Instant::now();
            return Arc::clone(&entry.scenario);
        }

        let scenario = Arc::new(Scenario::compile(scenario_path));

        if self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
        tracing::trace!(scenario = scenario_path, cached = self.len(), "Compiled scenario");

        // First writer wins; a concurrent compile of the same string is equal.
        let entry = self
            .entries
            .entry(scenario_path.to_string())
            .or_insert_with(|| CacheEntry {
                scenario,
                last_accessed: Instant::now(),
            });
        Arc::clone(&entry.scenario)
    }

    /// Number of cached scenarios.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.last_accessed)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
