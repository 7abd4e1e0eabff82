//! Per-species population counts derived from the grid.

use crate::grid::Grid;
use predprey_core::Species;
use std::collections::BTreeMap;

/// A named running count for one species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    name: String,
    count: usize,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Lazily recomputed counts of living individuals by species.
///
/// While fresh, the counters equal a full recount of the grid. Counters are
/// zeroed rather than dropped on reset so a species that dies out still shows
/// up in reports.
#[derive(Debug, Clone)]
pub struct PopulationStats {
    names: BTreeMap<Species, String>,
    counters: BTreeMap<Species, Counter>,
    fresh: bool,
}

impl PopulationStats {
    /// `names` supplies display names; species without one use their role name
    pub fn new(names: BTreeMap<Species, String>) -> Self {
        Self {
            names,
            counters: BTreeMap::new(),
            fresh: true,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn increment(&mut self, species: Species) {
        let names = &self.names;
        self.counters
            .entry(species)
            .or_insert_with(|| {
                let name = names
                    .get(&species)
                    .cloned()
                    .unwrap_or_else(|| species.to_string());
                Counter::new(name)
            })
            .increment();
    }

    /// Mark stale and zero every counter
    pub fn reset(&mut self) {
        self.fresh = false;
        for counter in self.counters.values_mut() {
            counter.reset();
        }
    }

    pub fn counting_finished(&mut self) {
        self.fresh = true;
    }

    pub fn recompute_if_stale(&mut self, grid: &Grid) {
        if self.fresh {
            return;
        }

        self.reset();
        for (_, cell) in grid.iter() {
            if let Some(species) = cell.species() {
                self.increment(species);
            }
        }
        self.counting_finished();
    }

    /// True while more than one species has living members
    pub fn is_active(&mut self, grid: &Grid) -> bool {
        self.recompute_if_stale(grid);
        self.counters.values().filter(|c| c.count() > 0).count() > 1
    }

    pub fn count(&mut self, species: Species, grid: &Grid) -> usize {
        self.recompute_if_stale(grid);
        self.counters.get(&species).map_or(0, Counter::count)
    }

    pub fn summary(&mut self, grid: &Grid) -> BTreeMap<Species, usize> {
        self.recompute_if_stale(grid);
        self.counters
            .iter()
            .map(|(species, counter)| (*species, counter.count()))
            .collect()
    }

    /// Human-readable line such as `Fox: 12 Rabbit: 340`
    pub fn details(&mut self, grid: &Grid) -> String {
        self.recompute_if_stale(grid);
        self.counters
            .values()
            .map(|c| format!("{}: {}", c.name(), c.count()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
