//! Shared mutable state of a run and the per-step life cycle.

use crate::grid::{Cell, Grid};
use crate::individual::{DeathCause, Individual};
use predprey_core::{IndividualId, Position, RandomSource, Species, SpeciesConfig};
use std::collections::HashMap;
use tracing::trace;

/// Grid, random stream and the registry of individuals currently tracked.
///
/// Individuals stay in the registry after death until the simulator prunes
/// them at the end of a step.
#[derive(Debug, Clone)]
pub struct Habitat {
    pub(crate) grid: Grid,
    pub(crate) rng: RandomSource,
    individuals: HashMap<IndividualId, Individual>,
    next_id: u64,
}

impl Habitat {
    pub fn new(depth: usize, width: usize, seed: u64) -> Self {
        Self {
            grid: Grid::new(depth, width),
            rng: RandomSource::new(seed),
            individuals: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Empty the grid and forget every individual; ids restart from zero
    pub fn clear(&mut self) {
        self.grid.clear_all();
        self.individuals.clear();
        self.next_id = 0;
    }

    fn allocate_id(&mut self) -> IndividualId {
        let id = IndividualId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_newborn(
        &mut self,
        species: Species,
        config: &SpeciesConfig,
        position: Position,
    ) -> IndividualId {
        let id = self.allocate_id();
        let individual = Individual::newborn(id, species, config, &mut self.grid, position);
        self.individuals.insert(id, individual);
        id
    }

    pub fn spawn_random(
        &mut self,
        species: Species,
        config: &SpeciesConfig,
        position: Position,
    ) -> IndividualId {
        let id = self.allocate_id();
        let individual = Individual::with_random_state(
            id,
            species,
            config,
            &mut self.grid,
            position,
            &mut self.rng,
        );
        self.individuals.insert(id, individual);
        id
    }

    /// Keep the living ids in order; dead ones are dropped from the registry
    pub fn retain_living(&mut self, ids: Vec<IndividualId>) -> Vec<IndividualId> {
        ids.into_iter()
            .filter(|id| match self.individuals.get(id) {
                Some(individual) if individual.is_alive() => true,
                Some(individual) => {
                    trace!(
                        id = %individual.id(),
                        species = %individual.species(),
                        age = individual.age(),
                        cause = ?individual.death_cause(),
                        "Individual removed"
                    );
                    self.individuals.remove(id);
                    false
                }
                None => false,
            })
            .collect()
    }

    /// Advance one living individual by one step.
    ///
    /// Ages (and, for hunters, starves) the individual, breeds into free
    /// neighbors, then hunts or moves. Newborn ids go to `newborns`. A dead or
    /// unknown id is ignored.
    pub fn act(&mut self, id: IndividualId, config: &SpeciesConfig, newborns: &mut Vec<IndividualId>) {
        let Some(individual) = self.individuals.get_mut(&id) else {
            return;
        };
        if !individual.is_alive() {
            return;
        }

        individual.increment_age(config, &mut self.grid);
        if individual.is_alive() && config.hunting.is_some() {
            individual.increment_hunger(&mut self.grid);
        }
        let Some(position) = individual.position() else {
            trace!(id = %id, cause = ?individual.death_cause(), "Individual died");
            return;
        };
        let species = individual.species();

        let mut free = self.grid.free_neighbors_of(position, &mut self.rng);
        let litter = individual.litter_size(config, &mut self.rng);
        for _ in 0..litter {
            if free.is_empty() {
                break;
            }
            let birthplace = free.remove(0);
            let child = self.spawn_newborn(species, config, birthplace);
            trace!(parent = %id, child = %child, position = %birthplace, "Individual born");
            newborns.push(child);
        }

        let prey_cell = if config.hunting.is_some() {
            self.find_food(position)
        } else {
            None
        };
        let destination =
            prey_cell.or_else(|| self.grid.any_free_neighbor_of(position, &mut self.rng));

        let Some(individual) = self.individuals.get_mut(&id) else {
            return;
        };
        if prey_cell.is_some() {
            individual.feed(config);
        }
        match destination {
            Some(next) => individual.set_position(&mut self.grid, next),
            None => {
                individual.die(&mut self.grid, DeathCause::Overcrowding);
                trace!(id = %id, position = %position, "Individual died of overcrowding");
            }
        }
    }

    /// Kill the first living prey among the shuffled neighbors and return its cell
    fn find_food(&mut self, position: Position) -> Option<Position> {
        for candidate in self.grid.neighbors_of(position, &mut self.rng) {
            if let Cell::Prey(prey_id) = self.grid.occupant_at(candidate) {
                if let Some(prey) = self.individuals.get_mut(&prey_id) {
                    if prey.is_alive() {
                        prey.die(&mut self.grid, DeathCause::Eaten);
                        trace!(prey = %prey_id, position = %candidate, "Prey eaten");
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}
