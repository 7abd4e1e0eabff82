//! Simulation engine: population bootstrap and step scheduling.

use crate::grid::Grid;
use crate::habitat::Habitat;
use crate::individual::Individual;
use crate::stats::PopulationStats;
use predprey_core::{
    Error, IndividualId, Position, Result, SimulationConfig, Species, SpeciesConfig,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

pub struct Simulator {
    config: SimulationConfig,
    habitat: Habitat,
    // Separate lists: prey and predators run as disjoint phases each step
    prey: Vec<IndividualId>,
    predators: Vec<IndividualId>,
    step: u64,
    stats: PopulationStats,
}

impl Simulator {
    /// Validate `config`, then seed and populate a fresh grid
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let habitat = Habitat::new(config.depth, config.width, config.seed);
        let stats = PopulationStats::new(species_names(&config));

        let mut sim = Self {
            config,
            habitat,
            prey: Vec::new(),
            predators: Vec::new(),
            step: 0,
            stats,
        };
        sim.bootstrap();

        Ok(sim)
    }

    /// Clear everything and seed each cell through two sequential gates:
    /// a predator with `predator_creation_probability`, otherwise a prey with
    /// `prey_creation_probability`.
    pub fn bootstrap(&mut self) {
        self.clear();

        for row in 0..self.config.depth {
            for col in 0..self.config.width {
                let position = Position::new(row, col);
                if self.habitat.rng.chance(self.config.predator_creation_probability) {
                    let id = self
                        .habitat
                        .spawn_random(Species::Predator, &self.config.predator, position);
                    self.predators.push(id);
                } else if self.habitat.rng.chance(self.config.prey_creation_probability) {
                    let id = self
                        .habitat
                        .spawn_random(Species::Prey, &self.config.prey, position);
                    self.prey.push(id);
                }
            }
        }

        debug!(
            predators = self.predators.len(),
            prey = self.prey.len(),
            "Population bootstrapped"
        );
    }

    /// Empty grid and collections without touching the random stream
    pub fn clear(&mut self) {
        self.habitat.clear();
        self.prey.clear();
        self.predators.clear();
        self.stats.reset();
    }

    /// Rewind the random stream to the seed, zero the step counter and repopulate
    pub fn reset(&mut self) {
        self.habitat.rng.reset();
        self.step = 0;
        self.bootstrap();
    }

    /// Seed used from the next `reset` on
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.habitat.rng.set_seed(seed);
    }

    /// Replace one species' life-cycle parameters mid-run
    pub fn set_species_config(&mut self, species: Species, config: SpeciesConfig) -> Result<()> {
        let mut updated = self.config.clone();
        match species {
            Species::Predator => updated.predator = config,
            Species::Prey => updated.prey = config,
        }
        updated.validate()?;
        self.config = updated;
        self.stats = PopulationStats::new(species_names(&self.config));
        self.stats.reset();
        Ok(())
    }

    /// Place a newborn into an empty, in-bounds cell
    pub fn spawn(&mut self, species: Species, position: Position) -> Result<IndividualId> {
        let grid = self.habitat.grid();
        if !grid.contains(position) {
            return Err(Error::OutOfBounds(position));
        }
        if !grid.occupant_at(position).is_empty() {
            return Err(Error::Occupied(position));
        }

        let id = self
            .habitat
            .spawn_newborn(species, self.config.species(species), position);
        match species {
            Species::Predator => self.predators.push(id),
            Species::Prey => self.prey.push(id),
        }
        self.stats.reset();
        Ok(id)
    }

    /// Advance the whole population by one step: every prey, then every predator
    pub fn step(&mut self) {
        self.step += 1;

        let mut newborn_prey = Vec::new();
        for &id in &self.prey {
            self.habitat.act(id, &self.config.prey, &mut newborn_prey);
        }
        let mut prey = self.habitat.retain_living(std::mem::take(&mut self.prey));
        prey.append(&mut newborn_prey);
        self.prey = prey;

        let mut newborn_predators = Vec::new();
        for &id in &self.predators {
            self.habitat.act(id, &self.config.predator, &mut newborn_predators);
        }
        let mut predators = self.habitat.retain_living(std::mem::take(&mut self.predators));
        predators.append(&mut newborn_predators);
        self.predators = predators;

        // Prey eaten during the predator phase
        self.prey = self.habitat.retain_living(std::mem::take(&mut self.prey));

        self.stats.reset();
        let summary = self.stats.summary(self.habitat.grid());
        debug!(
            step = self.step,
            predators = summary.get(&Species::Predator).copied().unwrap_or(0),
            prey = summary.get(&Species::Prey).copied().unwrap_or(0),
            "Step complete"
        );
    }

    /// Step until `max_steps` have run or one species remains; returns steps run
    pub fn run(&mut self, max_steps: u64) -> u64 {
        self.run_with(max_steps, |_| {})
    }

    /// Like `run`, calling `on_step` after every completed step
    #[instrument(skip(self, on_step), fields(seed = self.config.seed))]
    pub fn run_with<F>(&mut self, max_steps: u64, mut on_step: F) -> u64
    where
        F: FnMut(&mut Simulator),
    {
        info!(
            "Starting simulation for up to {} steps on a {}x{} grid",
            max_steps, self.config.depth, self.config.width
        );

        let mut executed = 0;
        while executed < max_steps && self.is_active() {
            self.step();
            executed += 1;
            on_step(self);
        }

        let active = self.is_active();
        let population = self.details();
        info!(
            executed,
            step = self.step,
            active,
            population = %population,
            "Simulation finished"
        );
        executed
    }

    pub fn run_long(&mut self) -> u64 {
        self.run(self.config.long_run_steps)
    }

    pub fn is_active(&mut self) -> bool {
        self.stats.is_active(self.habitat.grid())
    }

    pub fn summary(&mut self) -> BTreeMap<Species, usize> {
        self.stats.summary(self.habitat.grid())
    }

    /// Counts keyed by configured species name
    pub fn summary_by_name(&mut self) -> BTreeMap<String, usize> {
        let summary = self.summary();
        summary
            .into_iter()
            .map(|(species, count)| (self.config.species(species).name.clone(), count))
            .collect()
    }

    pub fn details(&mut self) -> String {
        self.stats.details(self.habitat.grid())
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        self.habitat.grid()
    }

    pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
        self.habitat.get(id)
    }

    /// Living predators in processing order
    pub fn predators(&self) -> &[IndividualId] {
        &self.predators
    }

    /// Living prey in processing order
    pub fn prey(&self) -> &[IndividualId] {
        &self.prey
    }

    /// Species per cell, row-major
    pub fn occupancy(&self) -> impl Iterator<Item = (Position, Option<Species>)> + '_ {
        self.habitat
            .grid()
            .iter()
            .map(|(position, cell)| (position, cell.species()))
    }
}

fn species_names(config: &SimulationConfig) -> BTreeMap<Species, String> {
    Species::all()
        .into_iter()
        .map(|species| (species, config.species(species).name.clone()))
        .collect()
}
