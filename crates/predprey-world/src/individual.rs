//! Individual state and its per-step transitions.

use crate::grid::{Cell, Grid};
use predprey_core::{IndividualId, Position, RandomSource, Species, SpeciesConfig};
use std::fmt;

/// Why an individual left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Overcrowding,
    Eaten,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeathCause::OldAge => "old_age",
            DeathCause::Starvation => "starvation",
            DeathCause::Overcrowding => "overcrowding",
            DeathCause::Eaten => "eaten",
        };
        f.write_str(label)
    }
}

/// A single predator or prey
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    id: IndividualId,
    species: Species,
    age: u32,
    /// Steps left before starvation; always zero for species that do not hunt
    energy: u32,
    position: Option<Position>,
    death: Option<DeathCause>,
}

impl Individual {
    /// A newborn: age 0 and, for hunters, a full stomach
    pub fn newborn(
        id: IndividualId,
        species: Species,
        config: &SpeciesConfig,
        grid: &mut Grid,
        position: Position,
    ) -> Self {
        let mut individual = Self::unplaced(id, species, config.max_energy());
        individual.set_position(grid, position);
        individual
    }

    /// An individual seeded at bootstrap with randomized age and energy
    pub fn with_random_state(
        id: IndividualId,
        species: Species,
        config: &SpeciesConfig,
        grid: &mut Grid,
        position: Position,
        rng: &mut RandomSource,
    ) -> Self {
        let mut individual = Self::unplaced(id, species, 0);
        individual.set_position(grid, position);
        individual.age = rng.below(config.max_age);
        if let Some(hunting) = &config.hunting {
            individual.energy = rng.below(hunting.food_value);
        }
        individual
    }

    fn unplaced(id: IndividualId, species: Species, energy: u32) -> Self {
        Self {
            id,
            species,
            age: 0,
            energy,
            position: None,
            death: None,
        }
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    /// Move to `position`, vacating the previous cell first
    pub fn set_position(&mut self, grid: &mut Grid, position: Position) {
        if let Some(previous) = self.position {
            grid.clear(previous);
        }
        self.position = Some(position);
        grid.place(Cell::occupied_by(self.species, self.id), position);
    }

    /// Idempotent; only the first cause is recorded
    pub fn die(&mut self, grid: &mut Grid, cause: DeathCause) {
        if self.death.is_none() {
            self.death = Some(cause);
        }
        if let Some(position) = self.position.take() {
            grid.clear(position);
        }
    }

    pub(crate) fn increment_age(&mut self, config: &SpeciesConfig, grid: &mut Grid) {
        self.age += 1;
        if self.age > config.max_age {
            self.die(grid, DeathCause::OldAge);
        }
    }

    pub(crate) fn increment_hunger(&mut self, grid: &mut Grid) {
        self.energy = self.energy.saturating_sub(1);
        if self.energy == 0 {
            self.die(grid, DeathCause::Starvation);
        }
    }

    pub(crate) fn feed(&mut self, config: &SpeciesConfig) {
        self.energy = config.max_energy();
    }

    pub fn can_breed(&self, config: &SpeciesConfig) -> bool {
        self.age >= config.breeding_age
    }

    /// Litter size for this step; zero when too young or the draw fails
    pub fn litter_size(&self, config: &SpeciesConfig, rng: &mut RandomSource) -> u32 {
        if self.can_breed(config) && rng.chance(config.breeding_probability) {
            rng.below(config.max_litter_size) + 1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(species: Species, config: &SpeciesConfig, grid: &mut Grid) -> Individual {
        Individual::newborn(IndividualId(0), species, config, grid, Position::new(1, 1))
    }

    #[test]
    fn test_newborn_state() {
        let mut grid = Grid::new(3, 3);
        let fox = placed(Species::Predator, &SpeciesConfig::fox(), &mut grid);

        assert_eq!(fox.age(), 0);
        assert_eq!(fox.energy(), 7);
        assert!(fox.is_alive());
        assert_eq!(grid.occupant_at(Position::new(1, 1)), Cell::Predator(IndividualId(0)));
    }

    #[test]
    fn test_random_state_within_bounds() {
        let config = SpeciesConfig::fox();
        let mut rng = RandomSource::new(11);
        for i in 0..50 {
            let mut grid = Grid::new(1, 1);
            let fox = Individual::with_random_state(
                IndividualId(i),
                Species::Predator,
                &config,
                &mut grid,
                Position::new(0, 0),
                &mut rng,
            );
            assert!(fox.age() < config.max_age);
            assert!(fox.energy() < 7);
        }
    }

    #[test]
    fn test_prey_has_no_energy() {
        let mut grid = Grid::new(3, 3);
        let mut rng = RandomSource::new(4);
        let rabbit = Individual::with_random_state(
            IndividualId(3),
            Species::Prey,
            &SpeciesConfig::rabbit(),
            &mut grid,
            Position::new(2, 0),
            &mut rng,
        );
        assert_eq!(rabbit.energy(), 0);
        assert_eq!(grid.occupant_at(Position::new(2, 0)), Cell::Prey(IndividualId(3)));
    }

    #[test]
    fn test_set_position_relocates() {
        let mut grid = Grid::new(3, 3);
        let mut rabbit = placed(Species::Prey, &SpeciesConfig::rabbit(), &mut grid);

        rabbit.set_position(&mut grid, Position::new(0, 2));
        assert!(grid.occupant_at(Position::new(1, 1)).is_empty());
        assert_eq!(grid.occupant_at(Position::new(0, 2)), Cell::Prey(IndividualId(0)));
        assert_eq!(grid.iter().filter(|(_, c)| !c.is_empty()).count(), 1);
    }

    #[test]
    fn test_die_is_idempotent() {
        let mut grid = Grid::new(3, 3);
        let mut rabbit = placed(Species::Prey, &SpeciesConfig::rabbit(), &mut grid);

        rabbit.die(&mut grid, DeathCause::Eaten);
        rabbit.die(&mut grid, DeathCause::OldAge);

        assert!(!rabbit.is_alive());
        assert_eq!(rabbit.position(), None);
        assert_eq!(rabbit.death_cause(), Some(DeathCause::Eaten));
        assert!(grid.occupant_at(Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_aging_past_max_kills() {
        let mut config = SpeciesConfig::rabbit();
        config.max_age = 1;
        let mut grid = Grid::new(3, 3);
        let mut rabbit = placed(Species::Prey, &config, &mut grid);

        rabbit.increment_age(&config, &mut grid);
        assert!(rabbit.is_alive());
        rabbit.increment_age(&config, &mut grid);
        assert_eq!(rabbit.death_cause(), Some(DeathCause::OldAge));
        assert_eq!(rabbit.age(), 2);
    }

    #[test]
    fn test_hunger_starves_at_zero() {
        let config = SpeciesConfig::fox();
        let mut grid = Grid::new(3, 3);
        let mut fox = placed(Species::Predator, &config, &mut grid);

        for expected in (1..7).rev() {
            fox.increment_hunger(&mut grid);
            assert_eq!(fox.energy(), expected);
            assert!(fox.is_alive());
        }
        fox.increment_hunger(&mut grid);
        assert_eq!(fox.energy(), 0);
        assert_eq!(fox.death_cause(), Some(DeathCause::Starvation));
    }

    #[test]
    fn test_litter_size() {
        let mut config = SpeciesConfig::rabbit();
        let mut grid = Grid::new(3, 3);
        let mut rng = RandomSource::new(8);
        let rabbit = placed(Species::Prey, &config, &mut grid);

        // Too young: no draw at all
        let before = rng.clone();
        assert_eq!(rabbit.litter_size(&config, &mut rng), 0);
        assert_eq!(rng.unit(), before.clone().unit());

        config.breeding_age = 0;
        config.breeding_probability = 1.0;
        for _ in 0..50 {
            let litter = rabbit.litter_size(&config, &mut rng);
            assert!((1..=config.max_litter_size).contains(&litter));
        }

        config.breeding_probability = 0.0;
        assert_eq!(rabbit.litter_size(&config, &mut rng), 0);
    }
}
