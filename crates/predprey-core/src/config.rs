//! Configuration types for the simulation.

use crate::{Error, Result, Species};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Predation parameters for a hunting species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntingConfig {
    /// Energy restored by one kill. Also the energy of a newborn and the
    /// exclusive upper bound of a randomized initial energy.
    pub food_value: u32,
}

/// Life-cycle parameters of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Display name used in population summaries
    pub name: String,
    /// Minimum age at which an individual may breed
    pub breeding_age: u32,
    /// An individual dies once its age exceeds this
    pub max_age: u32,
    /// Per-step breeding probability (0.0 to 1.0)
    pub breeding_probability: f64,
    /// Upper bound of a litter, at least 1
    pub max_litter_size: u32,
    /// Present for the predator only
    pub hunting: Option<HuntingConfig>,
}

impl SpeciesConfig {
    pub fn fox() -> Self {
        Self {
            name: "Fox".to_string(),
            breeding_age: 10,
            max_age: 150,
            breeding_probability: 0.35,
            max_litter_size: 5,
            hunting: Some(HuntingConfig { food_value: 7 }),
        }
    }

    pub fn rabbit() -> Self {
        Self {
            name: "Rabbit".to_string(),
            breeding_age: 5,
            max_age: 40,
            breeding_probability: 0.15,
            max_litter_size: 4,
            hunting: None,
        }
    }

    /// Energy ceiling, zero for species that do not hunt
    pub fn max_energy(&self) -> u32 {
        self.hunting.as_ref().map_or(0, |h| h.food_value)
    }

    fn validate(&self, species: Species) -> Result<()> {
        check_probability(&format!("{} breeding_probability", self.name), self.breeding_probability)?;

        if self.max_litter_size == 0 {
            return Err(Error::Validation(format!(
                "{} max_litter_size must be at least 1",
                self.name
            )));
        }

        match (species, &self.hunting) {
            (Species::Predator, None) => Err(Error::Validation(format!(
                "predator species {} needs a hunting configuration",
                self.name
            ))),
            (Species::Predator, Some(hunting)) if hunting.food_value == 0 => Err(
                Error::Validation(format!("{} food_value must be positive", self.name)),
            ),
            (Species::Prey, Some(_)) => Err(Error::Validation(format!(
                "prey species {} cannot hunt",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of grid rows
    pub depth: usize,
    /// Number of grid columns
    pub width: usize,
    /// Seed of the shared random sequence
    pub seed: u64,
    /// Chance of seeding a predator into a cell at bootstrap
    pub predator_creation_probability: f64,
    /// Chance of seeding a prey into a cell that did not get a predator
    pub prey_creation_probability: f64,
    /// Step count used by `run_long`
    pub long_run_steps: u64,
    pub predator: SpeciesConfig,
    pub prey: SpeciesConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            depth: 50,
            width: 50,
            seed: 1111,
            predator_creation_probability: 0.02,
            prey_creation_probability: 0.08,
            long_run_steps: 10_000,
            predator: SpeciesConfig::fox(),
            prey: SpeciesConfig::rabbit(),
        }
    }
}

impl SimulationConfig {
    pub fn with_dimensions(depth: usize, width: usize) -> Self {
        Self {
            depth,
            width,
            ..Default::default()
        }
    }

    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Predator => &self.predator,
            Species::Prey => &self.prey,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 || self.width == 0 || self.depth.checked_mul(self.width).is_none() {
            return Err(Error::InvalidDimensions {
                depth: self.depth,
                width: self.width,
            });
        }

        check_probability("predator_creation_probability", self.predator_creation_probability)?;
        check_probability("prey_creation_probability", self.prey_creation_probability)?;

        self.predator.validate(Species::Predator)?;
        self.prey.validate(Species::Prey)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading simulation config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
