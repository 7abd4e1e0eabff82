//! Predator-prey world simulation engine.
//!
//! This module implements the bounded 2D grid where foxes and rabbits age,
//! breed, hunt and move one step at a time.

pub mod grid;
pub mod habitat;
pub mod individual;
pub mod stats;
pub mod simulation;

pub use grid::{Cell, Grid};
pub use habitat::Habitat;
pub use individual::{DeathCause, Individual};
pub use stats::{Counter, PopulationStats};
pub use simulation::Simulator;
