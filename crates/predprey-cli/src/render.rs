//! Plain-text views of the simulation state.

use predprey_world::Simulator;

/// One glyph per cell, one line per row
pub fn render_grid(sim: &Simulator) -> String {
    let width = sim.grid().width();
    let mut out = String::with_capacity((width + 1) * sim.grid().depth());

    for (position, species) in sim.occupancy() {
        out.push(species.map_or('.', |s| s.glyph()));
        if position.col + 1 == width {
            out.push('\n');
        }
    }

    out
}

pub fn status_line(sim: &mut Simulator) -> String {
    format!("Step: {}  {}", sim.step_count(), sim.details())
}

#[cfg(test)]
mod tests {
    use super::*;
    use predprey_core::{Position, SimulationConfig, Species};

    fn empty_sim(depth: usize, width: usize) -> Simulator {
        Simulator::new(SimulationConfig {
            predator_creation_probability: 0.0,
            prey_creation_probability: 0.0,
            ..SimulationConfig::with_dimensions(depth, width)
        })
        .unwrap()
    }

    #[test]
    fn test_render_grid() {
        let mut sim = empty_sim(2, 3);
        sim.spawn(Species::Predator, Position::new(0, 1)).unwrap();
        sim.spawn(Species::Prey, Position::new(1, 2)).unwrap();

        assert_eq!(render_grid(&sim), ".F.\n..r\n");
    }

    #[test]
    fn test_status_line() {
        let mut sim = empty_sim(2, 2);
        sim.spawn(Species::Prey, Position::new(0, 0)).unwrap();

        assert_eq!(status_line(&mut sim), "Step: 0  Rabbit: 1");
    }
}
