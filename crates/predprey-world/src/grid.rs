//! 2D occupancy grid for the world.

use predprey_core::{IndividualId, Position, RandomSource, Species};

/// Contents of one grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Predator(IndividualId),
    Prey(IndividualId),
}

impl Cell {
    pub fn occupied_by(species: Species, id: IndividualId) -> Self {
        match species {
            Species::Predator => Cell::Predator(id),
            Species::Prey => Cell::Prey(id),
        }
    }

    pub fn species(&self) -> Option<Species> {
        match self {
            Cell::Empty => None,
            Cell::Predator(_) => Some(Species::Predator),
            Cell::Prey(_) => Some(Species::Prey),
        }
    }

    pub fn id(&self) -> Option<IndividualId> {
        match self {
            Cell::Empty => None,
            Cell::Predator(id) | Cell::Prey(id) => Some(*id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A bounded rectangular grid; each cell holds at most one individual.
///
/// The grid only tracks where handles sit. It does not own individuals, and
/// placing into an occupied cell silently replaces the previous occupant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    depth: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Callers validate that both dimensions are positive.
    pub fn new(depth: usize, width: usize) -> Self {
        Self {
            depth,
            width,
            cells: vec![Cell::Empty; depth * width],
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.depth && pos.col < self.width
    }

    pub fn place(&mut self, cell: Cell, pos: Position) {
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
    }

    pub fn clear(&mut self, pos: Position) {
        let index = self.pos_to_index(pos);
        self.cells[index] = Cell::Empty;
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn occupant_at(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    /// All in-bounds cells adjacent to `pos` (diagonals included), shuffled.
    ///
    /// Consumers take the first matching entry as a uniform random choice.
    pub fn neighbors_of(&self, pos: Position, rng: &mut RandomSource) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);

        for d_row in -1..=1 {
            for d_col in -1..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }

                if let Some(next) = pos.offset(d_row, d_col) {
                    if self.contains(next) {
                        neighbors.push(next);
                    }
                }
            }
        }

        rng.shuffle(&mut neighbors);
        neighbors
    }

    /// Empty neighbors, in the shuffled order of `neighbors_of`
    pub fn free_neighbors_of(&self, pos: Position, rng: &mut RandomSource) -> Vec<Position> {
        self.neighbors_of(pos, rng)
            .into_iter()
            .filter(|p| self.occupant_at(*p).is_empty())
            .collect()
    }

    pub fn any_free_neighbor_of(&self, pos: Position, rng: &mut RandomSource) -> Option<Position> {
        self.free_neighbors_of(pos, rng).into_iter().next()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.width, index % self.width)
    }

    /// Iterator over all positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.depth(), 4);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.cells.len(), 24);
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(3, 5);
        assert_eq!(grid.index_to_pos(7), Position::new(1, 2));
        assert_eq!(grid.pos_to_index(Position::new(2, 4)), 14);
    }

    #[test]
    fn test_place_overwrites_and_clear_is_idempotent() {
        let mut grid = Grid::new(2, 2);
        let pos = Position::new(1, 0);

        grid.place(Cell::Prey(IndividualId(1)), pos);
        grid.place(Cell::Predator(IndividualId(2)), pos);
        assert_eq!(grid.occupant_at(pos), Cell::Predator(IndividualId(2)));

        grid.clear(pos);
        grid.clear(pos);
        assert_eq!(grid.occupant_at(pos), Cell::Empty);
    }

    #[test]
    fn test_clear_all() {
        let mut grid = Grid::new(3, 3);
        grid.place(Cell::Prey(IndividualId(0)), Position::new(0, 0));
        grid.place(Cell::Prey(IndividualId(1)), Position::new(2, 2));
        grid.clear_all();
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_neighbor_counts() {
        let grid = Grid::new(10, 10);
        let mut rng = RandomSource::new(1);

        assert_eq!(grid.neighbors_of(Position::new(5, 5), &mut rng).len(), 8);
        assert_eq!(grid.neighbors_of(Position::new(0, 0), &mut rng).len(), 3);
        assert_eq!(grid.neighbors_of(Position::new(0, 5), &mut rng).len(), 5);
        assert_eq!(grid.neighbors_of(Position::new(9, 9), &mut rng).len(), 3);
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1);
        let mut rng = RandomSource::new(1);
        assert!(grid.neighbors_of(Position::new(0, 0), &mut rng).is_empty());
        assert_eq!(grid.any_free_neighbor_of(Position::new(0, 0), &mut rng), None);
    }

    #[test]
    fn test_neighbor_order_is_shuffled() {
        let grid = Grid::new(10, 10);
        let mut rng = RandomSource::new(5);
        let center = Position::new(5, 5);

        let orders: HashSet<Vec<Position>> = (0..20)
            .map(|_| grid.neighbors_of(center, &mut rng))
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn test_free_neighbors_skip_occupied() {
        let mut grid = Grid::new(3, 3);
        let mut rng = RandomSource::new(9);
        let center = Position::new(1, 1);
        grid.place(Cell::Prey(IndividualId(0)), Position::new(0, 0));
        grid.place(Cell::Predator(IndividualId(1)), Position::new(2, 1));

        let free = grid.free_neighbors_of(center, &mut rng);
        assert_eq!(free.len(), 6);
        assert!(!free.contains(&Position::new(0, 0)));
        assert!(!free.contains(&Position::new(2, 1)));
    }

    #[test]
    fn test_any_free_neighbor_on_full_grid() {
        let mut grid = Grid::new(2, 2);
        let mut rng = RandomSource::new(2);
        for (i, pos) in grid.positions().collect::<Vec<_>>().into_iter().enumerate() {
            grid.place(Cell::Prey(IndividualId(i as u64)), pos);
        }
        assert_eq!(grid.any_free_neighbor_of(Position::new(0, 0), &mut rng), None);
    }

    proptest! {
        #[test]
        fn prop_neighbors_bounded(
            depth in 2usize..12,
            width in 2usize..12,
            row_frac in 0.0f64..1.0,
            col_frac in 0.0f64..1.0,
            seed in any::<u64>(),
        ) {
            let grid = Grid::new(depth, width);
            let mut rng = RandomSource::new(seed);
            let center = Position::new(
                ((depth as f64) * row_frac) as usize,
                ((width as f64) * col_frac) as usize,
            );

            let neighbors = grid.neighbors_of(center, &mut rng);
            let unique: HashSet<Position> = neighbors.iter().copied().collect();

            prop_assert!(neighbors.len() >= 3 && neighbors.len() <= 8);
            prop_assert_eq!(unique.len(), neighbors.len());
            prop_assert!(!unique.contains(&center));
            for pos in &neighbors {
                prop_assert!(grid.contains(*pos));
                prop_assert_eq!(pos.chebyshev_distance(&center), 1);
            }
        }

        #[test]
        fn prop_free_neighbors_subset(
            occupied in proptest::collection::vec(any::<bool>(), 25),
            seed in any::<u64>(),
        ) {
            let mut grid = Grid::new(5, 5);
            for (i, taken) in occupied.iter().enumerate() {
                if *taken {
                    grid.place(Cell::Prey(IndividualId(i as u64)), grid.index_to_pos(i));
                }
            }

            let mut rng = RandomSource::new(seed);
            let mut replay = rng.clone();
            let center = Position::new(2, 2);
            let all = grid.neighbors_of(center, &mut replay);
            let free = grid.free_neighbors_of(center, &mut rng);

            for pos in &free {
                prop_assert!(all.contains(pos));
                prop_assert!(grid.occupant_at(*pos).is_empty());
            }
            let expected: Vec<Position> = all
                .into_iter()
                .filter(|p| grid.occupant_at(*p).is_empty())
                .collect();
            prop_assert_eq!(free, expected);
        }
    }
}
