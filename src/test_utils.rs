//! Shared fixtures for the engine tests, plus brute-force references that do
//! not go through the engine at all.

use crate::search::{
    hex_neighbours, Cell, CellId, EngineState, GridAdapter, HexGrid, PathSearch, SearchBudget,
    SearchConfig, SearchStrategy,
};
use std::collections::{HashMap, VecDeque};

/// A grid with hex adjacency but arbitrary cell coordinates, for building
/// cases where the first route found to a cell is not the cheapest.
#[derive(Debug, Clone)]
pub struct ScatteredGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl ScatteredGrid {
    /// `points` are row-major cell centres; every cell gets weight 1.
    pub fn new(rows: usize, columns: usize, points: &[(f64, f64)]) -> Self {
        assert_eq!(points.len(), rows * columns);
        Self {
            rows,
            columns,
            cells: points.iter().map(|&(x, y)| Cell::new(1., x, y)).collect(),
        }
    }
}

impl GridAdapter for ScatteredGrid {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_at(&self, row: usize, column: usize) -> Option<Cell> {
        (row < self.rows && column < self.columns).then(|| self.cells[row * self.columns + column])
    }
}

/// 2x3 layout where a search that expands (1,0) before (0,1) first reaches
/// (1,1) over an expensive route; the route through (0,1) is cheaper.
pub fn detour_via_lower_row() -> ScatteredGrid {
    ScatteredGrid::new(
        2,
        3,
        &[
            (0., 0.),
            (0., 9.),
            (10., 9.),
            (5., 5.),
            (0., 10.),
            (10., 0.),
        ],
    )
}

/// 2x3 layout where (0,1) is discovered and expanded first but the route to
/// (1,1) through (1,0) is cheaper.
pub fn detour_via_upper_row() -> ScatteredGrid {
    ScatteredGrid::new(
        2,
        3,
        &[
            (0., 0.),
            (5., 5.),
            (10., 9.),
            (0., 9.),
            (0., 10.),
            (10., 0.),
        ],
    )
}

/// A 5x6 grid with mixed weights (all at least 1) and a few walls.
pub fn weighted_grid() -> HexGrid {
    HexGrid::from_weights(vec![
        vec![1., 3., 1., 1., 2., 1.],
        vec![1., 5., 0., 2., 1., 1.],
        vec![2., 1., 0., 5., 3., 1.],
        vec![1., 1., 1., 0., 1., 2.],
        vec![3., 2., 1., 1., 1., 1.],
    ])
    .unwrap()
}

fn traversable(grid: &impl GridAdapter, cell: CellId) -> Option<Cell> {
    grid.cell_at(cell.row, cell.column)
        .filter(|cell| cell.is_traversable())
}

/// Bellman-Ford over the hex adjacency: cheapest cost from `start` to every
/// reachable cell.
pub fn reference_costs(grid: &impl GridAdapter, start: CellId) -> HashMap<CellId, f64> {
    let (rows, columns) = (grid.row_count(), grid.column_count());
    let mut costs = HashMap::from([(start, 0.)]);
    loop {
        let mut changed = false;
        for row in 0..rows {
            for column in 0..columns {
                let here = CellId::new(row, column);
                let (Some(&cost), Some(cell)) = (costs.get(&here), traversable(grid, here)) else {
                    continue;
                };
                for next in hex_neighbours(row, column, rows, columns) {
                    let Some(next_cell) = traversable(grid, next) else {
                        continue;
                    };
                    let candidate = cost + cell.distance_to(&next_cell) * next_cell.weight();
                    if costs.get(&next).map_or(true, |&known| candidate < known - 1e-9) {
                        costs.insert(next, candidate);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return costs;
        }
    }
}

/// Plain BFS over the hex adjacency: fewest hops from `start`.
pub fn reference_hops(grid: &impl GridAdapter, start: CellId) -> HashMap<CellId, usize> {
    let (rows, columns) = (grid.row_count(), grid.column_count());
    let mut hops = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(here) = queue.pop_front() {
        let depth = hops[&here];
        for next in hex_neighbours(here.row, here.column, rows, columns) {
            if traversable(grid, next).is_some() && !hops.contains_key(&next) {
                hops.insert(next, depth + 1);
                queue.push_back(next);
            }
        }
    }
    hops
}

/// Traversal cost of walking `cells` in order, checking every step is a
/// move between traversable hex neighbours.
pub fn walk_cost(grid: &impl GridAdapter, cells: &[CellId]) -> f64 {
    let (rows, columns) = (grid.row_count(), grid.column_count());
    cells
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            assert!(
                hex_neighbours(from.row, from.column, rows, columns).contains(&to),
                "{} -> {} is not a hex move",
                from,
                to
            );
            let from_cell = traversable(grid, from).expect("path crosses a wall");
            let to_cell = traversable(grid, to).expect("path crosses a wall");
            from_cell.distance_to(&to_cell) * to_cell.weight()
        })
        .sum()
}

pub fn engine_for(grid: &impl GridAdapter, config: SearchConfig) -> PathSearch {
    let mut engine = PathSearch::new(config);
    engine.initialize(grid).unwrap();
    engine
}

/// Enter, run until done and return the final state.
pub fn run(engine: &mut PathSearch, start: CellId, goal: CellId) -> EngineState {
    engine.enter(start, goal).unwrap();
    while !engine.is_done() {
        engine.update(SearchBudget::Iterations(3)).unwrap();
    }
    engine.state()
}

pub fn solve(
    grid: &impl GridAdapter,
    config: SearchConfig,
    start: CellId,
    goal: CellId,
) -> (EngineState, Vec<CellId>) {
    let mut engine = engine_for(grid, config);
    let state = run(&mut engine, start, goal);
    (state, engine.solution().to_vec())
}

pub fn all_strategies() -> impl Iterator<Item = SearchStrategy> {
    SearchStrategy::all()
}
