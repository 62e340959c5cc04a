//! The static search graph. One [`SearchNode`] per traversable cell, with its
//! hex neighbours resolved once so that repeated searches only walk indices.

use crate::search::{diagnostics, Cell, CellId, GridAdapter, Result, SearchError};
use smallvec::SmallVec;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn id(&self) -> usize {
        self.0
    }
}

/// Neighbour addresses of a cell in an offset hex grid whose odd rows are
/// shifted right. The order is the order in which the engine examines them.
pub fn hex_neighbours(
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
) -> SmallVec<[CellId; 6]> {
    let mut neighbours = SmallVec::new();
    let has_up = row >= 1;
    let has_down = row + 1 < rows;
    let has_left = column >= 1;
    let has_right = column + 1 < columns;

    if row % 2 == 0 {
        if has_left {
            if has_up {
                neighbours.push(CellId::new(row - 1, column - 1));
            }
            if has_down {
                neighbours.push(CellId::new(row + 1, column - 1));
            }
            neighbours.push(CellId::new(row, column - 1));
        }
        if has_right {
            neighbours.push(CellId::new(row, column + 1));
        }
    } else {
        if has_left {
            neighbours.push(CellId::new(row, column - 1));
        }
        if has_right {
            if has_up {
                neighbours.push(CellId::new(row - 1, column + 1));
            }
            if has_down {
                neighbours.push(CellId::new(row + 1, column + 1));
            }
            neighbours.push(CellId::new(row, column + 1));
        }
    }
    if has_up {
        neighbours.push(CellId::new(row - 1, column));
    }
    if has_down {
        neighbours.push(CellId::new(row + 1, column));
    }
    neighbours
}

/// A traversable cell together with its traversable neighbours.
#[derive(Debug)]
pub struct SearchNode {
    cell_id: CellId,
    cell: Cell,
    neighbours: SmallVec<[NodeId; 6]>,
}

impl SearchNode {
    pub fn cell_id(&self) -> CellId {
        self.cell_id
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn neighbours(&self) -> &[NodeId] {
        &self.neighbours
    }

    /// Cost of stepping from this node onto `target`: the distance between
    /// the two cells scaled by the weight of the cell entered.
    pub fn step_cost(&self, target: &SearchNode) -> f64 {
        self.cell.distance_to(&target.cell) * target.cell.weight()
    }
}

/// Immutable graph built from a [`GridAdapter`]. Impassable cells are left
/// out entirely, so they never appear as anyone's neighbour.
#[derive(Debug)]
pub struct SearchGraph {
    rows: usize,
    columns: usize,
    nodes: Vec<SearchNode>,
    index: Vec<Option<NodeId>>,
}

impl SearchGraph {
    pub fn build(grid: &impl GridAdapter) -> Result<Self> {
        let rows = grid.row_count();
        let columns = grid.column_count();
        if rows == 0 || columns == 0 {
            return Err(SearchError::InvalidGrid {
                reason: format!("grid is {}x{}", rows, columns),
            });
        }

        let mut nodes = Vec::new();
        let mut index = vec![None; rows * columns];
        for row in 0..rows {
            for column in 0..columns {
                let cell_id = CellId::new(row, column);
                let cell = grid
                    .cell_at(row, column)
                    .ok_or_else(|| SearchError::InvalidGrid {
                        reason: format!("no cell at {} inside a {}x{} grid", cell_id, rows, columns),
                    })?;
                if !(cell.weight() >= 0. && cell.weight().is_finite()) {
                    return Err(SearchError::InvalidGrid {
                        reason: format!("cell {} has weight {}", cell_id, cell.weight()),
                    });
                }
                if !cell.is_traversable() {
                    continue;
                }
                index[row * columns + column] = Some(NodeId(nodes.len()));
                nodes.push(SearchNode {
                    cell_id,
                    cell,
                    neighbours: SmallVec::new(),
                });
            }
        }

        let mut edges = 0;
        for node in nodes.iter_mut() {
            let CellId { row, column } = node.cell_id;
            node.neighbours = hex_neighbours(row, column, rows, columns)
                .into_iter()
                .filter_map(|neighbour| index[neighbour.row * columns + neighbour.column])
                .collect();
            edges += node.neighbours.len();
        }

        diagnostics::record_graph_built(nodes.len());
        info!(rows, columns, nodes = nodes.len(), edges, "built search graph");
        Ok(Self {
            rows,
            columns,
            nodes,
            index,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for a cell, `None` if the cell is outside the grid or impassable.
    pub fn node_id(&self, cell: CellId) -> Option<NodeId> {
        if cell.row >= self.rows || cell.column >= self.columns {
            return None;
        }
        self.index[cell.row * self.columns + cell.column]
    }

    #[inline(always)]
    pub fn node(&self, node_id: NodeId) -> &SearchNode {
        &self.nodes[node_id.0]
    }
}

impl Drop for SearchGraph {
    fn drop(&mut self) {
        diagnostics::record_nodes_released(self.nodes.len());
    }
}
