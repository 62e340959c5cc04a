//! The grid side of the search: cell identifiers, cell data and the
//! [`GridAdapter`] trait through which the engine reads a map. [`HexGrid`] is
//! a small in-memory adapter for offset hex layouts.

use crate::search::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Row/column address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

impl CellId {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

impl FromStr for CellId {
    type Err = String;

    /// Parse `"row,col"`, with optional surrounding parentheses.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, column) = trimmed
            .split_once(',')
            .ok_or_else(|| format!("expected `row,col`, got `{}`", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row in `{}`: {}", s, e))?;
        let column = column
            .trim()
            .parse()
            .map_err(|e| format!("invalid column in `{}`: {}", s, e))?;
        Ok(Self { row, column })
    }
}

/// Traversal data for one cell. A weight of zero marks the cell impassable;
/// positive weights multiply the cost of entering the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    weight: f64,
    x: f64,
    y: f64,
}

impl Cell {
    pub fn new(weight: f64, x: f64, y: f64) -> Self {
        Self { weight, x, y }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_traversable(&self) -> bool {
        self.weight > 0.
    }

    /// Euclidean distance between the planar coordinates of two cells.
    pub fn distance_to(&self, other: &Cell) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Read-only view of a map, consumed by [`crate::search::SearchGraph::build`].
pub trait GridAdapter {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Cell at the given address, `None` if it is outside the grid.
    fn cell_at(&self, row: usize, column: usize) -> Option<Cell>;
}

/// Offset hex grid where odd rows are shifted right by half a cell.
///
/// Cell centres are laid out for hexes of unit radius, so every pair of
/// neighbouring cells is `sqrt(3)` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    rows: usize,
    columns: usize,
    weights: Vec<f64>,
}

impl HexGrid {
    /// A grid with weight 1 everywhere.
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            weights: vec![1.; rows * columns],
        }
    }

    /// Build a grid from rows of weights. All rows must have the same,
    /// non-zero length.
    pub fn from_weights(rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || columns == 0 {
            return Err(SearchError::InvalidGrid {
                reason: "grid has no cells".to_string(),
            });
        }
        if let Some(index) = rows.iter().position(|row| row.len() != columns) {
            return Err(SearchError::InvalidGrid {
                reason: format!(
                    "row {} has {} columns, expected {}",
                    index,
                    rows[index].len(),
                    columns
                ),
            });
        }
        let row_count = rows.len();
        Ok(Self {
            rows: row_count,
            columns,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    pub fn set_weight(&mut self, cell: CellId, weight: f64) -> Result<()> {
        let index = self
            .index(cell.row, cell.column)
            .ok_or(SearchError::InvalidLocation { cell })?;
        self.weights[index] = weight;
        Ok(())
    }

    /// Mark a cell impassable.
    pub fn block(&mut self, cell: CellId) -> Result<()> {
        self.set_weight(cell, 0.)
    }

    /// Planar centre of a cell.
    pub fn centre(row: usize, column: usize) -> (f64, f64) {
        let shift = if row % 2 == 1 { 0.5 } else { 0. };
        (3f64.sqrt() * (column as f64 + shift), 1.5 * row as f64)
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }
}

impl GridAdapter for HexGrid {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_at(&self, row: usize, column: usize) -> Option<Cell> {
        let index = self.index(row, column)?;
        let (x, y) = Self::centre(row, column);
        Some(Cell::new(self.weights[index], x, y))
    }
}
