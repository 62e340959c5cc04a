//! A solution is the sequence of cells from the start to the goal, both
//! inclusive, together with its accumulated traversal cost.

use crate::search::CellId;
use itertools::Itertools;
use serde::Serialize;
use std::fmt::{self, Display};
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Solution {
    cells: Vec<CellId>,
    cost: f64,
}

impl Solution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(cells: Vec<CellId>, cost: f64) -> Self {
        Self { cells, cost }
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of moves, one less than the number of cells.
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

impl Deref for Solution {
    type Target = [CellId];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.iter().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_hops() {
        let solution = Solution::new(
            vec![CellId::new(0, 0), CellId::new(1, 0), CellId::new(1, 1)],
            3.5,
        );
        assert_eq!(solution.to_string(), "(0,0) -> (1,0) -> (1,1)");
        assert_eq!(solution.hops(), 2);
        assert_eq!(solution.len(), 3);
        assert_eq!(Solution::empty().hops(), 0);
        assert!(Solution::empty().is_empty());
    }
}
