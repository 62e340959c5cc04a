use crate::search::CellId;
use std::fmt::Debug;

/// Visualisation hooks called by [`crate::search::PathSearch`] at the end of
/// every update call. Implementations only draw; nothing they do can change the
/// outcome of a search.
pub trait SearchObserver: Debug {
    /// Forget everything drawn for the previous update.
    fn clear(&mut self) {}

    /// A cell has a frontier entry in the current search.
    fn mark_visited(&mut self, _cell: CellId) {}

    /// A cell is waiting in the open list; `rank` 0 is the next to expand.
    fn mark_frontier(&mut self, _cell: CellId, _rank: usize) {}

    /// One edge of the best known path to the cell expanded last.
    fn mark_path_edge(&mut self, _from: CellId, _to: CellId) {}
}

#[derive(Clone, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
