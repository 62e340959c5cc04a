use crate::search::{CellId, Cost, NodeId, OpenEntry};
use ordered_float::OrderedFloat;

/// Handle of a [`FrontierEntry`] inside a [`crate::search::SearchSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Parent handle of the root entry.
pub const NO_ENTRY: EntryId = EntryId(usize::MAX);

/// The status of a frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Entry is in the open list
    Open,
    /// Entry has been popped and expanded
    Closed,
}

/// Per-search record for a visited [`crate::search::SearchNode`]: the best
/// known way to reach it and the costs the open list ranks it by.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// The graph node this entry stands for
    node: NodeId,
    /// Entry this one was reached from, [`NO_ENTRY`] for the start
    parent: EntryId,
    status: EntryStatus,
    /// Estimated cost from the node to the goal, scaled per strategy
    heuristic_cost: Cost,
    /// Accumulated cost from the start along the parent chain
    path_cost: Cost,
    /// Key the strategy's comparator ranks on
    rank_cost: Cost,
}

impl FrontierEntry {
    /// A freshly discovered entry, already open.
    pub fn new(
        node: NodeId,
        parent: EntryId,
        heuristic_cost: Cost,
        path_cost: Cost,
        rank_cost: Cost,
    ) -> Self {
        Self {
            node,
            parent,
            status: EntryStatus::Open,
            heuristic_cost,
            path_cost,
            rank_cost,
        }
    }

    /// Point the entry at a cheaper parent. The heuristic stays as it was.
    pub fn reparent(&mut self, parent: EntryId, path_cost: Cost, rank_cost: Cost) {
        self.parent = parent;
        self.path_cost = path_cost;
        self.rank_cost = rank_cost;
        self.status = EntryStatus::Open;
    }

    pub fn close(&mut self) {
        debug_assert_eq!(
            self.status,
            EntryStatus::Open,
            "Entry must be open to close it"
        );
        self.status = EntryStatus::Closed;
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn parent(&self) -> EntryId {
        self.parent
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == EntryStatus::Open
    }

    pub fn heuristic_cost(&self) -> Cost {
        self.heuristic_cost
    }

    pub fn path_cost(&self) -> Cost {
        self.path_cost
    }

    pub fn rank_cost(&self) -> Cost {
        self.rank_cost
    }

    /// The open list key for this entry under handle `id`.
    pub fn open_entry(&self, id: EntryId) -> OpenEntry {
        OpenEntry {
            entry: id,
            heuristic_cost: self.heuristic_cost,
            path_cost: self.path_cost,
            rank_cost: self.rank_cost,
        }
    }
}

/// Read-only summary of a frontier entry, addressed by cells rather than
/// internal handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierView {
    pub cell: CellId,
    pub parent: Option<CellId>,
    pub heuristic_cost: f64,
    pub path_cost: f64,
    pub rank_cost: f64,
    pub is_open: bool,
}

impl FrontierView {
    pub(crate) fn new(cell: CellId, parent: Option<CellId>, entry: &FrontierEntry) -> Self {
        let OrderedFloat(heuristic_cost) = entry.heuristic_cost;
        let OrderedFloat(path_cost) = entry.path_cost;
        let OrderedFloat(rank_cost) = entry.rank_cost;
        Self {
            cell,
            parent,
            heuristic_cost,
            path_cost,
            rank_cost,
            is_open: entry.is_open(),
        }
    }
}
