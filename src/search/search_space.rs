use crate::search::{diagnostics, CellId, EntryId, FrontierEntry, NodeId, SearchGraph, NO_ENTRY};
use segvec::{Linear, SegVec};
use std::collections::HashMap;

/// A [`SearchSpace`] owns every [`FrontierEntry`] of one search, together
/// with the visited table mapping graph nodes to their entry. Entries are
/// never removed while the search runs; the whole space is dropped when the
/// search is reset.
#[derive(Debug)]
pub struct SearchSpace {
    root_entry_id: EntryId,
    entries: SegVec<FrontierEntry, Linear>,
    visited: HashMap<NodeId, EntryId>,
}

impl SearchSpace {
    pub fn new(root: FrontierEntry) -> Self {
        let mut space = Self {
            root_entry_id: NO_ENTRY,
            entries: SegVec::new(),
            visited: HashMap::new(),
        };
        space.root_entry_id = space.insert(root);
        space
    }

    /// Register the entry for a node that has not been visited yet.
    pub fn insert(&mut self, entry: FrontierEntry) -> EntryId {
        debug_assert!(
            !self.visited.contains_key(&entry.node()),
            "Node already has a frontier entry"
        );
        let entry_id = EntryId::from_index(self.entries.len());
        self.visited.insert(entry.node(), entry_id);
        self.entries.push(entry);
        diagnostics::record_entry_created();
        entry_id
    }

    pub fn lookup(&self, node: NodeId) -> Option<EntryId> {
        self.visited.get(&node).copied()
    }

    #[inline(always)]
    pub fn root_entry_id(&self) -> EntryId {
        self.root_entry_id
    }

    #[inline(always)]
    pub fn get_entry(&self, entry_id: EntryId) -> &FrontierEntry {
        self.entries
            .get(entry_id.index())
            .expect("Invalid entry id")
    }

    #[inline(always)]
    pub fn get_entry_mut(&mut self, entry_id: EntryId) -> &mut FrontierEntry {
        self.entries
            .get_mut(entry_id.index())
            .expect("Invalid entry id")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Entries in the order they were discovered.
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &FrontierEntry)> + '_ {
        (0..self.entries.len()).filter_map(|index| {
            self.entries
                .get(index)
                .map(|entry| (EntryId::from_index(index), entry))
        })
    }

    /// Walk parent handles from `entry_id` back to the root. The first item
    /// is `entry_id` itself.
    pub fn ancestry(&self, entry_id: EntryId) -> impl Iterator<Item = EntryId> + '_ {
        std::iter::successors(Some(entry_id), |&current| {
            let parent = self.get_entry(current).parent();
            (parent != NO_ENTRY).then_some(parent)
        })
    }

    /// Cells from the root to `goal_entry_id`, both inclusive.
    pub fn extract_path(&self, goal_entry_id: EntryId, graph: &SearchGraph) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self
            .ancestry(goal_entry_id)
            .map(|entry_id| graph.node(self.get_entry(entry_id).node()).cell_id())
            .collect();
        cells.reverse();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::HexGrid;
    use ordered_float::OrderedFloat;
    use serial_test::parallel;

    fn entry(graph: &SearchGraph, row: usize, column: usize, parent: EntryId) -> FrontierEntry {
        let node = graph.node_id(CellId::new(row, column)).unwrap();
        let zero = OrderedFloat(0.);
        FrontierEntry::new(node, parent, zero, zero, zero)
    }

    #[test]
    #[parallel]
    fn paths_run_from_root_to_goal() {
        let graph = SearchGraph::build(&HexGrid::uniform(2, 3)).unwrap();
        let mut space = SearchSpace::new(entry(&graph, 0, 0, NO_ENTRY));
        let root = space.root_entry_id();
        let middle = space.insert(entry(&graph, 1, 0, root));
        let goal = space.insert(entry(&graph, 1, 1, middle));
        space.insert(entry(&graph, 0, 1, root));

        assert_eq!(space.len(), 4);
        assert_eq!(
            space.ancestry(goal).collect::<Vec<_>>(),
            vec![goal, middle, root]
        );
        assert_eq!(space.ancestry(root).collect::<Vec<_>>(), vec![root]);
        assert_eq!(
            space.extract_path(goal, &graph),
            vec![CellId::new(0, 0), CellId::new(1, 0), CellId::new(1, 1)]
        );
        assert_eq!(space.extract_path(root, &graph), vec![CellId::new(0, 0)]);
    }

    #[test]
    #[parallel]
    fn lookup_follows_discovery_order() {
        let graph = SearchGraph::build(&HexGrid::uniform(1, 3)).unwrap();
        let mut space = SearchSpace::new(entry(&graph, 0, 0, NO_ENTRY));
        let root = space.root_entry_id();
        let second = space.insert(entry(&graph, 0, 2, root));

        let node = |column| graph.node_id(CellId::new(0, column)).unwrap();
        assert_eq!(space.lookup(node(0)), Some(root));
        assert_eq!(space.lookup(node(2)), Some(second));
        assert_eq!(space.lookup(node(1)), None);
        let order: Vec<EntryId> = space.entries().map(|(id, _)| id).collect();
        assert_eq!(order, vec![root, second]);

        space.get_entry_mut(second).close();
        assert!(!space.get_entry(second).is_open());
    }
}
