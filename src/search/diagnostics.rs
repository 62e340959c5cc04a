//! Process-wide tallies of graph and search objects. These are for
//! instrumentation only; the engine never reads them. Tests that assert on
//! them are `#[serial]`, tests that build graphs or run searches are
//! `#[parallel]` so the two never interleave.

use global_counter::global_counter;

global_counter!(GRAPHS_BUILT, usize, 0);
global_counter!(NODES_CREATED, usize, 0);
global_counter!(NODES_RELEASED, usize, 0);
global_counter!(ENTRIES_CREATED, usize, 0);
global_counter!(EXPANSIONS, usize, 0);

/// A copy of all counters at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub graphs_built: usize,
    pub nodes_created: usize,
    pub nodes_released: usize,
    pub entries_created: usize,
    pub expansions: usize,
}

impl Diagnostics {
    /// Search nodes created but not yet released.
    pub fn live_nodes(&self) -> usize {
        self.nodes_created.saturating_sub(self.nodes_released)
    }
}

pub fn snapshot() -> Diagnostics {
    Diagnostics {
        graphs_built: GRAPHS_BUILT.get_cloned(),
        nodes_created: NODES_CREATED.get_cloned(),
        nodes_released: NODES_RELEASED.get_cloned(),
        entries_created: ENTRIES_CREATED.get_cloned(),
        expansions: EXPANSIONS.get_cloned(),
    }
}

/// Zero every counter.
pub fn reset() {
    GRAPHS_BUILT.set(0);
    NODES_CREATED.set(0);
    NODES_RELEASED.set(0);
    ENTRIES_CREATED.set(0);
    EXPANSIONS.set(0);
}

pub(crate) fn record_graph_built(node_count: usize) {
    GRAPHS_BUILT.inc();
    NODES_CREATED.set(NODES_CREATED.get_cloned() + node_count);
}

pub(crate) fn record_nodes_released(node_count: usize) {
    NODES_RELEASED.set(NODES_RELEASED.get_cloned() + node_count);
}

pub(crate) fn record_entry_created() {
    ENTRIES_CREATED.inc();
}

pub(crate) fn record_expansion() {
    EXPANSIONS.inc();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn reset_zeroes_counters() {
        record_graph_built(4);
        record_entry_created();
        record_expansion();
        record_nodes_released(1);
        assert!(snapshot().nodes_created >= 4);

        reset();
        assert_eq!(snapshot(), Diagnostics::default());

        record_graph_built(3);
        record_nodes_released(2);
        let diagnostics = snapshot();
        assert_eq!(diagnostics.graphs_built, 1);
        assert_eq!(diagnostics.live_nodes(), 1);
    }
}
