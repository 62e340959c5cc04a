//! The incremental search engine.
//!
//! A [`PathSearch`] moves through
//! `Uninitialized -> Ready -> Searching -> {Succeeded | Exhausted}`:
//! [`PathSearch::initialize`] builds the graph once, [`PathSearch::enter`]
//! seeds a search, [`PathSearch::update`] expands a bounded number of entries
//! per call and [`PathSearch::exit`] throws the search away while keeping the
//! graph for the next one.

use crate::search::budget::BudgetTracker;
use crate::search::{
    diagnostics, CellId, EntryId, FrontierEntry, FrontierView, GridAdapter, NodeId, OpenEntry,
    OpenList, Result, SearchBudget, SearchConfig, SearchError, SearchGraph, SearchObserver,
    SearchSpace, SearchStatistics, Solution, NO_ENTRY,
};
use ordered_float::OrderedFloat;
use std::fmt::{self, Debug};
use strum_macros::{Display, EnumIs};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIs)]
#[strum(serialize_all = "snake_case")]
pub enum EngineState {
    /// No graph
    Uninitialized,
    /// Graph built, no search running
    Ready,
    /// Search entered and not finished
    Searching,
    /// Goal reached, solution available
    Succeeded,
    /// Open list drained without reaching the goal
    Exhausted,
}

impl EngineState {
    fn has_search(&self) -> bool {
        matches!(
            self,
            EngineState::Searching | EngineState::Succeeded | EngineState::Exhausted
        )
    }
}

/// Everything that lives for one `enter`/`exit` cycle.
#[derive(Debug)]
struct ActiveSearch {
    start: NodeId,
    goal: NodeId,
    space: SearchSpace,
    open_list: OpenList<OpenEntry>,
    statistics: SearchStatistics,
    last_expanded: EntryId,
    solution: Solution,
}

impl ActiveSearch {
    /// Pop and expand the best open entry. Returns the terminal state if the
    /// search finished with this step.
    fn expand_next(
        &mut self,
        graph: &SearchGraph,
        config: &SearchConfig,
    ) -> Result<Option<EngineState>> {
        if self.open_list.is_empty() {
            return Ok(Some(EngineState::Exhausted));
        }
        let entry_id = self.open_list.pop_best()?.entry;
        let entry = self.space.get_entry_mut(entry_id);
        entry.close();
        let node_id = entry.node();
        let OrderedFloat(path_cost) = entry.path_cost();
        let node = graph.node(node_id);

        self.last_expanded = entry_id;
        self.statistics.record_expansion(node.cell_id());
        diagnostics::record_expansion();

        if node_id == self.goal {
            self.solution = Solution::new(self.space.extract_path(entry_id, graph), path_cost);
            return Ok(Some(EngineState::Succeeded));
        }

        let strategy = config.strategy;
        let scale = strategy.heuristic_scale(config.heuristic_weight);
        let goal = graph.node(self.goal);
        for &neighbour_id in node.neighbours() {
            let neighbour = graph.node(neighbour_id);
            let new_path_cost = OrderedFloat(path_cost + node.step_cost(neighbour));

            match self.space.lookup(neighbour_id) {
                None => {
                    let heuristic_cost =
                        OrderedFloat(neighbour.cell().distance_to(goal.cell()) * scale);
                    let child = FrontierEntry::new(
                        neighbour_id,
                        entry_id,
                        heuristic_cost,
                        new_path_cost,
                        strategy.rank(heuristic_cost, new_path_cost),
                    );
                    let child_id = self.space.insert(child);
                    self.open_list
                        .push(self.space.get_entry(child_id).open_entry(child_id));
                    self.statistics.increment_generated_nodes();
                }
                Some(existing_id) if strategy.is_cost_aware() => {
                    let existing = self.space.get_entry_mut(existing_id);
                    if new_path_cost >= existing.path_cost() {
                        continue;
                    }
                    let was_open = existing.is_open();
                    let rank_cost = strategy.rank(existing.heuristic_cost(), new_path_cost);
                    existing.reparent(entry_id, new_path_cost, rank_cost);
                    let open_entry = existing.open_entry(existing_id);

                    if was_open {
                        self.open_list.remove(&open_entry);
                    } else {
                        self.statistics.increment_reopened_nodes();
                    }
                    self.open_list.push(open_entry);
                    self.statistics.increment_improved_nodes();
                    trace!(
                        cell = %neighbour.cell_id(),
                        parent = %node.cell_id(),
                        path_cost = new_path_cost.into_inner(),
                        reopened = !was_open,
                        "found cheaper route"
                    );
                }
                // First discovery wins for breadth-first and greedy search.
                Some(_) => {}
            }
        }

        if self.open_list.is_empty() {
            return Ok(Some(EngineState::Exhausted));
        }
        Ok(None)
    }

    fn redraw(&self, graph: &SearchGraph, observer: &mut dyn SearchObserver) {
        let cell_of = |entry_id: EntryId| graph.node(self.space.get_entry(entry_id).node()).cell_id();

        observer.clear();
        if self.last_expanded != NO_ENTRY {
            let chain: Vec<EntryId> = self.space.ancestry(self.last_expanded).collect();
            for pair in chain.windows(2) {
                observer.mark_path_edge(cell_of(pair[0]), cell_of(pair[1]));
            }
        }
        for (entry_id, _) in self.space.entries() {
            observer.mark_visited(cell_of(entry_id));
        }
        for (rank, open_entry) in self.open_list.enumerate().enumerate() {
            observer.mark_frontier(cell_of(open_entry.entry), rank);
        }
    }
}

pub struct PathSearch {
    config: SearchConfig,
    state: EngineState,
    graph: Option<SearchGraph>,
    search: Option<ActiveSearch>,
    observer: Option<Box<dyn SearchObserver>>,
}

impl Debug for PathSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathSearch")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("graph_nodes", &self.graph.as_ref().map(SearchGraph::len))
            .field("search", &self.search)
            .field("observer", &self.observer)
            .finish()
    }
}

impl PathSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            graph: None,
            search: None,
            observer: None,
        }
    }

    /// Install visualisation hooks, called at the end of every update.
    pub fn with_observer(mut self, observer: Box<dyn SearchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn SearchObserver>>) {
        self.observer = observer;
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn graph(&self) -> Option<&SearchGraph> {
        self.graph.as_ref()
    }

    /// Build the search graph. Only valid on an uninitialised engine; call
    /// [`PathSearch::shutdown`] first to switch grids.
    pub fn initialize(&mut self, grid: &impl GridAdapter) -> Result<()> {
        if !self.state.is_uninitialized() {
            return Err(SearchError::illegal_state("initialize", self.state));
        }
        self.config.validate()?;
        self.graph = Some(SearchGraph::build(grid)?);
        self.state = EngineState::Ready;
        info!(strategy = ?self.config.strategy, heuristic_weight = self.config.heuristic_weight, "engine ready");
        Ok(())
    }

    /// Start a search from `start` to `goal`.
    pub fn enter(&mut self, start: CellId, goal: CellId) -> Result<()> {
        if !self.state.is_ready() {
            return Err(SearchError::illegal_state("enter", self.state));
        }
        let graph = self
            .graph
            .as_ref()
            .ok_or(SearchError::illegal_state("enter", self.state))?;
        let start_node = graph
            .node_id(start)
            .ok_or(SearchError::InvalidLocation { cell: start })?;
        let goal_node = graph
            .node_id(goal)
            .ok_or(SearchError::InvalidLocation { cell: goal })?;

        let strategy = self.config.strategy;
        let heuristic_cost = OrderedFloat(
            graph
                .node(start_node)
                .cell()
                .distance_to(graph.node(goal_node).cell())
                * strategy.heuristic_scale(self.config.heuristic_weight),
        );
        let path_cost = OrderedFloat(0.);
        let root = FrontierEntry::new(
            start_node,
            NO_ENTRY,
            heuristic_cost,
            path_cost,
            strategy.rank(heuristic_cost, path_cost),
        );
        let space = SearchSpace::new(root);
        let root_id = space.root_entry_id();
        let mut open_list = strategy.open_list();
        open_list.push(space.get_entry(root_id).open_entry(root_id));

        info!(%start, %goal, "entering search");
        self.search = Some(ActiveSearch {
            start: start_node,
            goal: goal_node,
            space,
            open_list,
            statistics: SearchStatistics::new(),
            last_expanded: NO_ENTRY,
            solution: Solution::empty(),
        });
        self.state = EngineState::Searching;
        Ok(())
    }

    /// Expand entries until `budget` is spent or the search finishes, and
    /// return the resulting state.
    pub fn update(&mut self, budget: SearchBudget) -> Result<EngineState> {
        if !self.state.is_searching() {
            return Err(SearchError::illegal_state("update", self.state));
        }
        let (Some(graph), Some(search)) = (self.graph.as_ref(), self.search.as_mut()) else {
            return Err(SearchError::illegal_state("update", self.state));
        };
        search.statistics.increment_updates();

        let mut tracker: BudgetTracker = budget.start();
        let mut outcome = None;
        while outcome.is_none() && !tracker.is_spent() {
            outcome = search.expand_next(graph, &self.config)?;
            tracker.record_step();
        }
        debug!(
            steps = tracker.steps(),
            open = search.open_list.len(),
            visited = search.space.len(),
            "update finished"
        );

        if let Some(observer) = self.observer.as_deref_mut() {
            search.redraw(graph, observer);
        }

        if let Some(state) = outcome {
            self.state = state;
            search.statistics.finalise_search();
            match state {
                EngineState::Succeeded => info!(
                    hops = search.solution.hops(),
                    cost = search.solution.cost(),
                    "path found"
                ),
                _ => info!("open list exhausted, no path"),
            }
        }
        Ok(self.state)
    }

    pub fn is_done(&self) -> bool {
        self.state.is_succeeded() || self.state.is_exhausted()
    }

    /// Cells from start to goal, empty unless the search succeeded.
    pub fn solution(&self) -> &[CellId] {
        self.solution_path()
            .map(Solution::cells)
            .unwrap_or_default()
    }

    pub fn solution_path(&self) -> Option<&Solution> {
        match (&self.search, self.state) {
            (Some(search), EngineState::Succeeded) => Some(&search.solution),
            _ => None,
        }
    }

    pub fn solution_cost(&self) -> Option<f64> {
        self.solution_path().map(Solution::cost)
    }

    /// Discard the current search, keeping the graph.
    pub fn exit(&mut self) -> Result<()> {
        if !self.state.has_search() {
            return Err(SearchError::illegal_state("exit", self.state));
        }
        self.search = None;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.clear();
        }
        self.state = EngineState::Ready;
        debug!("search reset");
        Ok(())
    }

    /// Drop the search and the graph.
    pub fn shutdown(&mut self) {
        self.search = None;
        self.graph = None;
        self.state = EngineState::Uninitialized;
        info!("engine shut down");
    }

    pub fn statistics(&self) -> Option<&SearchStatistics> {
        self.search.as_ref().map(|search| &search.statistics)
    }

    /// Cells in the order they were expanded in the current search.
    pub fn expansion_order(&self) -> &[CellId] {
        self.statistics()
            .map(SearchStatistics::expansion_order)
            .unwrap_or_default()
    }

    /// The frontier entry of a cell in the current search, if it was visited.
    pub fn visited_entry(&self, cell: CellId) -> Option<FrontierView> {
        let graph = self.graph.as_ref()?;
        let search = self.search.as_ref()?;
        let entry_id = search.space.lookup(graph.node_id(cell)?)?;
        let entry = search.space.get_entry(entry_id);
        let parent = (entry.parent() != NO_ENTRY)
            .then(|| graph.node(search.space.get_entry(entry.parent()).node()).cell_id());
        Some(FrontierView::new(cell, parent, entry))
    }

    /// Open cells, next to be expanded first.
    pub fn open_cells(&self) -> Vec<CellId> {
        match (&self.graph, &self.search) {
            (Some(graph), Some(search)) => search
                .open_list
                .enumerate()
                .map(|open_entry| {
                    graph
                        .node(search.space.get_entry(open_entry.entry).node())
                        .cell_id()
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Start and goal of the current search.
    pub fn endpoints(&self) -> Option<(CellId, CellId)> {
        let graph = self.graph.as_ref()?;
        let search = self.search.as_ref()?;
        Some((
            graph.node(search.start).cell_id(),
            graph.node(search.goal).cell_id(),
        ))
    }
}
