use crate::search::CellId;
use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct SearchStatistics {
    /// Number of entries popped from the open list
    expanded_nodes: i64,
    /// Number of frontier entries created
    generated_nodes: i64,
    /// Number of closed entries put back on the open list
    reopened_nodes: i64,
    /// Number of entries given a cheaper parent, open or closed
    improved_nodes: i64,
    /// Number of update calls
    updates: i64,
    /// Cells in the order they were expanded
    expansion_order: Vec<CellId>,
    /// Time when the search started
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        info!("starting search");
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            reopened_nodes: 0,
            improved_nodes: 0,
            updates: 0,
            expansion_order: Vec::new(),
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn record_expansion(&mut self, cell: CellId) {
        self.expanded_nodes += 1;
        self.expansion_order.push(cell);
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self) {
        self.generated_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_reopened_nodes(&mut self) {
        self.reopened_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_improved_nodes(&mut self) {
        self.improved_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_updates(&mut self) {
        self.updates += 1;
    }

    pub fn expanded_nodes(&self) -> i64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> i64 {
        self.generated_nodes
    }

    pub fn reopened_nodes(&self) -> i64 {
        self.reopened_nodes
    }

    pub fn improved_nodes(&self) -> i64 {
        self.improved_nodes
    }

    pub fn updates(&self) -> i64 {
        self.updates
    }

    pub fn expansion_order(&self) -> &[CellId] {
        &self.expansion_order
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    pub fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            reopened_nodes = self.reopened_nodes,
            improved_nodes = self.improved_nodes,
            updates = self.updates,
        );
    }

    pub fn finalise_search(&self) {
        info!("finalising search");
        self.log();
        info!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
