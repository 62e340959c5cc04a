use std::time::{Duration, Instant};

/// How much work one [`crate::search::PathSearch::update`] call may do.
///
/// Every call expands at least one entry, so a zero budget still makes
/// progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// At most this many expansion steps.
    Iterations(usize),
    /// Stop starting new steps once this much wall time has passed.
    TimeSlice(Duration),
    /// Run until the search is done.
    Unbounded,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Iterations(1)
    }
}

impl SearchBudget {
    pub(crate) fn start(self) -> BudgetTracker {
        BudgetTracker {
            budget: self,
            start_time: Instant::now(),
            steps: 0,
        }
    }
}

/// Tracks one update call against its budget.
#[derive(Debug)]
pub(crate) struct BudgetTracker {
    budget: SearchBudget,
    start_time: Instant,
    steps: usize,
}

impl BudgetTracker {
    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_spent(&self) -> bool {
        if self.steps == 0 {
            return false;
        }
        match self.budget {
            SearchBudget::Iterations(limit) => self.steps >= limit,
            SearchBudget::TimeSlice(slice) => self.start_time.elapsed() >= slice,
            SearchBudget::Unbounded => false,
        }
    }
}
