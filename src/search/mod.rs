mod budget;
mod config;
pub mod diagnostics;
mod error;
mod frontier_entry;
mod grid;
mod observer;
mod open_list;
mod path_search;
mod search_graph;
mod search_space;
mod search_statistics;
mod solution;
mod strategy;
mod verbosity;

pub use budget::SearchBudget;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use frontier_entry::{EntryId, EntryStatus, FrontierEntry, FrontierView, NO_ENTRY};
pub use grid::{Cell, CellId, GridAdapter, HexGrid};
pub use observer::{NoopObserver, SearchObserver};
pub use open_list::{Comparator, OpenList};
pub use path_search::{EngineState, PathSearch};
pub use search_graph::{hex_neighbours, NodeId, SearchGraph, SearchNode};
pub use search_space::SearchSpace;
pub use search_statistics::SearchStatistics;
pub use solution::Solution;
pub use strategy::{Cost, OpenEntry, SearchStrategy};
pub use verbosity::Verbosity;
