use crate::search::{CellId, EngineState};
use thiserror::Error;

/// Convenient result alias for the search engine.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by the grid graph builder, the open list and the engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The grid adapter reported zero rows or columns, or a malformed cell.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// A start or goal cell is outside the grid or impassable.
    #[error("cell {cell} is outside the grid or impassable")]
    InvalidLocation { cell: CellId },

    /// Peeking or popping an empty open list.
    #[error("open list is empty")]
    EmptyCollection,

    /// An engine operation was called from a state that does not permit it.
    #[error("cannot {operation} while the engine is {state}")]
    IllegalState {
        operation: &'static str,
        state: EngineState,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Wrapper for IO errors raised while reading configuration files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for TOML parse errors.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Wrapper for JSON errors raised while writing reports.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    pub(crate) fn illegal_state(operation: &'static str, state: EngineState) -> Self {
        SearchError::IllegalState { operation, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let error = SearchError::InvalidLocation {
            cell: CellId::new(3, 4),
        };
        assert_eq!(error.to_string(), "cell (3,4) is outside the grid or impassable");

        let error = SearchError::illegal_state("update", EngineState::Ready);
        assert_eq!(error.to_string(), "cannot update while the engine is ready");
    }

    #[test]
    fn json_failures_convert_into_search_errors() {
        fn report() -> Result<String> {
            let value: serde_json::Value = serde_json::from_str("{\"cells\": [")?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        let error = report().unwrap_err();
        assert!(matches!(error, SearchError::Json(_)));
        assert!(error.to_string().contains("EOF"));
    }
}
