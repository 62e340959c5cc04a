use crate::search::{Result, SearchError, SearchStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration, usually read from a TOML file:
///
/// ```toml
/// strategy = "a-star"
/// heuristic_weight = 2.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Multiplier on the straight-line heuristic for greedy best-first and
    /// A*. Values above 1 trade optimality for fewer expansions.
    pub heuristic_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::AStar,
            heuristic_weight: 2.,
        }
    }
}

impl SearchConfig {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_heuristic_weight(mut self, heuristic_weight: f64) -> Self {
        self.heuristic_weight = heuristic_weight;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0. {
            return Err(SearchError::InvalidConfig {
                reason: format!(
                    "heuristic_weight must be a finite non-negative number, got {}",
                    self.heuristic_weight
                ),
            });
        }
        Ok(())
    }
}
