//! Solver configuration, loadable from JSON.

use crate::solver::SolverError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] SolverError),
}

/// Beam widths and preprocessing switches for one solver run.
///
/// Both k values trade accuracy for time; neither gives an exact Steiner tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of solutions kept at every merge step and returned at the end.
    pub top_k_arborescences: usize,
    /// Beam width: upward paths kept per (terminal, ancestor) pair.
    pub top_k_paths_per_node: usize,
    /// Contract non-terminal nodes with one incoming and one outgoing edge.
    pub allow_chain_contraction: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            top_k_arborescences: 10,
            top_k_paths_per_node: 10,
            allow_chain_contraction: true,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.top_k_arborescences == 0 {
            return Err(SolverError::InvalidConfig("top_k_arborescences must be at least 1".into()));
        }
        if self.top_k_paths_per_node == 0 {
            return Err(SolverError::InvalidConfig("top_k_paths_per_node must be at least 1".into()));
        }
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
