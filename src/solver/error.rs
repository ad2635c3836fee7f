//! Defines the error types for the solver module.
use thiserror::Error;

/// Conditions that abort one solver invocation.
///
/// None of these are retried internally. A cycle introduced while merging
/// paths is not an error: that partial state is dropped and the search goes on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A weakly connected (sub)graph has no node that is an ancestor of every terminal.
    #[error("No single root reaches all terminals {terminals:?}")]
    NoSingleRoot { terminals: Vec<String> },
    /// A component reached the solver without the terminals it needs.
    #[error("Disconnected graph: {0}")]
    DisconnectedGraph(String),
    #[error("Terminal '{0}' is not a node of the graph")]
    UnknownTerminal(String),
    #[error("At least one terminal node is required")]
    NoTerminals,
    #[error("Edge {source_node} -> {target_node} [{key}] has invalid weight {weight}")]
    InvalidWeight { source_node: String, target_node: String, key: String, weight: f64 },
    #[error("Invalid solver config: {0}")]
    InvalidConfig(String),
    /// Internal invariant broken while assembling or expanding a subtree.
    #[error("Malformed solution: {0}")]
    MalformedSolution(String),
}
