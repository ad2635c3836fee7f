//! Serializable summaries of solver output.

use crate::graph::MultiDiGraph;
use crate::solver::Solution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeReport {
    pub source: String,
    pub target: String,
    pub key: String,
    pub weight: f64,
    /// Input edges folded into this one by chain contraction.
    pub n_edges: usize,
}

/// A solution described by node names, ready for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub roots: Vec<String>,
    pub weight: f64,
    pub edges: Vec<EdgeReport>,
}

impl SolutionReport {
    /// `graph` is the input graph the solution was computed on.
    pub fn new(graph: &MultiDiGraph, solution: &Solution) -> Self {
        let name = |idx| graph.node_name(idx).unwrap_or("?").to_string();
        Self {
            roots: solution.roots().iter().map(|&r| name(r)).collect(),
            weight: solution.weight(),
            edges: solution
                .edges()
                .iter()
                .map(|e| EdgeReport {
                    source: name(e.source),
                    target: name(e.target),
                    key: e.key.clone(),
                    weight: e.weight,
                    n_edges: e.n_edges,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
