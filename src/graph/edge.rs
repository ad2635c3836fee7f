//! Defines the `Edge` type, one weighted connection of the working graph.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

/// The working graph the solver searches. Node weights are node names and share
/// their indices with the input `MultiDiGraph`.
pub type WorkingGraph = StableDiGraph<String, Edge>;

/// A directed, weighted edge of the working graph.
///
/// Either wraps exactly one input edge (`n_edges == 1`) or stands in for a
/// contracted chain of input edges (`n_edges >= 2`). Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique within one solver invocation. Input edges are numbered in insertion
    /// order; contracted edges join the ids they replace with `-`.
    pub id: String,
    pub source: NodeIndex,
    pub target: NodeIndex,
    /// Discriminates parallel edges between the same endpoints.
    pub key: String,
    /// Non-negative; lower is better.
    pub weight: f64,
    /// How many input edges this edge represents.
    pub n_edges: usize,
}

impl Edge {
    pub fn is_contracted(&self) -> bool {
        self.n_edges > 1
    }
}
