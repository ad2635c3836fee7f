//! components.rs
//! Splits a disconnected working graph and recombines per-component solutions.

use super::solution::{rank, Solution, SolutionCmp};
use crate::analysis::topology::weakly_connected_components;
use crate::graph::{NodeIndex, WorkingGraph};
use std::collections::HashSet;

/// One weakly connected piece of the working graph with the terminals it holds.
#[derive(Debug, Clone)]
pub struct Component {
    pub graph: WorkingGraph,
    /// In the caller's terminal order.
    pub terminals: Vec<NodeIndex>,
}

/// Splits `graph` into weakly connected components and keeps those holding at
/// least two terminals. When there is only one terminal overall, its own
/// component is kept.
///
/// Component subgraphs keep the node and edge indices of `graph`.
pub fn split_components(graph: &WorkingGraph, terminals: &[NodeIndex]) -> Vec<Component> {
    let required = terminals.len().min(2);
    let mut kept = Vec::new();

    for members in weakly_connected_components(graph) {
        let members: HashSet<NodeIndex> = members.into_iter().collect();
        let inside: Vec<NodeIndex> = terminals.iter().copied().filter(|t| members.contains(t)).collect();
        if inside.is_empty() || inside.len() < required {
            continue;
        }

        let mut sub = graph.clone();
        sub.retain_nodes(|_, n| members.contains(&n));
        kept.push(Component { graph: sub, terminals: inside });
    }

    tracing::debug!(kept = kept.len(), "split working graph into components");
    kept
}

/// Pairs every running solution with every solution of the next component and
/// keeps the best `top_k` unions.
pub fn combine(best: &[Solution], next: &[Solution], cmp: &SolutionCmp<'_>, top_k: usize) -> Vec<Solution> {
    let mut unions = Vec::with_capacity(best.len() * next.len());
    for a in best {
        for b in next {
            unions.push(a.union(b));
        }
    }
    rank(unions, cmp, top_k)
}
