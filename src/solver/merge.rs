//! merge.rs
//! Combines per-terminal upward paths into subtrees under common roots.

use super::error::SolverError;
use super::path::UpwardPath;
use super::solution::{rank, Solution, SolutionCmp};
use super::traversal::UpwardTraversal;
use crate::analysis::topology::{check_cycle, CycleCheck};
use crate::graph::{EdgeIndex, NodeIndex, WorkingGraph};
use std::collections::HashSet;

/// A subtree under construction. Cloned before every merge so beam branches
/// never share mutable state.
#[derive(Debug, Clone)]
struct PartialTree {
    edges: Vec<EdgeIndex>,
    // Endpoint pairs already covered, regardless of edge key.
    pairs: HashSet<(NodeIndex, NodeIndex)>,
    weight: f64,
}

impl PartialTree {
    fn from_path(path: &UpwardPath, graph: &WorkingGraph) -> Self {
        let empty = Self { edges: Vec::new(), pairs: HashSet::new(), weight: 0.0 };
        empty.merge_path(path, graph)
    }

    /// Adds the path's edges whose endpoint pair is not covered yet.
    fn merge_path(&self, path: &UpwardPath, graph: &WorkingGraph) -> Self {
        let mut next = self.clone();
        for &e in path.edges() {
            let edge = &graph[e];
            if next.pairs.insert((edge.source, edge.target)) {
                next.edges.push(e);
                next.weight += edge.weight;
            }
        }
        next
    }

    fn arcs<'g>(&'g self, graph: &'g WorkingGraph) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + 'g {
        self.edges.iter().map(move |&e| (graph[e].source, graph[e].target))
    }
}

/// Nodes that every traversal reaches, minus `invalid_roots`, sorted by node name.
pub fn candidate_roots(
    graph: &WorkingGraph,
    traversals: &[UpwardTraversal],
    invalid_roots: &HashSet<NodeIndex>,
) -> Vec<NodeIndex> {
    let Some((first, rest)) = traversals.split_first() else {
        return Vec::new();
    };
    let mut roots: Vec<NodeIndex> = first
        .ancestors()
        .filter(|n| !invalid_roots.contains(n) && rest.iter().all(|t| t.reaches(*n)))
        .collect();
    roots.sort_by(|a, b| graph[*a].cmp(&graph[*b]));
    roots
}

/// Builds the ranked subtrees spanning every terminal from each of `roots`.
///
/// `traversals` must be ordered by terminal name. For every root the states are
/// seeded from the first terminal's paths and grown one terminal at a time; a
/// state that gains a cycle is dropped, and after each terminal the states are
/// cut back to the `top_k` lightest. Edge-less subtrees are not reported.
pub fn merge_traversals(
    graph: &WorkingGraph,
    traversals: &[UpwardTraversal],
    roots: &[NodeIndex],
    top_k: usize,
    cmp: &SolutionCmp<'_>,
) -> Result<Vec<Solution>, SolverError> {
    let Some((first, rest)) = traversals.split_first() else {
        return Ok(Vec::new());
    };

    let mut results = Vec::new();
    for &root in roots {
        let mut states: Vec<PartialTree> =
            first.paths_from(root).iter().map(|p| PartialTree::from_path(p, graph)).collect();

        for traversal in rest {
            let mut next_states = Vec::new();
            for state in &states {
                for path in traversal.paths_from(root) {
                    let merged = state.merge_path(path, graph);
                    let verdict = check_cycle(merged.arcs(graph), root);
                    match verdict {
                        CycleCheck::Acyclic => next_states.push(merged),
                        CycleCheck::CycleDetected { node } => {
                            tracing::trace!(root = %graph[root], at = %graph[node], "dropping cyclic state");
                        }
                        CycleCheck::Error(msg) => return Err(SolverError::MalformedSolution(msg)),
                    }
                }
            }
            if next_states.is_empty() {
                tracing::trace!(root = %graph[root], terminal = %graph[traversal.terminal()], "no acyclic merge left");
            }
            next_states.sort_by(|a, b| a.weight.total_cmp(&b.weight));
            next_states.truncate(top_k);
            states = next_states;
        }

        results.extend(
            states
                .into_iter()
                .filter(|s| !s.edges.is_empty())
                .map(|s| Solution::new(vec![root], s.edges.iter().map(|&e| graph[e].clone()))),
        );
    }

    tracing::debug!(roots = roots.len(), candidates = results.len(), "merged terminal paths");
    Ok(rank(results, cmp, top_k))
}
