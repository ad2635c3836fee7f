//! postprocess.rs
//! Maps a solution on the working graph back onto the input graph.

use super::error::SolverError;
use super::preprocess::ContractionMap;
use super::solution::Solution;
use crate::graph::{Edge, EdgeIndex, MultiDiGraph};
use std::collections::HashSet;

/// Rebuilds the subgraph of `original` that `solution` stands for.
///
/// Contracted edges are expanded (recursively) into the input edges they
/// replaced; every other edge is matched by endpoints and key. The result is
/// `original` with all unselected edges and all isolated nodes removed.
pub fn expand_to_original(
    original: &MultiDiGraph,
    contractions: &ContractionMap,
    solution: &Solution,
) -> Result<MultiDiGraph, SolverError> {
    let mut selected: HashSet<EdgeIndex> = HashSet::with_capacity(solution.edges().len());
    let mut pending: Vec<&Edge> = solution.edges().iter().collect();

    while let Some(edge) = pending.pop() {
        if let Some(contraction) = contractions.get(&edge.id) {
            pending.push(&contraction.incoming);
            pending.push(&contraction.outgoing);
            continue;
        }
        let found = original.find_edge(edge.source, edge.target, &edge.key).ok_or_else(|| {
            SolverError::MalformedSolution(format!(
                "edge {} ({} -> {} [{}]) is not part of the input graph",
                edge.id,
                original.node_name(edge.source).unwrap_or("?"),
                original.node_name(edge.target).unwrap_or("?"),
                edge.key
            ))
        })?;
        selected.insert(found);
    }

    let mut subgraph = original.clone();
    subgraph.remove_edges_except(&selected);
    subgraph.remove_isolated_nodes();
    Ok(subgraph)
}
