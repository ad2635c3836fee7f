//! preprocess.rs
//! Builds the working graph and optionally contracts degree-(1,1) chains.

use super::error::SolverError;
use crate::graph::{Edge, EdgeIndex, MultiDiGraph, NodeIndex, WorkingGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Everything needed to undo one chain contraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Contraction {
    /// The removed intermediate node.
    pub node: NodeIndex,
    pub incoming: Edge,
    pub outgoing: Edge,
}

/// Synthetic edge id -> the contraction that produced it.
pub type ContractionMap = HashMap<String, Contraction>;

/// Wraps every input edge as an `Edge` with `n_edges == 1`.
///
/// Edge ids are the input edge indices, which follow insertion order. The weight
/// of each edge comes from `weight_fn(source, target, key)` and must be finite
/// and non-negative.
pub fn build_working_graph<F>(input: &MultiDiGraph, weight_fn: F) -> Result<WorkingGraph, SolverError>
where
    F: Fn(&str, &str, &str) -> f64,
{
    let mut prepared: HashMap<EdgeIndex, Edge> = HashMap::with_capacity(input.edge_count());
    for e in input.edge_indices() {
        let (Some((s, t)), Some(data)) = (input.edge_endpoints(e), input.edge_data(e)) else {
            continue;
        };
        let s_name = input.node_name(s).unwrap_or_default();
        let t_name = input.node_name(t).unwrap_or_default();
        let weight = weight_fn(s_name, t_name, &data.key);
        if !weight.is_finite() || weight < 0.0 {
            return Err(SolverError::InvalidWeight {
                source_node: s_name.to_string(),
                target_node: t_name.to_string(),
                key: data.key.clone(),
                weight,
            });
        }
        prepared.insert(
            e,
            Edge { id: e.index().to_string(), source: s, target: t, key: data.key.clone(), weight, n_edges: 1 },
        );
    }

    Ok(input.graph.map(|_, name| name.clone(), |e, _| prepared[&e].clone()))
}

/// One greedy pass over the nodes in index order: every non-terminal node with
/// exactly one incoming and one outgoing edge is replaced by a single edge.
///
/// A node is left alone when the replacement would be a self-loop or when an
/// edge with the combined key already joins the new endpoints. Edges created
/// earlier in the pass may be contracted again.
pub fn contract_chains(graph: &mut WorkingGraph, terminals: &HashSet<NodeIndex>) -> ContractionMap {
    let mut contractions = ContractionMap::new();
    let candidates: Vec<NodeIndex> = graph.node_indices().collect();

    for node in candidates {
        if terminals.contains(&node) {
            continue;
        }
        let Some(incoming) = single_edge(graph, node, Direction::Incoming) else { continue };
        let Some(outgoing) = single_edge(graph, node, Direction::Outgoing) else { continue };
        if incoming.source == node || outgoing.target == node || incoming.source == outgoing.target {
            continue;
        }

        let key = if incoming.key == outgoing.key {
            incoming.key.clone()
        } else {
            format!("{}{}", incoming.key, outgoing.key)
        };
        let collides = graph
            .edges_directed(incoming.source, Direction::Outgoing)
            .any(|e| e.target() == outgoing.target && e.weight().key == key);
        if collides {
            continue;
        }

        let merged = Edge {
            id: format!("{}-{}", incoming.id, outgoing.id),
            source: incoming.source,
            target: outgoing.target,
            key,
            weight: incoming.weight + outgoing.weight,
            n_edges: incoming.n_edges + outgoing.n_edges,
        };
        graph.remove_node(node);
        graph.add_edge(merged.source, merged.target, merged.clone());
        contractions.insert(merged.id, Contraction { node, incoming, outgoing });
    }

    tracing::debug!(contracted = contractions.len(), "chain contraction finished");
    contractions
}

fn single_edge(graph: &WorkingGraph, node: NodeIndex, dir: Direction) -> Option<Edge> {
    let mut edges = graph.edges_directed(node, dir);
    let first = edges.next()?;
    if edges.next().is_some() {
        return None;
    }
    Some(first.weight().clone())
}
