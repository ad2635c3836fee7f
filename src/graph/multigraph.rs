//! multigraph.rs
//! The caller-facing directed multigraph: named nodes, keyed parallel edges.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Payload of an input edge. The `key` tells parallel edges apart.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub key: String,
    pub weight: f64,
}

/// A directed multigraph whose edges are identified by `(source, target, key)`.
///
/// Node indices are stable across removals, so every graph derived from this one
/// (the working graph, component subgraphs, output subgraphs) addresses nodes
/// with the same `NodeIndex`.
#[derive(Debug, Clone, Default)]
pub struct MultiDiGraph {
    pub(crate) graph: StableDiGraph<String, EdgeData>,
    index: HashMap<String, NodeIndex>,
}

impl MultiDiGraph {
    pub fn new() -> Self { Self::default() }

    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    /// Returns the index of `name`, inserting the node if it does not exist yet.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Adds the edge `source -> target` under `key`, creating missing endpoints.
    /// An existing edge with the same triple keeps its index and takes the new weight.
    pub fn add_edge(&mut self, source: &str, target: &str, key: &str, weight: f64) -> EdgeIndex {
        let s = self.add_node(source);
        let t = self.add_node(target);
        if let Some(e) = self.find_edge(s, t, key) {
            self.graph[e].weight = weight;
            return e;
        }
        self.graph.add_edge(s, t, EdgeData { key: key.to_string(), weight })
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node_name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index(name).map_or(false, |idx| self.graph.contains_node(idx))
    }

    pub fn has_edge(&self, source: &str, target: &str, key: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(s), Some(t)) => self.find_edge(s, t, key).is_some(),
            _ => false,
        }
    }

    /// Finds the parallel edge `s -> t` carrying `key`.
    pub fn find_edge(&self, s: NodeIndex, t: NodeIndex, key: &str) -> Option<EdgeIndex> {
        self.graph
            .edges_directed(s, Direction::Outgoing)
            .find(|e| e.target() == t && e.weight().key == key)
            .map(|e| e.id())
    }

    /// The stored weight of `(source, target, key)`.
    pub fn weight_of(&self, source: &str, target: &str, key: &str) -> Option<f64> {
        let e = self.find_edge(self.node_index(source)?, self.node_index(target)?, key)?;
        self.edge_data(e).map(|d| d.weight)
    }

    pub fn edge_endpoints(&self, e: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(e)
    }

    pub fn edge_data(&self, e: EdgeIndex) -> Option<&EdgeData> {
        self.graph.edge_weight(e)
    }

    /// Live node indices in index order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Live edge indices in index order.
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// All edges as `(source, target, data)` by node name, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeData)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (s, t) = self.graph.edge_endpoints(e)?;
            Some((self.graph[s].as_str(), self.graph[t].as_str(), &self.graph[e]))
        })
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Drops every edge whose index is not in `keep`.
    pub fn remove_edges_except(&mut self, keep: &HashSet<EdgeIndex>) {
        let doomed: Vec<EdgeIndex> = self.graph.edge_indices().filter(|e| !keep.contains(e)).collect();
        for e in doomed {
            self.graph.remove_edge(e);
        }
    }

    /// Drops nodes with neither incoming nor outgoing edges, repeating until none are left.
    pub fn remove_isolated_nodes(&mut self) {
        loop {
            let isolated: Vec<NodeIndex> = self
                .graph
                .node_indices()
                .filter(|&n| self.in_degree(n) == 0 && self.out_degree(n) == 0)
                .collect();
            if isolated.is_empty() {
                break;
            }
            for n in isolated {
                if let Some(name) = self.graph.remove_node(n) {
                    self.index.remove(&name);
                }
            }
        }
    }
}
