//! traversal.rs
//! Beam search from one terminal toward its ancestors.

use super::path::UpwardPath;
use crate::graph::{EdgeIndex, NodeIndex, WorkingGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// The best upward paths from every reachable ancestor down to one terminal.
///
/// Built once per terminal by `top_k_beamsearch` and read-only afterwards.
#[derive(Debug, Clone)]
pub struct UpwardTraversal {
    terminal: NodeIndex,
    /// Ancestor -> at most k paths, cheapest first.
    paths: HashMap<NodeIndex, Vec<UpwardPath>>,
}

impl UpwardTraversal {
    /// Walks the graph against edge direction from `terminal`, keeping the
    /// `top_k` lowest-weight acyclic paths per ancestor.
    ///
    /// Every edge is relaxed exactly once, when its target leaves the BFS queue.
    /// Paths that reach a node after it has been expanded are not propagated
    /// further up, and pruning a list to `top_k` may discard a path that would
    /// have been globally better. Both are accepted approximations.
    pub fn top_k_beamsearch(graph: &WorkingGraph, terminal: NodeIndex, top_k: usize) -> Self {
        let mut paths: HashMap<NodeIndex, Vec<UpwardPath>> = HashMap::new();
        paths.insert(terminal, vec![UpwardPath::empty(terminal)]);

        for e in reverse_edge_bfs(graph, terminal) {
            let edge = &graph[e];
            let extended: Vec<UpwardPath> = match paths.get(&edge.target) {
                Some(existing) => existing.iter().filter_map(|p| p.push(e, edge)).collect(),
                None => continue,
            };
            if extended.is_empty() {
                continue;
            }

            let candidates = paths.entry(edge.source).or_default();
            candidates.extend(extended);
            candidates.sort_by(|a, b| a.weight().total_cmp(&b.weight()));
            candidates.truncate(top_k);
        }

        Self { terminal, paths }
    }

    /// The terminal every stored path ends at.
    pub fn terminal(&self) -> NodeIndex {
        self.terminal
    }

    /// Nodes with at least one path down to the terminal, the terminal included.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.paths.keys().copied()
    }

    pub fn reaches(&self, node: NodeIndex) -> bool {
        self.paths.contains_key(&node)
    }

    pub fn paths_from(&self, ancestor: NodeIndex) -> &[UpwardPath] {
        self.paths.get(&ancestor).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Edge order of a breadth-first traversal over incoming edges starting at
/// `start`. Each edge appears once; the incoming edges of a node are listed by
/// ascending index.
fn reverse_edge_bfs(graph: &WorkingGraph, start: NodeIndex) -> Vec<EdgeIndex> {
    let mut order = Vec::new();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let mut incoming: Vec<EdgeIndex> = graph.edges_directed(node, Direction::Incoming).map(|e| e.id()).collect();
        incoming.sort();
        for e in incoming {
            order.push(e);
            let parent = graph[e].source;
            if seen.insert(parent) {
                queue.push_back(parent);
            }
        }
    }
    order
}
