//! path.rs
//! Acyclic upward paths grown backwards from a terminal.

use crate::graph::{Edge, EdgeIndex, NodeIndex};
use smallvec::{smallvec, SmallVec};

/// A path from some ancestor down to a terminal, discovered while walking
/// against edge direction.
///
/// Paths are values: `push` returns an extended copy and leaves `self` intact,
/// so one path can seed many branches of the beam.
#[derive(Debug, Clone, PartialEq)]
pub struct UpwardPath {
    // Nodes on the path, terminal first. No node appears twice.
    visited: SmallVec<[NodeIndex; 8]>,
    // Edges ordered from the ancestor toward the terminal.
    edges: SmallVec<[EdgeIndex; 8]>,
    weight: f64,
}

impl UpwardPath {
    /// The zero-length path sitting on `terminal`.
    pub fn empty(terminal: NodeIndex) -> Self {
        Self { visited: smallvec![terminal], edges: SmallVec::new(), weight: 0.0 }
    }

    /// Extends the path upward by prepending `edge`, whose target must be the
    /// current head. Returns `None` if the edge's source is already on the path.
    pub fn push(&self, edge_idx: EdgeIndex, edge: &Edge) -> Option<Self> {
        debug_assert_eq!(edge.target, self.head(), "edge must end at the path head");
        if self.contains(edge.source) {
            return None;
        }

        let mut visited = self.visited.clone();
        visited.push(edge.source);
        let mut edges = SmallVec::with_capacity(self.edges.len() + 1);
        edges.push(edge_idx);
        edges.extend_from_slice(&self.edges);

        Some(Self { visited, edges, weight: self.weight + edge.weight })
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.visited.contains(&node)
    }

    /// The ancestor end of the path.
    pub fn head(&self) -> NodeIndex {
        self.visited[self.visited.len() - 1]
    }

    pub fn edges(&self) -> &[EdgeIndex] { &self.edges }
    pub fn weight(&self) -> f64 { self.weight }
    pub fn len(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: &str, s: usize, t: usize, w: f64) -> Edge {
        Edge {
            id: id.into(),
            source: NodeIndex::new(s),
            target: NodeIndex::new(t),
            key: "k".into(),
            weight: w,
            n_edges: 1,
        }
    }

    #[test]
    fn test_push_prepends_and_keeps_original() {
        let start = UpwardPath::empty(NodeIndex::new(0));
        let one = start.push(EdgeIndex::new(7), &edge("7", 1, 0, 2.0)).unwrap();
        let two = one.push(EdgeIndex::new(3), &edge("3", 2, 1, 0.5)).unwrap();

        assert!(start.is_empty());
        assert_eq!(one.edges(), &[EdgeIndex::new(7)]);
        assert_eq!(two.edges(), &[EdgeIndex::new(3), EdgeIndex::new(7)]);
        assert_eq!(two.weight(), 2.5);
        assert_eq!(two.head(), NodeIndex::new(2));
    }

    #[test]
    fn test_push_refuses_to_revisit() {
        let start = UpwardPath::empty(NodeIndex::new(0));
        let one = start.push(EdgeIndex::new(0), &edge("0", 1, 0, 1.0)).unwrap();
        assert!(one.push(EdgeIndex::new(1), &edge("1", 0, 1, 1.0)).is_none());
    }
}
