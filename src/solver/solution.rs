//! solution.rs
//! Assembled candidate subtrees and their ranking.

use crate::graph::{Edge, NodeIndex};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

/// Orders solutions best-first.
pub type SolutionCmp<'a> = dyn Fn(&Solution, &Solution) -> Ordering + Send + Sync + 'a;

/// A candidate subtree (or, across components, a forest of subtrees).
///
/// Two solutions are equal when they hold the same set of edge ids; the edge
/// list and weight follow from that set.
#[derive(Debug, Clone)]
pub struct Solution {
    id: BTreeSet<String>,
    edges: Vec<Edge>,
    roots: Vec<NodeIndex>,
    weight: f64,
}

impl Solution {
    /// Edges with an id already present are ignored.
    pub fn new(roots: Vec<NodeIndex>, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut id = BTreeSet::new();
        let mut kept = Vec::new();
        for edge in edges {
            if id.insert(edge.id.clone()) {
                kept.push(edge);
            }
        }
        let weight = kept.iter().map(|e| e.weight).sum::<f64>();
        Self { id, edges: kept, roots, weight }
    }

    /// Joins two solutions into a forest. Used to combine disjoint components.
    pub fn union(&self, other: &Solution) -> Solution {
        let mut roots = self.roots.clone();
        roots.extend(other.roots.iter().filter(|r| !self.roots.contains(r)));
        Solution::new(roots, self.edges.iter().chain(other.edges.iter()).cloned())
    }

    /// The frozen set of edge ids identifying this solution.
    pub fn id(&self) -> &BTreeSet<String> { &self.id }
    pub fn edges(&self) -> &[Edge] { &self.edges }
    /// One root per solved component.
    pub fn roots(&self) -> &[NodeIndex] { &self.roots }
    pub fn weight(&self) -> f64 { self.weight }
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    pub fn nodes(&self) -> BTreeSet<NodeIndex> {
        self.edges.iter().flat_map(|e| [e.source, e.target]).chain(self.roots.iter().copied()).collect()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Solution {}

impl Hash for Solution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The default ordering: ascending total weight.
pub fn by_weight(a: &Solution, b: &Solution) -> Ordering {
    a.weight.total_cmp(&b.weight)
}

/// Drops duplicate solutions (first occurrence wins), sorts the rest with `cmp`
/// and keeps the best `top_k`. The sort is stable, so ties keep discovery order.
pub fn rank(solutions: Vec<Solution>, cmp: &SolutionCmp<'_>, top_k: usize) -> Vec<Solution> {
    let mut seen: HashSet<BTreeSet<String>> = HashSet::with_capacity(solutions.len());
    let mut unique: Vec<Solution> = solutions.into_iter().filter(|s| seen.insert(s.id.clone())).collect();
    unique.sort_by(|a, b| cmp(a, b));
    unique.truncate(top_k);
    unique
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
    fn test_identity_ignores_edge_order() {
        let a = Solution::new(vec![NodeIndex::new(0)], vec![edge("1", 0, 1, 1.0), edge("2", 1, 2, 2.0)]);
        let b = Solution::new(vec![NodeIndex::new(0)], vec![edge("2", 1, 2, 2.0), edge("1", 0, 1, 1.0)]);
        assert_eq!(a, b);
        assert_eq!(a.weight(), 3.0);
    }

    #[test]
    fn test_rank_dedupes_sorts_and_truncates() {
        let r = vec![NodeIndex::new(0)];
        let heavy = Solution::new(r.clone(), vec![edge("1", 0, 1, 5.0)]);
        let light = Solution::new(r.clone(), vec![edge("2", 0, 1, 1.0)]);
        let mid = Solution::new(r.clone(), vec![edge("3", 0, 1, 3.0)]);

        let ranked = rank(vec![heavy.clone(), light.clone(), heavy, mid.clone()], &by_weight, 2);

        assert_eq!(ranked, vec![light, mid]);
    }

    #[test]
    fn test_custom_comparator_reverses_order() {
        let r = vec![NodeIndex::new(0)];
        let a = Solution::new(r.clone(), vec![edge("1", 0, 1, 1.0)]);
        let b = Solution::new(r, vec![edge("2", 0, 1, 2.0)]);
        let heaviest_first = |x: &Solution, y: &Solution| by_weight(y, x);

        let ranked = rank(vec![a.clone(), b.clone()], &heaviest_first, 10);
        assert_eq!(ranked, vec![b, a]);
    }

    #[test]
    fn test_union_sums_disjoint_weights() {
        let left = Solution::new(vec![NodeIndex::new(0)], vec![edge("1", 0, 1, 1.5)]);
        let right = Solution::new(vec![NodeIndex::new(5)], vec![edge("9", 5, 6, 2.0)]);

        let forest = left.union(&right);

        assert_eq!(forest.weight(), 3.5);
        assert_eq!(forest.roots(), &[NodeIndex::new(0), NodeIndex::new(5)]);
        assert_eq!(forest.id().len(), 2);
    }
}
