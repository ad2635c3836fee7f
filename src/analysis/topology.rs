use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use std::collections::{BTreeMap, HashMap};

/// Splits `graph` into weakly connected components.
///
/// Each component is sorted by node index and components are ordered by their
/// smallest member, so the result does not depend on hash iteration order.
pub fn weakly_connected_components<N, E>(graph: &StableDiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut sets = UnionFind::<usize>::new(graph.node_bound());
    for edge in graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut groups: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
    for node in graph.node_indices() {
        groups.entry(sets.find(node.index())).or_default().push(node);
    }

    let mut components: Vec<Vec<NodeIndex>> = groups
        .into_values()
        .map(|mut c| {
            c.sort();
            c
        })
        .collect();
    components.sort_by_key(|c| c[0]);
    components
}

/// An empty graph counts as connected.
pub fn is_weakly_connected<N, E>(graph: &StableDiGraph<N, E>) -> bool {
    weakly_connected_components(graph).len() <= 1
}

/// Outcome of searching a partial subtree for a directed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleCheck {
    Acyclic,
    /// `node` closes the cycle: it was reached again while still on the DFS stack.
    CycleDetected { node: NodeIndex },
    /// The check could not be run on this input.
    Error(String),
}

impl CycleCheck {
    pub fn is_acyclic(&self) -> bool {
        matches!(self, CycleCheck::Acyclic)
    }
}

/// Looks for a directed cycle reachable from `root` in the graph spanned by `arcs`.
///
/// Returns `Error` when there are arcs but none of them touches `root`.
pub fn check_cycle(arcs: impl IntoIterator<Item = (NodeIndex, NodeIndex)>, root: NodeIndex) -> CycleCheck {
    let mut children: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    let mut touches_root = false;
    let mut arc_count = 0usize;
    for (s, t) in arcs {
        touches_root |= s == root || t == root;
        arc_count += 1;
        children.entry(s).or_default().push(t);
    }

    if arc_count == 0 {
        return CycleCheck::Acyclic;
    }
    if !touches_root {
        return CycleCheck::Error(format!("root {} is not part of the checked subgraph", root.index()));
    }

    let mut state: HashMap<NodeIndex, VisitState> = HashMap::new();
    match visit(root, &children, &mut state) {
        Some(node) => CycleCheck::CycleDetected { node },
        None => CycleCheck::Acyclic,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting, // Used for cycle detection
    Visited,
}

fn visit(
    node: NodeIndex,
    children: &HashMap<NodeIndex, Vec<NodeIndex>>,
    state: &mut HashMap<NodeIndex, VisitState>,
) -> Option<NodeIndex> {
    match state.get(&node) {
        Some(VisitState::Visited) => return None,
        Some(VisitState::Visiting) => return Some(node),
        None => {
            state.insert(node, VisitState::Visiting);
        }
    }

    for &child in children.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
        if let Some(hit) = visit(child, children, state) {
            return Some(hit);
        }
    }

    state.insert(node, VisitState::Visited);
    None
}
