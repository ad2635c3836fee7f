use crate::graph::{EdgeData, EdgeIndex, MultiDiGraph, NodeIndex};
use crate::solver::Solution;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt::Write;

/// Renders `subgraph` (the expanded output of `solution`) as an indented tree
/// per root. Nodes reached twice are printed once and referenced afterwards.
pub fn format_solution(subgraph: &MultiDiGraph, solution: &Solution) -> String {
    let mut tracer = Tracer {
        graph: subgraph,
        visited_at_level: HashMap::new(),
        output: String::new(),
    };

    let _ = writeln!(
        tracer.output,
        "SOLUTION weight={:.3} edges={} roots={}",
        solution.weight(),
        subgraph.edge_count(),
        solution.roots().len()
    );
    let _ = writeln!(tracer.output, "--------------------------------------------------");
    for &root in solution.roots() {
        tracer.trace_node(root, 1, "", None);
    }
    tracer.output
}

struct Tracer<'a> {
    graph: &'a MultiDiGraph,
    visited_at_level: HashMap<NodeIndex, usize>,
    output: String,
}

impl<'a> Tracer<'a> {
    fn trace_node(&mut self, node: NodeIndex, level: usize, prefix: &str, via: Option<&EdgeData>) {
        let graph = self.graph;
        let name = graph.node_name(node).unwrap_or("?");
        let via_str = via.map(|d| format!(" <-[{} {:.3}]", d.key, d.weight)).unwrap_or_default();

        if let Some(&first_seen) = self.visited_at_level.get(&node) {
            let _ = writeln!(self.output, "{}{}{} -> (Ref to L{})", prefix, name, via_str, first_seen);
            return;
        }
        self.visited_at_level.insert(node, level);
        let _ = writeln!(self.output, "{}[L{}] {}{}", prefix, level, name, via_str);

        let mut children: Vec<(EdgeIndex, NodeIndex)> = graph
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        children.sort();

        let stem = self.build_child_stem(prefix);
        for (i, &(edge, child)) in children.iter().enumerate() {
            let is_last_child = i == children.len() - 1;
            let connector = if is_last_child { "`--" } else { "|--" };
            let full_prefix = format!("{}{}", stem, connector);
            self.trace_node(child, level + 1, &full_prefix, graph.edge_data(edge));
        }
    }

    fn build_child_stem(&self, current_prefix: &str) -> String {
        current_prefix.replace("`--", "   ").replace("|--", "|  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::solver::BankSolver;

    #[test]
    fn test_trace_shows_tree_shape() {
        let mut g = MultiDiGraph::new();
        g.add_edge("R", "A", "p", 1.0);
        g.add_edge("R", "B", "q", 2.0);

        let out = BankSolver::new(&g, ["A", "B"], SolverConfig::default()).solve().unwrap();
        let (subgraph, solution) = &out[0];
        let text = format_solution(subgraph, solution);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SOLUTION weight=3.000 edges=2 roots=1");
        assert_eq!(lines[2], "[L1] R");
        assert_eq!(lines[3], "|--[L2] A <-[p 1.000]");
        assert_eq!(lines[4], "`--[L2] B <-[q 2.000]");
    }

    #[test]
    fn test_shared_node_is_referenced() {
        let mut g = MultiDiGraph::new();
        g.add_edge("R", "A", "p", 1.0);
        g.add_edge("R", "B", "p", 1.0);
        g.add_edge("A", "T", "p", 1.0);
        g.add_edge("B", "T", "p", 1.0);
        let r = g.node_index("R").unwrap();
        let edges: Vec<_> = g.edge_indices().collect();
        let working = crate::solver::preprocess::build_working_graph(&g, |_, _, _| 1.0).unwrap();
        let solution = Solution::new(vec![r], edges.iter().map(|&e| working[e].clone()));

        let text = format_solution(&g, &solution);
        assert!(text.contains("T <-[p 1.000] -> (Ref to L3)"), "Trace:\n{}", text);
    }
}
