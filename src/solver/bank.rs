//! bank.rs
//! The top-k Steiner arborescence solver: preprocess, beam search, merge,
//! split/recombine and postprocess.

use super::components::{combine, split_components};
use super::error::SolverError;
use super::merge::{candidate_roots, merge_traversals};
use super::postprocess::expand_to_original;
use super::preprocess::{build_working_graph, contract_chains, ContractionMap};
use super::solution::{by_weight, Solution, SolutionCmp};
use super::traversal::UpwardTraversal;
use crate::analysis::topology::is_weakly_connected;
use crate::config::SolverConfig;
use crate::graph::{MultiDiGraph, NodeIndex, WorkingGraph};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Looks up the weight of `(source, target, key)`.
pub type WeightFn<'a> = dyn Fn(&str, &str, &str) -> f64 + Send + Sync + 'a;

/// Finds up to `top_k_arborescences` low-weight subtrees of `graph` that
/// connect a common root to every terminal.
///
/// Each call to `solve` is independent and single-threaded; nothing is cached
/// between calls.
pub struct BankSolver<'a> {
    graph: &'a MultiDiGraph,
    // Sorted by name: terminals are merged in this order.
    terminals: BTreeSet<String>,
    invalid_roots: BTreeSet<String>,
    config: SolverConfig,
    weight_fn: Box<WeightFn<'a>>,
    cmp: Box<SolutionCmp<'a>>,
}

impl<'a> BankSolver<'a> {
    /// Weights default to the ones stored on the graph's edges; the ranking
    /// defaults to ascending total weight.
    pub fn new<I, S>(graph: &'a MultiDiGraph, terminals: I, config: SolverConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            graph,
            terminals: terminals.into_iter().map(Into::into).collect(),
            invalid_roots: BTreeSet::new(),
            config,
            weight_fn: Box::new(move |s: &str, t: &str, k: &str| graph.weight_of(s, t, k).unwrap_or(f64::NAN)),
            cmp: Box::new(by_weight),
        }
    }

    pub fn with_weight_fn(mut self, weight_fn: impl Fn(&str, &str, &str) -> f64 + Send + Sync + 'a) -> Self {
        self.weight_fn = Box::new(weight_fn);
        self
    }

    pub fn with_comparator(
        mut self,
        cmp: impl Fn(&Solution, &Solution) -> Ordering + Send + Sync + 'a,
    ) -> Self {
        self.cmp = Box::new(cmp);
        self
    }

    /// Nodes that may never serve as a root. Unknown names are ignored.
    pub fn with_invalid_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns `(subgraph of the input graph, solution)` pairs, best first.
    pub fn solve(&self) -> Result<Vec<(MultiDiGraph, Solution)>, SolverError> {
        self.config.validate()?;
        if self.terminals.is_empty() {
            return Err(SolverError::NoTerminals);
        }
        let terminals = self
            .terminals
            .iter()
            .map(|name| self.graph.node_index(name).ok_or_else(|| SolverError::UnknownTerminal(name.clone())))
            .collect::<Result<Vec<NodeIndex>, _>>()?;
        let invalid_roots: HashSet<NodeIndex> =
            self.invalid_roots.iter().filter_map(|name| self.graph.node_index(name)).collect();

        let mut working = build_working_graph(self.graph, |s, t, k| (self.weight_fn)(s, t, k))?;
        let contractions = if self.config.allow_chain_contraction {
            contract_chains(&mut working, &terminals.iter().copied().collect())
        } else {
            ContractionMap::new()
        };
        tracing::debug!(
            nodes = working.node_count(),
            edges = working.edge_count(),
            terminals = terminals.len(),
            "working graph ready"
        );

        let solutions = if is_weakly_connected(&working) {
            self.solve_connected(&working, &terminals, &invalid_roots)?
        } else {
            self.solve_split(&working, &terminals, &invalid_roots)?
        };

        solutions
            .into_iter()
            .map(|sol| Ok((expand_to_original(self.graph, &contractions, &sol)?, sol)))
            .collect()
    }

    /// Solves one weakly connected graph; `terminals` are in name order.
    fn solve_connected(
        &self,
        graph: &WorkingGraph,
        terminals: &[NodeIndex],
        invalid_roots: &HashSet<NodeIndex>,
    ) -> Result<Vec<Solution>, SolverError> {
        if terminals.is_empty() {
            return Err(SolverError::DisconnectedGraph("component holds no terminal nodes".into()));
        }

        let traversals: Vec<UpwardTraversal> = terminals
            .iter()
            .map(|&t| UpwardTraversal::top_k_beamsearch(graph, t, self.config.top_k_paths_per_node))
            .collect();
        let roots = candidate_roots(graph, &traversals, invalid_roots);
        if roots.is_empty() {
            return Err(SolverError::NoSingleRoot { terminals: self.names(graph, terminals) });
        }

        merge_traversals(graph, &traversals, &roots, self.config.top_k_arborescences, self.cmp.as_ref())
    }

    /// Solves every component with enough terminals and combines the results
    /// into forests, one component at a time.
    fn solve_split(
        &self,
        graph: &WorkingGraph,
        terminals: &[NodeIndex],
        invalid_roots: &HashSet<NodeIndex>,
    ) -> Result<Vec<Solution>, SolverError> {
        let components = split_components(graph, terminals);
        if components.is_empty() {
            return Err(SolverError::DisconnectedGraph(format!(
                "no weakly connected component holds two of the terminals {:?}",
                self.names(graph, terminals)
            )));
        }

        let mut best: Option<Vec<Solution>> = None;
        for component in &components {
            let solutions = self.solve_connected(&component.graph, &component.terminals, invalid_roots)?;
            if solutions.is_empty() {
                return Err(SolverError::NoSingleRoot { terminals: self.names(graph, &component.terminals) });
            }
            best = Some(match best {
                None => solutions,
                Some(prev) => combine(&prev, &solutions, self.cmp.as_ref(), self.config.top_k_arborescences),
            });
        }
        Ok(best.unwrap_or_default())
    }

    fn names(&self, graph: &WorkingGraph, nodes: &[NodeIndex]) -> Vec<String> {
        nodes.iter().filter_map(|&n| graph.node_weight(n).cloned()).collect()
    }
}
