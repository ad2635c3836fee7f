//! Parallel solving of independent problems.

use crate::config::SolverConfig;
use crate::graph::MultiDiGraph;
use crate::solver::{BankSolver, Solution, SolverError};
use rayon::prelude::*;

pub type BatchResult = Result<Vec<(MultiDiGraph, Solution)>, SolverError>;

/// One self-contained solver input. Weights are the ones stored on the graph.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub graph: MultiDiGraph,
    pub terminals: Vec<String>,
    pub invalid_roots: Vec<String>,
}

impl Problem {
    pub fn new<I, S>(graph: MultiDiGraph, terminals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            graph,
            terminals: terminals.into_iter().map(Into::into).collect(),
            invalid_roots: Vec::new(),
        }
    }

    pub fn solve(&self, config: &SolverConfig) -> BatchResult {
        BankSolver::new(&self.graph, self.terminals.iter().cloned(), config.clone())
            .with_invalid_roots(self.invalid_roots.iter().cloned())
            .solve()
    }
}

/// Solves every problem on the global rayon pool. Results are in input order.
pub fn solve_batch(problems: &[Problem], config: &SolverConfig) -> Vec<BatchResult> {
    tracing::debug!(problems = problems.len(), "solving batch");
    problems.par_iter().map(|p| p.solve(config)).collect()
}

/// Like [`solve_batch`] but on a dedicated pool of `n_threads` workers.
pub fn solve_batch_with_threads(
    problems: &[Problem],
    config: &SolverConfig,
    n_threads: usize,
) -> Result<Vec<BatchResult>, SolverError> {
    if n_threads == 0 {
        return Err(SolverError::InvalidConfig("n_threads must be at least 1".into()));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|e| SolverError::InvalidConfig(e.to_string()))?;
    Ok(pool.install(|| solve_batch(problems, config)))
}
