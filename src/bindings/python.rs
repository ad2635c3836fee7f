//! Python bindings: a keyed multigraph class and the `solve` entry point.

use crate::config::SolverConfig;
use crate::graph::MultiDiGraph;
use crate::solver::{BankSolver, SolverError};
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;

create_exception!(_core, NoSingleRootError, PyException);
create_exception!(_core, DisconnectedGraphError, PyException);

fn to_py_err(e: SolverError) -> PyErr {
    match e {
        SolverError::NoSingleRoot { .. } => NoSingleRootError::new_err(e.to_string()),
        SolverError::DisconnectedGraph(_) => DisconnectedGraphError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

type PyEdge = (String, String, String);

#[pyclass(name = "_MultiDiGraph")]
#[derive(Debug, Clone, Default)]
pub struct PyMultiDiGraph {
    pub(crate) graph: MultiDiGraph,
}

#[pymethods]
impl PyMultiDiGraph {
    #[new]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str) {
        self.graph.add_node(name);
    }

    /// Re-adding an existing `(source, target, key)` replaces its weight.
    pub fn add_edge(&mut self, source: &str, target: &str, key: &str, weight: f64) -> PyResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(PyValueError::new_err(format!("Invalid weight {} on {}->{} [{}]", weight, source, target, key)));
        }
        self.graph.add_edge(source, target, key, weight);
        Ok(())
    }

    pub fn has_edge(&self, source: &str, target: &str, key: &str) -> bool {
        self.graph.has_edge(source, target, key)
    }

    pub fn edges(&self) -> Vec<(String, String, String, f64)> {
        self.graph
            .edges()
            .map(|(s, t, d)| (s.to_string(), t.to_string(), d.key.clone(), d.weight))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Returns `[(edges, weight)]` best first, each edge as `(source, target, key)`
/// of the input graph.
///
/// Edge weights are the ones stored with `add_edge`; a custom weight lookup is
/// only available through `BankSolver::with_weight_fn` on the Rust side.
#[pyfunction]
#[pyo3(signature = (
    graph,
    terminals,
    top_k_arborescences = 10,
    top_k_paths_per_node = 10,
    allow_chain_contraction = true,
    invalid_roots = None
))]
pub fn solve(
    graph: PyRef<'_, PyMultiDiGraph>,
    terminals: Vec<String>,
    top_k_arborescences: usize,
    top_k_paths_per_node: usize,
    allow_chain_contraction: bool,
    invalid_roots: Option<Vec<String>>,
) -> PyResult<Vec<(Vec<PyEdge>, f64)>> {
    let config = SolverConfig { top_k_arborescences, top_k_paths_per_node, allow_chain_contraction };
    let solver = BankSolver::new(&graph.graph, terminals, config).with_invalid_roots(invalid_roots.unwrap_or_default());
    let solutions = solver.solve().map_err(to_py_err)?;

    Ok(solutions
        .into_iter()
        .map(|(subgraph, solution)| {
            let edges = subgraph
                .edges()
                .map(|(s, t, d)| (s.to_string(), t.to_string(), d.key.clone()))
                .collect();
            (edges, solution.weight())
        })
        .collect())
}

/// The `_core` extension module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMultiDiGraph>()?;
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add("NoSingleRootError", m.py().get_type::<NoSingleRootError>())?;
    m.add("DisconnectedGraphError", m.py().get_type::<DisconnectedGraphError>())?;
    Ok(())
}
