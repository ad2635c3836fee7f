//! Approximate top-k Steiner arborescences over keyed directed multigraphs.
//!
//! Given a graph and a set of terminal nodes, [`BankSolver`] searches for
//! low-weight subtrees in which a single root reaches every terminal. The
//! search is a beam search over upward paths, so results are good rather than
//! provably optimal.

pub mod analysis;
pub mod batch;
pub mod bindings;
pub mod config;
pub mod display;
pub mod graph;
pub mod solver;

pub use batch::{solve_batch, solve_batch_with_threads, Problem};
pub use config::{ConfigError, SolverConfig};
pub use graph::{EdgeData, MultiDiGraph};
pub use solver::{BankSolver, Solution, SolverError};
