//! Approximate top-k Steiner arborescence search ("bank solver").
//!
//! Pipeline: `preprocess` builds the weighted working graph and contracts
//! chains, `traversal` runs one upward beam search per terminal, `merge` joins
//! the per-terminal paths under common roots, `components` handles graphs that
//! are not weakly connected, and `postprocess` maps results back onto the input.
pub mod bank;
pub mod components;
pub mod error;
pub mod merge;
pub mod path;
pub mod postprocess;
pub mod preprocess;
pub mod solution;
pub mod traversal;

pub use bank::{BankSolver, WeightFn};
pub use error::SolverError;
pub use path::UpwardPath;
pub use solution::{by_weight, Solution, SolutionCmp};
pub use traversal::UpwardTraversal;
