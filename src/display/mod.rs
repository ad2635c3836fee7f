//! Human- and machine-readable renderings of solutions.
pub mod report;
pub mod trace;

pub use report::{EdgeReport, SolutionReport};
pub use trace::format_solution;
