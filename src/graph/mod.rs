//! Defines the graph structures the solver reads and produces.
pub mod edge;
pub mod multigraph;

// Re-export key types for convenient access
pub use edge::{Edge, WorkingGraph};
pub use multigraph::{EdgeData, MultiDiGraph};
pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
