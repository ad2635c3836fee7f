//! Structural analysis of graphs: connectivity and cycle checks.
pub mod topology;

pub use topology::{check_cycle, is_weakly_connected, weakly_connected_components, CycleCheck};
