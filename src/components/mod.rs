//! UI components.

pub mod neural_graph;
