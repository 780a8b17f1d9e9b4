//! UI components.

pub mod context;
pub mod controls;
pub mod force_graph;
pub mod input;
