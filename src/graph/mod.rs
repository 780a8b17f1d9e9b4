//! Graph model, loading and the projections the UI consumes.
//!
//! Nothing in here touches the DOM, so the whole module is unit tested
//! natively.

pub mod dot;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod selection;
pub mod store;
pub mod view;

pub use highlight::{HighlightSet, Ring};
pub use loader::{Adjacency, build_graph, load_graph};
pub use model::{DependencyGraph, EdgeAttrs, NodeAttrs};
pub use selection::{has_selection, reset_selection, select_node};
pub use store::{GraphStore, Version};
pub use view::{DerivedView, ViewLink, ViewNode};
