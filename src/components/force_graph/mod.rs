//! Force-directed graph visualization component.
//!
//! Renders the shared dependency graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Neighborhood highlighting on hover, with particles along lit links
//! - Click selection that recolors the graph itself
//! - Configurable theming and visual scaling
//!
//! # Example
//!
//! ```ignore
//! use depgraph_view::components::context::provide_graph_context;
//! use depgraph_view::components::force_graph::ForceGraphCanvas;
//!
//! let graph = provide_graph_context(ViewerConfig::default());
//! graph.load_json(r#"{"app": ["core"]}"#)?;
//!
//! view! { <ForceGraphCanvas fullscreen=true /> }
//! ```

mod component;
mod particles;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
