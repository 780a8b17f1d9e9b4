//! Click selection: recolors graph attributes around one node.
//!
//! Unlike hover highlighting this writes to the graph, so callers run it
//! through [`GraphStore::update`](super::store::GraphStore::update).

use super::model::{DependencyGraph, EdgeAttrs};
use crate::config::ColorConfig;

/// Edge kind given to the selected node's outgoing edges.
pub const OUTGOING_KIND: &str = "fast";
const SELECTED_EDGE_SIZE: f64 = 3.0;

/// Marks outgoing edges of `node` with `colors.outgoing` and incoming ones
/// with `colors.incoming`. Endpoints are flagged highlighted: sources get
/// `colors.source_node`, targets `colors.target_node`.
///
/// Returns `false` and leaves the graph as-is when `node` is `None` or
/// unknown.
pub fn select_node(graph: &mut DependencyGraph, node: Option<&str>, colors: &ColorConfig) -> bool {
	let Some(id) = node.filter(|id| graph.contains_node(id)) else {
		return false;
	};
	reset_selection(graph);

	for edge in graph.edge_indices_of(id) {
		let Some((src, tgt)) = graph.graph.edge_endpoints(edge) else {
			continue;
		};
		let outgoing = graph.graph[src].id == id;

		let attrs = &mut graph.graph[edge];
		if outgoing {
			attrs.color = Some(colors.outgoing.clone());
			attrs.kind = Some(OUTGOING_KIND.to_string());
		} else {
			attrs.color = Some(colors.incoming.clone());
		}
		attrs.size = SELECTED_EDGE_SIZE;
		attrs.highlighted = true;

		let target = &mut graph.graph[tgt];
		target.highlighted = true;
		target.color = Some(colors.target_node.clone());

		let source = &mut graph.graph[src];
		source.highlighted = true;
		source.color = Some(colors.source_node.clone());
	}
	true
}

/// Whether any node or edge currently carries the selection flag.
pub fn has_selection(graph: &DependencyGraph) -> bool {
	graph.nodes().any(|n| n.highlighted) || graph.edges().any(|e| e.attrs.highlighted)
}

/// Puts every node and edge back the way the loader left it.
pub fn reset_selection(graph: &mut DependencyGraph) {
	let nodes: Vec<_> = graph.graph.node_indices().collect();
	for idx in nodes {
		let node = &mut graph.graph[idx];
		node.color = None;
		node.highlighted = false;
	}

	let edges: Vec<_> = graph.graph.edge_indices().collect();
	for idx in edges {
		let edge = &mut graph.graph[idx];
		*edge = EdgeAttrs::new(std::mem::take(&mut edge.id));
	}
}
