//! Labeled directed multigraph backing the viewer.
//!
//! Edges point from **dependent to dependency**: `a -> b` means `a` depends
//! on `b`. Nodes are never removed, so iteration follows insertion order.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

/// Attributes carried by each node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeAttrs {
	/// Unique node id.
	pub id: String,
	/// Initial layout position; the simulation owns live positions.
	pub x: f64,
	/// See `x`.
	pub y: f64,
	/// Starts at the loader default, +1 per outgoing edge.
	pub size: f64,
	/// Hidden nodes and their edges are left out of the view.
	pub hidden: bool,
	/// Explicit fill override. `None` falls back to group or default color.
	pub color: Option<String>,
	/// Part of the click selection.
	pub highlighted: bool,
	/// Cluster name used for palette coloring.
	pub group: Option<String>,
}

impl NodeAttrs {
	/// Visible, uncolored node.
	pub fn new(id: impl Into<String>, x: f64, y: f64, size: f64) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			size,
			hidden: false,
			color: None,
			highlighted: false,
			group: None,
		}
	}
}

/// Width of an edge nobody has selected.
pub const DEFAULT_EDGE_SIZE: f64 = 1.0;

/// Attributes carried by each edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeAttrs {
	/// Edge id, unique within the graph.
	pub id: String,
	/// Stroke override.
	pub color: Option<String>,
	/// Width multiplier.
	pub size: f64,
	/// Render hint for the edge shape (the selection marks outgoing edges).
	pub kind: Option<String>,
	/// Part of the click selection.
	pub highlighted: bool,
}

impl EdgeAttrs {
	/// Attributes of a freshly loaded edge: no color override, unit width.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			color: None,
			size: DEFAULT_EDGE_SIZE,
			kind: None,
			highlighted: false,
		}
	}
}

/// Borrowed view of one edge with its endpoint ids resolved.
#[derive(Clone, Copy, Debug)]
pub struct EdgeEntry<'a> {
	/// Dependent node id.
	pub source: &'a str,
	/// Dependency node id.
	pub target: &'a str,
	/// The edge's attributes.
	pub attrs: &'a EdgeAttrs,
}

/// Dependency graph keyed by string node ids.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
	pub(super) graph: StableDiGraph<NodeAttrs, EdgeAttrs>,
	pub(super) index: HashMap<String, NodeIndex>,
	next_edge: usize,
}

impl DependencyGraph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of nodes, hidden ones included.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Number of edges, parallel edges counted separately.
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	/// Whether a node with this id exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Ensures a node exists, building its attributes with `make` only when
	/// it is new. Existing attributes are left untouched.
	pub fn merge_node(&mut self, id: &str, make: impl FnOnce(usize) -> NodeAttrs) -> NodeIndex {
		if let Some(&idx) = self.index.get(id) {
			return idx;
		}
		let idx = self.graph.add_node(make(self.graph.node_count()));
		self.index.insert(id.to_string(), idx);
		idx
	}

	/// Adds a directed edge and returns its id, or `None` when an endpoint
	/// is unknown. Parallel edges are allowed.
	pub fn add_edge(&mut self, source: &str, target: &str) -> Option<String> {
		let (&src, &tgt) = (self.index.get(source)?, self.index.get(target)?);
		let id = format!("e{}", self.next_edge);
		self.next_edge += 1;
		self.graph.add_edge(
			src,
			tgt,
			EdgeAttrs::new(id.clone()),
		);
		Some(id)
	}

	/// Node attributes by id.
	pub fn node(&self, id: &str) -> Option<&NodeAttrs> {
		self.index.get(id).map(|&idx| &self.graph[idx])
	}

	/// Mutable node attributes by id.
	pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeAttrs> {
		let idx = *self.index.get(id)?;
		self.graph.node_weight_mut(idx)
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &NodeAttrs> {
		self.graph.node_indices().map(move |idx| &self.graph[idx])
	}

	/// Node ids in insertion order.
	pub fn node_ids(&self) -> impl Iterator<Item = &str> {
		self.nodes().map(|n| n.id.as_str())
	}

	/// All edges in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = EdgeEntry<'_>> {
		self.graph
			.edge_indices()
			.filter_map(move |e| self.entry(e))
	}

	/// Incoming and outgoing edges of `id`. Self-loops appear once.
	pub fn edges_of(&self, id: &str) -> Vec<EdgeEntry<'_>> {
		self.edge_indices_of(id)
			.into_iter()
			.filter_map(|e| self.entry(e))
			.collect()
	}

	/// Distinct nodes adjacent to `id` in either direction.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let Some(&idx) = self.index.get(id) else {
			return Vec::new();
		};
		let mut seen = HashSet::new();
		self.graph
			.neighbors_undirected(idx)
			.filter(|n| seen.insert(*n))
			.map(|n| self.graph[n].id.as_str())
			.collect()
	}

	/// Number of edges leaving `id`; 0 for unknown ids.
	pub fn out_degree(&self, id: &str) -> usize {
		self.index
			.get(id)
			.map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
			.unwrap_or(0)
	}

	/// Sets `hidden` on one node. Returns `false` for unknown ids.
	pub fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
		match self.node_mut(id) {
			Some(node) => {
				node.hidden = hidden;
				true
			}
			None => false,
		}
	}

	/// Hides or shows every node.
	pub fn set_all_hidden(&mut self, hidden: bool) {
		let indices: Vec<_> = self.graph.node_indices().collect();
		for idx in indices {
			self.graph[idx].hidden = hidden;
		}
	}

	/// Number of hidden nodes.
	pub fn hidden_count(&self) -> usize {
		self.nodes().filter(|n| n.hidden).count()
	}

	pub(super) fn edge_indices_of(&self, id: &str) -> Vec<EdgeIndex> {
		let Some(&idx) = self.index.get(id) else {
			return Vec::new();
		};
		let mut seen = HashSet::new();
		self.graph
			.edges_directed(idx, Direction::Outgoing)
			.chain(self.graph.edges_directed(idx, Direction::Incoming))
			.map(|e| e.id())
			.filter(|e| seen.insert(*e))
			.collect()
	}

	fn entry(&self, edge: EdgeIndex) -> Option<EdgeEntry<'_>> {
		let (src, tgt) = self.graph.edge_endpoints(edge)?;
		Some(EdgeEntry {
			source: &self.graph[src].id,
			target: &self.graph[tgt].id,
			attrs: &self.graph[edge],
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
		let mut g = DependencyGraph::new();
		for (s, t) in edges {
			g.merge_node(s, |_| NodeAttrs::new(*s, 0.0, 0.0, 5.0));
			g.merge_node(t, |_| NodeAttrs::new(*t, 0.0, 0.0, 5.0));
			g.add_edge(s, t);
		}
		g
	}

	#[test]
	fn merge_node_keeps_existing_attributes() {
		let mut g = DependencyGraph::new();
		g.merge_node("a", |_| NodeAttrs::new("a", 1.0, 2.0, 9.0));
		g.merge_node("a", |_| NodeAttrs::new("a", 0.0, 0.0, 5.0));
		assert_eq!(g.node_count(), 1);
		assert_eq!(g.node("a").map(|n| n.size), Some(9.0));
	}

	#[test]
	fn merge_node_passes_insertion_index() {
		let mut g = DependencyGraph::new();
		g.merge_node("a", |i| NodeAttrs::new("a", i as f64, 0.0, 5.0));
		g.merge_node("b", |i| NodeAttrs::new("b", i as f64, 0.0, 5.0));
		assert_eq!(g.node("b").map(|n| n.x), Some(1.0));
	}

	#[test]
	fn add_edge_requires_both_endpoints() {
		let mut g = graph_of(&[]);
		g.merge_node("a", |_| NodeAttrs::new("a", 0.0, 0.0, 5.0));
		assert_eq!(g.add_edge("a", "missing"), None);
		assert_eq!(g.edge_count(), 0);
	}

	#[test]
	fn edge_ids_are_unique_for_parallel_edges() {
		let g = graph_of(&[("a", "b"), ("a", "b")]);
		let ids: Vec<_> = g.edges().map(|e| e.attrs.id.clone()).collect();
		assert_eq!(ids, vec!["e0", "e1"]);
	}

	#[test]
	fn edges_of_covers_both_directions() {
		let g = graph_of(&[("a", "b"), ("c", "a"), ("b", "c")]);
		let mut touching: Vec<_> = g
			.edges_of("a")
			.iter()
			.map(|e| (e.source, e.target))
			.collect();
		touching.sort();
		assert_eq!(touching, vec![("a", "b"), ("c", "a")]);
	}

	#[test]
	fn self_loop_counted_once() {
		let g = graph_of(&[("a", "a")]);
		assert_eq!(g.edges_of("a").len(), 1);
		assert_eq!(g.neighbors("a"), vec!["a"]);
	}

	#[test]
	fn neighbors_are_distinct() {
		let g = graph_of(&[("a", "b"), ("a", "b"), ("b", "a")]);
		assert_eq!(g.neighbors("a"), vec!["b"]);
		assert!(g.neighbors("zzz").is_empty());
	}

	#[test]
	fn hidden_toggles() {
		let mut g = graph_of(&[("a", "b")]);
		assert!(g.set_hidden("a", true));
		assert!(!g.set_hidden("nope", true));
		assert_eq!(g.hidden_count(), 1);
		g.set_all_hidden(false);
		assert_eq!(g.hidden_count(), 0);
	}

	#[test]
	fn nodes_iterate_in_insertion_order() {
		let g = graph_of(&[("z", "y"), ("a", "y")]);
		assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["z", "y", "a"]);
	}
}
