//! Transient hover highlighting.
//!
//! A [`HighlightSet`] lives inside the render surface and is rebuilt from
//! scratch on every hover event. It never touches graph attributes.

use std::collections::HashSet;

use super::model::DependencyGraph;
use super::view::{DerivedView, ViewLink};

/// Ring style for a node given the current highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ring {
	/// The node under the pointer.
	Hovered,
	/// Part of the highlighted neighborhood or an endpoint of a hovered link.
	Neighbor,
	/// Everything else.
	Idle,
}

/// Nodes and links lit by the current hover. Empty when nothing is hovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightSet {
	hovered: Option<String>,
	nodes: HashSet<String>,
	links: HashSet<String>,
}

impl HighlightSet {
	/// Empties both sets.
	pub fn clear(&mut self) {
		self.hovered = None;
		self.nodes.clear();
		self.links.clear();
	}

	/// Highlights `node`, every visible edge touching it and every visible
	/// neighbor. `None`, an unknown node or a hidden node clears the sets.
	pub fn hover_node(
		&mut self,
		node: Option<&str>,
		graph: Option<&DependencyGraph>,
		view: &DerivedView,
	) {
		self.clear();
		let (Some(id), Some(graph)) = (node, graph) else {
			return;
		};
		if view.node(id).is_none() {
			return;
		}

		self.hovered = Some(id.to_string());
		self.nodes.insert(id.to_string());

		for edge in graph.edges_of(id) {
			if view.link(&edge.attrs.id).is_some() {
				self.links.insert(edge.attrs.id.clone());
			}
		}
		for neighbor in graph.neighbors(id) {
			if view.node(neighbor).is_some() {
				self.nodes.insert(neighbor.to_string());
			}
		}
	}

	/// Highlights a single link and its endpoints. `None` clears the sets.
	pub fn hover_link(&mut self, link: Option<&ViewLink>) {
		self.clear();
		if let Some(link) = link {
			self.links.insert(link.id.clone());
			self.nodes.insert(link.source.clone());
			self.nodes.insert(link.target.clone());
		}
	}

	/// The hovered node, if hovering a node.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Whether `id` is lit.
	pub fn has_node(&self, id: &str) -> bool {
		self.nodes.contains(id)
	}

	/// Whether the link with this id is lit.
	pub fn has_link(&self, id: &str) -> bool {
		self.links.contains(id)
	}

	/// Ids of lit nodes.
	pub fn nodes(&self) -> &HashSet<String> {
		&self.nodes
	}

	/// Ids of lit links.
	pub fn links(&self) -> &HashSet<String> {
		&self.links
	}

	/// True when nothing is lit.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	/// Ring style for node `id`.
	pub fn ring(&self, id: &str) -> Ring {
		if self.hovered.as_deref() == Some(id) {
			Ring::Hovered
		} else if self.nodes.contains(id) {
			Ring::Neighbor
		} else {
			Ring::Idle
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::config::LoaderConfig;
	use crate::graph::loader::load_graph;

	fn setup() -> (DependencyGraph, DerivedView) {
		let g = load_graph(
			r#"{"a": ["b", "c"], "b": ["c"], "d": ["b"]}"#,
			&LoaderConfig::default(),
		)
		.unwrap();
		let view = DerivedView::build(&g);
		(g, view)
	}

	fn sorted(set: &HashSet<String>) -> Vec<&str> {
		let mut v: Vec<_> = set.iter().map(String::as_str).collect();
		v.sort();
		v
	}

	#[test]
	fn hovering_a_node_highlights_its_neighborhood() {
		let (g, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), Some(&g), &view);

		assert_eq!(sorted(h.nodes()), vec!["a", "b", "c"]);
		// a->b and a->c only; b->c does not touch a
		assert_eq!(sorted(h.links()), vec!["e0", "e1"]);
		assert_eq!(h.hovered(), Some("a"));
	}

	#[test]
	fn incoming_edges_count_as_neighborhood() {
		let (g, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("b"), Some(&g), &view);
		assert_eq!(sorted(h.nodes()), vec!["a", "b", "c", "d"]);
		assert_eq!(sorted(h.links()), vec!["e0", "e2", "e3"]);
	}

	#[test]
	fn hidden_neighbors_are_skipped() {
		let (mut g, _) = setup();
		g.set_hidden("c", true);
		let view = DerivedView::build(&g);
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), Some(&g), &view);
		assert_eq!(sorted(h.nodes()), vec!["a", "b"]);
		assert_eq!(sorted(h.links()), vec!["e0"]);
	}

	#[test]
	fn hovering_none_clears() {
		let (g, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), Some(&g), &view);
		h.hover_node(None, Some(&g), &view);
		assert!(h.is_empty());
		assert_eq!(h.hovered(), None);
	}

	#[test]
	fn hovering_without_graph_clears() {
		let (_, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), None, &view);
		assert!(h.is_empty());
	}

	#[test]
	fn new_hover_replaces_previous_sets() {
		let (g, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), Some(&g), &view);
		h.hover_node(Some("d"), Some(&g), &view);
		assert_eq!(sorted(h.nodes()), vec!["b", "d"]);
		assert!(!h.has_link("e0"));
	}

	#[test]
	fn link_hover_highlights_link_and_endpoints() {
		let (_, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_link(view.link("e2"));
		assert_eq!(sorted(h.nodes()), vec!["b", "c"]);
		assert_eq!(sorted(h.links()), vec!["e2"]);
		assert_eq!(h.hovered(), None);

		h.hover_link(None);
		assert!(h.is_empty());
	}

	#[test]
	fn ring_colors_follow_role() {
		let (g, view) = setup();
		let mut h = HighlightSet::default();
		h.hover_node(Some("a"), Some(&g), &view);
		assert_eq!(h.ring("a"), Ring::Hovered);
		assert_eq!(h.ring("b"), Ring::Neighbor);
		assert_eq!(h.ring("d"), Ring::Idle);
	}
}
