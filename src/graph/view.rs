//! Render-ready projection of the graph with hidden nodes filtered out.

use super::model::DependencyGraph;

/// A visible node.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
	/// Node id, also its label.
	pub id: String,
	/// Initial x position.
	pub x: f64,
	/// Initial y position.
	pub y: f64,
	/// Size from the loader, larger for nodes with more dependencies.
	pub size: f64,
	/// Fill override set by selection or input.
	pub color: Option<String>,
	/// Set while the node is part of the click selection.
	pub highlighted: bool,
	/// Cluster for palette coloring.
	pub group: Option<String>,
}

/// A visible edge with its endpoints and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewLink {
	/// Edge id (`e0`, `e1`, ...).
	pub id: String,
	/// Dependent node.
	pub source: String,
	/// Dependency node.
	pub target: String,
	/// Stroke override; `None` draws with the configured edge color.
	pub color: Option<String>,
	/// Width multiplier.
	pub size: f64,
	/// Shape hint, `Some("fast")` for dashed edges.
	pub kind: Option<String>,
	/// Set while the edge is part of the click selection.
	pub highlighted: bool,
}

/// Snapshot consumed by the render surface. Rebuilt on every version change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedView {
	/// Visible nodes in insertion order.
	pub nodes: Vec<ViewNode>,
	/// Edges between visible nodes in insertion order.
	pub links: Vec<ViewLink>,
}

impl DerivedView {
	/// Keeps nodes that are not hidden and edges whose endpoints are both
	/// visible, in insertion order.
	pub fn build(graph: &DependencyGraph) -> Self {
		let nodes = graph
			.nodes()
			.filter(|n| !n.hidden)
			.map(|n| ViewNode {
				id: n.id.clone(),
				x: n.x,
				y: n.y,
				size: n.size,
				color: n.color.clone(),
				highlighted: n.highlighted,
				group: n.group.clone(),
			})
			.collect();

		let is_visible = |id: &str| graph.node(id).is_some_and(|n| !n.hidden);
		let links = graph
			.edges()
			.filter(|e| is_visible(e.source) && is_visible(e.target))
			.map(|e| ViewLink {
				id: e.attrs.id.clone(),
				source: e.source.to_string(),
				target: e.target.to_string(),
				color: e.attrs.color.clone(),
				size: e.attrs.size,
				kind: e.attrs.kind.clone(),
				highlighted: e.attrs.highlighted,
			})
			.collect();

		Self { nodes, links }
	}

	/// [`DerivedView::build`], or an empty view before anything is loaded.
	pub fn from_graph(graph: Option<&DependencyGraph>) -> Self {
		graph.map(Self::build).unwrap_or_default()
	}

	/// Visible node by id.
	pub fn node(&self, id: &str) -> Option<&ViewNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Visible link by id.
	pub fn link(&self, id: &str) -> Option<&ViewLink> {
		self.links.iter().find(|l| l.id == id)
	}

	/// True when no node is visible.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
