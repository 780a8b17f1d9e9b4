//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node display data, the
//! pan/zoom transform and the transient hover highlight. The simulation is
//! rebuilt from each new [`DerivedView`]; nodes that survive a rebuild keep
//! their position.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use crate::config::ViewerConfig;
use crate::graph::{DerivedView, HighlightSet};

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub color: String,
	/// Radius multiplier derived from the node's `size` attribute.
	pub size: f64,
}

/// A link between two simulation nodes, drawn from the derived view.
#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub id: String,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub color: Option<String>,
	pub size: f64,
	pub kind: Option<String>,
	/// Radius multiplier of the target node, so arrowheads stop at its rim.
	pub target_size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What the pointer was last over. Highlight sets are only rebuilt when
/// this changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverTarget {
	#[default]
	Nothing,
	Node(String),
	Link(String),
}

/// Core graph state combining physics simulation with interaction and
/// highlight tracking.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightSet,
	pub hover: HoverTarget,
	/// Set once the pointer moved during a press, so the release is not a click.
	pub moved: bool,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	links: Vec<LinkInfo>,
	ids: HashMap<DefaultNodeIdx, String>,
}

/// Radius multiplier for a node of `size`, relative to a fresh node.
fn size_factor(size: f64, default_size: f64) -> f64 {
	if default_size <= 0.0 {
		return 1.0;
	}
	(size / default_size).max(0.0).sqrt()
}

/// Assigns palette colors to groups in the order they first appear.
fn group_colors(view: &DerivedView, theme: &Theme) -> HashMap<String, String> {
	let mut colors = HashMap::new();
	for group in view.nodes.iter().filter_map(|n| n.group.as_ref()) {
		if !colors.contains_key(group) {
			let color = theme.palette.get(colors.len()).to_css();
			colors.insert(group.clone(), color);
		}
	}
	colors
}

impl ForceGraphState {
	pub fn new(view: &DerivedView, width: f64, height: f64, theme: &Theme, config: &ViewerConfig) -> Self {
		Self::rebuild(view, width, height, theme, config, None)
	}

	/// Builds a simulation for `view`. Positions, anchors and the camera are
	/// carried over from `previous` for nodes that are still visible.
	pub fn rebuild(
		view: &DerivedView,
		width: f64,
		height: f64,
		theme: &Theme,
		config: &ViewerConfig,
		previous: Option<&ForceGraphState>,
	) -> Self {
		let mut graph = ForceGraph::new(config.simulation.parameters());
		let mut id_to_idx = HashMap::new();
		let mut ids = HashMap::new();
		let mut sizes = HashMap::new();
		let kept = previous.map(|p| p.positions_by_id()).unwrap_or_default();
		let groups = group_colors(view, theme);
		let spread = config.loader.spread.max(f64::EPSILON);

		for (i, node) in view.nodes.iter().enumerate() {
			let color = node
				.color
				.clone()
				.or_else(|| node.group.as_ref().and_then(|g| groups.get(g).cloned()))
				.unwrap_or_else(|| config.colors.node.clone());

			let (x, y, is_anchor) = kept.get(&node.id).copied().unwrap_or_else(|| {
				// Circle around the origin, jittered by the loader's position
				let angle = (i as f64) * 2.0 * PI / view.nodes.len() as f64;
				let jitter = |v: f64| (v / spread - 0.5) * 20.0;
				(
					(100.0 * angle.cos() + jitter(node.x)) as f32,
					(100.0 * angle.sin() + jitter(node.y)) as f32,
					false,
				)
			});

			let size = size_factor(node.size, config.loader.default_size);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					color,
					size,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			ids.insert(idx, node.id.clone());
			sizes.insert(idx, size);
		}

		let mut links = Vec::with_capacity(view.links.len());
		let mut springs = HashSet::new();
		for link in &view.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				// force_graph keeps a simple graph; parallel links share one spring
				if src != tgt && springs.insert((src, tgt)) {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				links.push(LinkInfo {
					id: link.id.clone(),
					source: src,
					target: tgt,
					color: link.color.clone(),
					size: link.size,
					kind: link.kind.clone(),
					target_size: sizes.get(&tgt).copied().unwrap_or(1.0),
				});
			}
		}

		let transform = previous.map(|p| p.transform.clone()).unwrap_or(ViewTransform {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		});

		Self {
			graph,
			links,
			ids,
			transform,
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightSet::default(),
			hover: HoverTarget::default(),
			moved: false,
			width,
			height,
			animation_running: true,
			flow_time: previous.map(|p| p.flow_time).unwrap_or(0.0),
		}
	}

	pub fn links(&self) -> &[LinkInfo] {
		&self.links
	}

	/// Id of the view node simulated at `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<&str> {
		self.ids.get(&idx).map(String::as_str)
	}

	/// Current world-space position of every node.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	fn positions_by_id(&self) -> HashMap<String, (f32, f32, bool)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		positions
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// The link closest to the pointer, if within the hover tolerance.
	pub fn link_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<&LinkInfo> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let positions = self.positions();
		self.links
			.iter()
			.filter_map(|link| {
				let a = positions.get(&link.source)?;
				let b = positions.get(&link.target)?;
				Some((link, distance_to_segment((gx, gy), *a, *b)))
			})
			.filter(|(_, d)| *d < scale.link_tolerance)
			.min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
			.map(|(link, _)| link)
	}

	/// What lies under the pointer: nodes win over links.
	pub fn target_at(&self, sx: f64, sy: f64, config: &ScaleConfig) -> HoverTarget {
		if let Some(id) = self
			.node_at_position(sx, sy, config)
			.and_then(|idx| self.node_id(idx))
		{
			return HoverTarget::Node(id.to_string());
		}
		match self.link_at_position(sx, sy, config) {
			Some(link) => HoverTarget::Link(link.id.clone()),
			None => HoverTarget::Nothing,
		}
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
