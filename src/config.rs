//! User-facing viewer configuration.
//!
//! Every field has a default, so a page only needs to supply the values it
//! wants to change. Overrides are read from a `<script id="graph-config">`
//! element the same way graph data is read from `graph-data`.

use force_graph::SimulationParameters;
use serde::Deserialize;

/// Top-level configuration bundle.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
	/// How input JSON becomes a graph.
	pub loader: LoaderConfig,
	/// Force layout tuning.
	pub simulation: SimulationConfig,
	/// Selection, ring and default colors.
	pub colors: ColorConfig,
	/// Canvas theme name. Unknown or empty names use the default theme.
	pub theme: String,
}

/// Options applied while building a graph from adjacency input.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
	/// Size given to a node when it is first created.
	pub default_size: f64,
	/// Initial positions are spread over `[0, spread)` on both axes.
	pub spread: f64,
	/// Dependency names dropped from every dependency list.
	pub ignore: Vec<String>,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			default_size: 5.0,
			spread: 1.0,
			ignore: Vec::new(),
		}
	}
}

/// Force simulation tuning, mirrored onto `force_graph`'s parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring strength along links.
	pub force_spring: f32,
	/// Cap on the force applied to a node per step.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Fraction of velocity kept each step.
	pub damping_factor: f32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl SimulationConfig {
	/// `force_graph` parameters with these values.
	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// CSS colors used for graph attributes and highlight rings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
	/// Default node fill when no group color applies.
	pub node: String,
	/// Default edge stroke.
	pub edge: String,
	/// Ring around the hovered node.
	pub hovered_ring: String,
	/// Ring around neighbors of the hovered node.
	pub neighbor_ring: String,
	/// Ring around every other node.
	pub idle_ring: String,
	/// Selected node's outgoing edges.
	pub outgoing: String,
	/// Selected node's incoming edges.
	pub incoming: String,
	/// Source endpoint of a selected edge.
	pub source_node: String,
	/// Target endpoint of a selected edge.
	pub target_node: String,
	/// Particles travelling along highlighted links.
	pub particle: String,
}

impl Default for ColorConfig {
	fn default() -> Self {
		Self {
			node: "#5e81ac".into(),
			edge: "#ccc".into(),
			hovered_ring: "red".into(),
			neighbor_ring: "orange".into(),
			idle_ring: "#ccc".into(),
			outgoing: "red".into(),
			incoming: "blue".into(),
			source_node: "pink".into(),
			target_node: "blue".into(),
			particle: "red".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config: ViewerConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, ViewerConfig::default());
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config: ViewerConfig =
			serde_json::from_str(r#"{"loader": {"ignore": ["logging"]}, "colors": {"hovered_ring": "crimson"}}"#)
				.unwrap();
		assert_eq!(config.loader.ignore, vec!["logging".to_string()]);
		assert_eq!(config.loader.default_size, 5.0);
		assert_eq!(config.colors.hovered_ring, "crimson");
		assert_eq!(config.colors.neighbor_ring, "orange");
		assert_eq!(config.simulation, SimulationConfig::default());
		assert_eq!(config.theme, "");
	}

	#[test]
	fn theme_name_is_read() {
		let config: ViewerConfig = serde_json::from_str(r#"{"theme": "minimal"}"#).unwrap();
		assert_eq!(config.theme, "minimal");
	}

	#[test]
	fn simulation_maps_onto_force_graph_parameters() {
		let params = SimulationConfig {
			force_charge: 10.0,
			..Default::default()
		}
		.parameters();
		assert_eq!(params.force_charge, 10.0);
		assert_eq!(params.damping_factor, 0.9);
	}
}
