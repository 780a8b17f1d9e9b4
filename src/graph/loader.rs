//! Builds a [`DependencyGraph`] from JSON adjacency input.
//!
//! Two entry shapes are accepted per key:
//!
//! ```json
//! { "orders": ["payments", "mailboxes"] }
//! { "orders": { "name_with_namespace": "acme / billing / orders", "dependencies": ["payments"] } }
//! ```
//!
//! The second is what the registry crawler emits; its namespace supplies the
//! node's group.

use log::info;
use serde::Deserialize;
use serde_json::Value;

use super::model::{DependencyGraph, NodeAttrs};
use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
	List(Vec<String>),
	Rich(RichEntry),
}

#[derive(Deserialize)]
struct RichEntry {
	#[serde(default)]
	name_with_namespace: Option<String>,
	dependencies: Vec<String>,
}

/// One key of the adjacency mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyEntry {
	/// The key, i.e. the dependent node.
	pub name: String,
	/// Namespace of a rich entry, used as the node's cluster.
	pub group: Option<String>,
	/// Dependency names in input order.
	pub dependencies: Vec<String>,
}

/// Parsed adjacency mapping, in input key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjacency {
	/// One entry per key.
	pub entries: Vec<AdjacencyEntry>,
}

impl Adjacency {
	/// Parses a JSON object of `name -> dependencies`.
	pub fn parse(text: &str) -> Result<Self> {
		let Value::Object(map) = serde_json::from_str::<Value>(text)? else {
			return Err(LoadError::NotAnObject);
		};

		let entries = map
			.into_iter()
			.map(|(key, value)| {
				let raw = serde_json::from_value::<RawEntry>(value).map_err(|source| {
					LoadError::InvalidEntry {
						key: key.clone(),
						source,
					}
				})?;
				Ok(match raw {
					RawEntry::List(dependencies) => AdjacencyEntry {
						name: key,
						group: None,
						dependencies,
					},
					RawEntry::Rich(rich) => AdjacencyEntry {
						name: key,
						group: rich.name_with_namespace.as_deref().and_then(namespace_group),
						dependencies: rich.dependencies,
					},
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self { entries })
	}

	/// Builds plain entries from `(name, dependencies)` pairs.
	pub fn from_lists<'a>(lists: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
		Self {
			entries: lists
				.into_iter()
				.map(|(name, deps)| AdjacencyEntry {
					name: name.to_string(),
					group: None,
					dependencies: deps.iter().map(|d| d.to_string()).collect(),
				})
				.collect(),
		}
	}
}

/// `"acme / billing / orders"` belongs to group `"billing"`.
fn namespace_group(namespace: &str) -> Option<String> {
	let parts: Vec<&str> = namespace.split(" / ").collect();
	(parts.len() >= 2).then(|| parts[parts.len() - 2].trim().to_string())
}

/// Deterministic value in `[0, 1)` for initial placement.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

fn default_node(id: &str, index: usize, config: &LoaderConfig) -> NodeAttrs {
	let seed = (index + 1) as f64;
	NodeAttrs::new(
		id,
		pseudo_random(seed * 1.1) * config.spread,
		pseudo_random(seed * 2.3) * config.spread,
		config.default_size,
	)
}

/// Single pass over the adjacency lists: merge nodes, add edges, grow the
/// dependent's size by one per outgoing edge.
pub fn build_graph(adjacency: &Adjacency, config: &LoaderConfig) -> DependencyGraph {
	let mut graph = DependencyGraph::new();

	for entry in &adjacency.entries {
		graph.merge_node(&entry.name, |i| default_node(&entry.name, i, config));
		if let (Some(group), Some(node)) = (&entry.group, graph.node_mut(&entry.name)) {
			node.group = Some(group.clone());
		}

		for dependency in &entry.dependencies {
			if config.ignore.iter().any(|ignored| ignored == dependency) {
				continue;
			}
			graph.merge_node(dependency, |i| default_node(dependency, i, config));
			if graph.add_edge(&entry.name, dependency).is_some() {
				if let Some(node) = graph.node_mut(&entry.name) {
					node.size += 1.0;
				}
			}
		}
	}

	graph
}

/// Parses `text` and builds the graph in one step.
pub fn load_graph(text: &str, config: &LoaderConfig) -> Result<DependencyGraph> {
	let adjacency = Adjacency::parse(text)?;
	let graph = build_graph(&adjacency, config);
	info!(
		"depgraph: loaded {} nodes, {} edges",
		graph.node_count(),
		graph.edge_count()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn load(text: &str) -> DependencyGraph {
		load_graph(text, &LoaderConfig::default()).unwrap()
	}

	fn size_of(graph: &DependencyGraph, id: &str) -> f64 {
		graph.node(id).map(|n| n.size).unwrap_or(f64::NAN)
	}

	#[test]
	fn example_graph_has_expected_nodes_edges_and_sizes() {
		let g = load(r#"{"a": ["b", "c"], "b": ["c"]}"#);

		assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
		let edges: Vec<_> = g.edges().map(|e| (e.source, e.target)).collect();
		assert_eq!(edges, vec![("a", "b"), ("a", "c"), ("b", "c")]);
		assert_eq!(size_of(&g, "a"), 7.0);
		assert_eq!(size_of(&g, "b"), 6.0);
		assert_eq!(size_of(&g, "c"), 5.0);
	}

	#[test]
	fn every_name_appears_exactly_once() {
		let g = load(r#"{"x": ["y", "z"], "y": ["z", "x"], "z": ["w"], "w": []}"#);
		let mut ids: Vec<_> = g.node_ids().collect();
		ids.sort();
		assert_eq!(ids, vec!["w", "x", "y", "z"]);
	}

	#[test]
	fn size_is_default_plus_out_degree() {
		let g = load(r#"{"x": ["y", "z"], "y": ["z", "x"], "z": ["w"], "w": []}"#);
		for node in g.nodes() {
			assert_eq!(node.size, 5.0 + g.out_degree(&node.id) as f64, "{}", node.id);
		}
	}

	#[test]
	fn key_order_is_preserved() {
		let g = load(r#"{"zeta": [], "alpha": [], "mid": []}"#);
		assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
	}

	#[test]
	fn duplicate_dependencies_make_parallel_edges() {
		let g = load(r#"{"a": ["b", "b"]}"#);
		assert_eq!(g.edge_count(), 2);
		assert_eq!(size_of(&g, "a"), 7.0);
	}

	#[test]
	fn dependency_seen_before_key_keeps_its_attributes() {
		let g = load(r#"{"a": ["b"], "b": ["c"]}"#);
		// b was created while processing a, then gained one edge as a key
		assert_eq!(size_of(&g, "b"), 6.0);
	}

	#[test]
	fn rich_entries_supply_groups() {
		let g = load(
			r#"{
				"orders": {"id": 7, "name": "orders", "name_with_namespace": "acme / billing / orders", "dependencies": ["payments"]},
				"payments": {"name_with_namespace": "payments", "dependencies": []}
			}"#,
		);
		assert_eq!(g.node("orders").and_then(|n| n.group.clone()), Some("billing".into()));
		assert_eq!(g.node("payments").and_then(|n| n.group.clone()), None);
		assert_eq!(size_of(&g, "orders"), 6.0);
	}

	#[test]
	fn ignored_dependencies_are_dropped() {
		let config = LoaderConfig {
			ignore: vec!["logging".into()],
			..Default::default()
		};
		let g = load_graph(r#"{"a": ["logging", "b"]}"#, &config).unwrap();
		assert!(!g.contains_node("logging"));
		assert_eq!(size_of(&g, "a"), 6.0);
	}

	#[test]
	fn positions_are_deterministic_and_within_spread() {
		let config = LoaderConfig {
			spread: 100.0,
			..Default::default()
		};
		let first = load_graph(r#"{"a": ["b", "c"]}"#, &config).unwrap();
		let second = load_graph(r#"{"a": ["b", "c"]}"#, &config).unwrap();
		for (n1, n2) in first.nodes().zip(second.nodes()) {
			assert_eq!((n1.x, n1.y), (n2.x, n2.y));
			assert!((0.0..100.0).contains(&n1.x));
			assert!((0.0..100.0).contains(&n1.y));
		}
	}

	#[rstest]
	#[case::syntax_error("{\"a\": [")]
	#[case::not_json("hello")]
	fn malformed_json_is_a_json_error(#[case] text: &str) {
		assert!(matches!(Adjacency::parse(text), Err(LoadError::Json(_))));
	}

	#[rstest]
	#[case::array("[1, 2]")]
	#[case::string("\"a\"")]
	#[case::null("null")]
	fn non_object_root_is_rejected(#[case] text: &str) {
		assert!(matches!(Adjacency::parse(text), Err(LoadError::NotAnObject)));
	}

	#[rstest]
	#[case::number_list(r#"{"a": [1]}"#)]
	#[case::plain_string(r#"{"a": "b"}"#)]
	#[case::object_without_dependencies(r#"{"a": {"name": "a"}}"#)]
	fn bad_entry_names_the_key(#[case] text: &str) {
		match Adjacency::parse(text) {
			Err(LoadError::InvalidEntry { key, .. }) => assert_eq!(key, "a"),
			other => panic!("expected InvalidEntry, got {other:?}"),
		}
	}

	#[rstest]
	#[case("acme / billing / orders", Some("billing"))]
	#[case("billing / orders", Some("billing"))]
	#[case("orders", None)]
	fn group_is_second_to_last_segment(#[case] namespace: &str, #[case] expected: Option<&str>) {
		assert_eq!(namespace_group(namespace).as_deref(), expected);
	}

	#[test]
	fn from_lists_builds_same_graph_as_json() {
		let adjacency = Adjacency::from_lists([("a", &["b", "c"][..]), ("b", &["c"][..])]);
		let g = build_graph(&adjacency, &LoaderConfig::default());
		assert_eq!(g.edge_count(), 3);
		assert_eq!(size_of(&g, "a"), 7.0);
	}
}
