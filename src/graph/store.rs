//! Owned graph state with an explicit change token.
//!
//! Consumers never get `&mut DependencyGraph` without the version moving:
//! [`GraphStore::save`] replaces the graph, [`GraphStore::update`] mutates it
//! in place, and both bump the version in the same call.

use log::debug;

use super::model::DependencyGraph;

/// Monotonic change token. Compare two tokens to learn whether the graph
/// should be re-read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
	fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

/// Holds the current graph, if any, and its version.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	graph: Option<DependencyGraph>,
	version: Version,
}

impl GraphStore {
	/// Store with no graph at version zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// The current graph, `None` until the first save.
	pub fn graph(&self) -> Option<&DependencyGraph> {
		self.graph.as_ref()
	}

	/// Current change token.
	pub fn version(&self) -> Version {
		self.version
	}

	/// Whether a graph has been saved.
	pub fn is_loaded(&self) -> bool {
		self.graph.is_some()
	}

	/// Replaces the graph wholesale.
	pub fn save(&mut self, graph: DependencyGraph) -> Version {
		self.graph = Some(graph);
		self.bump()
	}

	/// Mutates the graph and publishes the change. Without a graph this is a
	/// no-op and the version stays put.
	pub fn update<R>(&mut self, mutate: impl FnOnce(&mut DependencyGraph) -> R) -> Option<R> {
		let graph = self.graph.as_mut()?;
		let result = mutate(graph);
		self.bump();
		Some(result)
	}

	fn bump(&mut self) -> Version {
		self.version = self.version.next();
		debug!("depgraph: graph version {}", self.version.0);
		self.version
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::NodeAttrs;

	fn one_node() -> DependencyGraph {
		let mut g = DependencyGraph::new();
		g.merge_node("a", |_| NodeAttrs::new("a", 0.0, 0.0, 5.0));
		g
	}

	#[test]
	fn starts_empty() {
		let store = GraphStore::new();
		assert!(!store.is_loaded());
		assert_eq!(store.version(), Version::default());
	}

	#[test]
	fn save_replaces_and_bumps() {
		let mut store = GraphStore::new();
		let v1 = store.save(one_node());
		let v2 = store.save(DependencyGraph::new());
		assert!(v2 > v1);
		assert_eq!(store.graph().map(|g| g.node_count()), Some(0));
	}

	#[test]
	fn update_mutates_and_bumps() {
		let mut store = GraphStore::new();
		let before = store.save(one_node());
		let changed = store.update(|g| g.set_hidden("a", true));
		assert_eq!(changed, Some(true));
		assert!(store.version() > before);
		assert_eq!(store.graph().and_then(|g| g.node("a")).map(|n| n.hidden), Some(true));
	}

	#[test]
	fn update_without_graph_is_noop() {
		let mut store = GraphStore::new();
		let result = store.update(|g| g.set_hidden("a", true));
		assert_eq!(result, None);
		assert_eq!(store.version(), Version::default());
	}

	#[test]
	fn every_publish_strictly_increases_version() {
		let mut store = GraphStore::new();
		let mut last = store.version();
		store.save(one_node());
		for _ in 0..5 {
			assert!(store.version() > last);
			last = store.version();
			store.update(|_| ());
		}
	}
}
