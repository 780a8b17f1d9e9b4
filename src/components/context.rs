//! Reactive wrapper around [`GraphStore`] shared by every component.
//!
//! The store sits in a signal and the derived view is a memo over it, so a
//! `GraphStore::update` inside [`GraphContext::update`] is all it takes for
//! the canvas and the filter panel to refresh.

use leptos::prelude::*;
use log::{debug, warn};

use crate::config::{ColorConfig, ViewerConfig};
use crate::error::Result;
use crate::graph::{
	DependencyGraph, DerivedView, GraphStore, has_selection, load_graph, reset_selection,
	select_node,
};

/// Handle to the loaded graph. `Copy`, so closures take it by value.
#[derive(Clone, Copy)]
pub struct GraphContext {
	/// The graph and its version counter.
	pub store: RwSignal<GraphStore>,
	/// Visible nodes and links, recomputed when the store changes.
	pub view: Memo<DerivedView>,
	/// Settings read once at startup.
	pub config: StoredValue<ViewerConfig>,
}

impl GraphContext {
	/// Creates an empty store and the view derived from it.
	pub fn new(config: ViewerConfig) -> Self {
		let store = RwSignal::new(GraphStore::new());
		let view = Memo::new(move |_| store.with(|s| DerivedView::from_graph(s.graph())));
		Self {
			store,
			view,
			config: StoredValue::new(config),
		}
	}

	/// Colors used for selection and drawing.
	pub fn colors(&self) -> ColorConfig {
		self.config.with_value(|c| c.colors.clone())
	}

	/// Replaces the graph outright.
	pub fn save(&self, graph: DependencyGraph) {
		self.store.update(|s| {
			s.save(graph);
		});
	}

	/// Mutates the graph and publishes the change in one step. `None` when no
	/// graph is loaded.
	pub fn update<R>(&self, mutate: impl FnOnce(&mut DependencyGraph) -> R) -> Option<R> {
		self.store.try_update(|s| s.update(mutate)).flatten()
	}

	/// Parses `text` and replaces the graph. On failure the store is left as
	/// it was.
	pub fn load_json(&self, text: &str) -> Result<()> {
		let loader = self.config.with_value(|c| c.loader.clone());
		match load_graph(text, &loader) {
			Ok(graph) => {
				self.save(graph);
				Ok(())
			}
			Err(err) => {
				warn!("depgraph: failed to load graph: {err}");
				Err(err)
			}
		}
	}

	/// Hides or shows one node. Unknown ids change nothing.
	pub fn set_hidden(&self, id: &str, hidden: bool) {
		if self.update(|g| g.set_hidden(id, hidden)) == Some(true) {
			debug!("depgraph: {id} hidden={hidden}");
		}
	}

	/// Hides or shows every node.
	pub fn set_all_hidden(&self, hidden: bool) {
		if self.update(|g| g.set_all_hidden(hidden)).is_some() {
			debug!("depgraph: all nodes hidden={hidden}");
		}
	}

	/// Selects `node`, or clears the selection for `None`. Clearing an empty
	/// selection does not publish.
	pub fn select(&self, node: Option<&str>) {
		let colors = self.colors();
		match node {
			Some(id) => {
				self.update(|g| select_node(g, Some(id), &colors));
			}
			None => {
				let selected = self
					.store
					.with_untracked(|s| s.graph().is_some_and(has_selection));
				if selected {
					self.update(reset_selection);
				}
			}
		}
	}
}

/// Creates the context and makes it available to descendants.
pub fn provide_graph_context(config: ViewerConfig) -> GraphContext {
	let context = GraphContext::new(config);
	provide_context(context);
	context
}

/// The context provided by an ancestor. Panics when there is none.
pub fn use_graph() -> GraphContext {
	expect_context::<GraphContext>()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn failed_load_leaves_store_untouched() {
		let ctx = GraphContext::new(ViewerConfig::default());
		assert!(ctx.load_json("[1, 2]").is_err());
		assert!(ctx.store.with_untracked(|s| !s.is_loaded()));
		assert!(ctx.view.get_untracked().is_empty());
	}

	#[test]
	fn broken_load_keeps_the_loaded_graph() {
		let ctx = GraphContext::new(ViewerConfig::default());
		ctx.load_json(r#"{"a": ["b"]}"#).unwrap();
		let loaded = ctx.store.with_untracked(|s| s.version());

		assert!(ctx.load_json("{ broken").is_err());
		assert_eq!(ctx.store.with_untracked(|s| s.version()), loaded);
		assert_eq!(ctx.view.get_untracked().nodes.len(), 2);
		assert_eq!(ctx.view.get_untracked().links.len(), 1);
	}

	#[test]
	fn hiding_refreshes_the_view() {
		let ctx = GraphContext::new(ViewerConfig::default());
		ctx.load_json(r#"{"a": ["b", "c"], "b": ["c"]}"#).unwrap();
		assert_eq!(ctx.view.get_untracked().nodes.len(), 3);

		ctx.set_hidden("c", true);
		let view = ctx.view.get_untracked();
		assert_eq!(view.nodes.len(), 2);
		assert_eq!(view.links.len(), 1);

		ctx.set_all_hidden(false);
		assert_eq!(ctx.view.get_untracked().links.len(), 3);
	}

	#[test]
	fn update_without_graph_is_none() {
		let ctx = GraphContext::new(ViewerConfig::default());
		let before = ctx.store.with_untracked(|s| s.version());
		assert_eq!(ctx.update(|g| g.node_count()), None);
		assert_eq!(ctx.store.with_untracked(|s| s.version()), before);
	}

	#[test]
	fn hide_all_without_graph_changes_nothing() {
		let ctx = GraphContext::new(ViewerConfig::default());
		let before = ctx.store.with_untracked(|s| s.version());
		ctx.set_all_hidden(true);
		assert_eq!(ctx.store.with_untracked(|s| s.version()), before);
		assert!(ctx.store.with_untracked(|s| !s.is_loaded()));
	}

	#[test]
	fn background_click_only_resets_an_existing_selection() {
		let ctx = GraphContext::new(ViewerConfig::default());
		ctx.load_json(r#"{"a": ["b"]}"#).unwrap();
		let loaded = ctx.store.with_untracked(|s| s.version());

		ctx.select(None);
		assert_eq!(ctx.store.with_untracked(|s| s.version()), loaded);

		ctx.select(Some("a"));
		assert!(ctx.view.get_untracked().links[0].highlighted);
		ctx.select(None);
		assert!(!ctx.view.get_untracked().links[0].highlighted);
	}
}
