//! Node filter: one checkbox per node, checked while the node is shown.

use leptos::prelude::*;

use crate::components::context::use_graph;
use crate::graph::DependencyGraph;

/// `(id, shown)` for every node whose id contains `query`, ignoring case.
/// Rows keep graph insertion order.
fn filter_rows(graph: Option<&DependencyGraph>, query: &str) -> Vec<(String, bool)> {
	let Some(graph) = graph else {
		return Vec::new();
	};
	let needle = query.trim().to_lowercase();
	graph
		.nodes()
		.filter(|n| needle.is_empty() || n.id.to_lowercase().contains(&needle))
		.map(|n| (n.id.clone(), !n.hidden))
		.collect()
}

/// Searchable node list with Show all / Hide all.
#[component]
pub fn FilterPanel() -> impl IntoView {
	let graph = use_graph();
	let query = RwSignal::new(String::new());

	let rows = Memo::new(move |_| {
		let query = query.get();
		graph.store.with(|s| filter_rows(s.graph(), &query))
	});
	let counts = Memo::new(move |_| {
		graph.store.with(|s| {
			s.graph()
				.map_or((0, 0), |g| (g.hidden_count(), g.node_count()))
		})
	});

	view! {
		<section class="filter-panel">
			<h2>
				"Nodes "
				<span class="hidden-count">
					{move || {
						let (hidden, total) = counts.get();
						format!("({hidden} of {total} hidden)")
					}}
				</span>
			</h2>
			<input
				type="search"
				placeholder="Filter by name"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<div class="filter-actions">
				<button on:click=move |_| graph.set_all_hidden(false)>"Show all"</button>
				<button on:click=move |_| graph.set_all_hidden(true)>"Hide all"</button>
			</div>
			<ul class="filter-list">
				<For
					each=move || rows.get()
					key=|row| row.clone()
					children=move |(id, shown)| {
						let toggled = id.clone();
						view! {
							<li>
								<label>
									<input
										type="checkbox"
										prop:checked=shown
										on:change=move |ev| graph.set_hidden(&toggled, !event_target_checked(&ev))
									/>
									{id}
								</label>
							</li>
						}
					}
				/>
			</ul>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;
	use crate::config::LoaderConfig;
	use crate::graph::load_graph;

	fn graph() -> DependencyGraph {
		let mut g = load_graph(
			r#"{"core": ["Utils", "log"], "cli": ["core"]}"#,
			&LoaderConfig::default(),
		)
		.unwrap();
		g.set_hidden("log", true);
		g
	}

	#[test]
	fn no_graph_no_rows() {
		assert!(filter_rows(None, "").is_empty());
	}

	#[test]
	fn rows_follow_insertion_order_and_hidden_state() {
		let g = graph();
		assert_eq!(
			filter_rows(Some(&g), ""),
			vec![
				("core".to_string(), true),
				("Utils".to_string(), true),
				("log".to_string(), false),
				("cli".to_string(), true),
			]
		);
	}

	#[rstest]
	#[case("c", vec!["core", "cli"])]
	#[case("UTIL", vec!["Utils"])]
	#[case("  lo ", vec!["log"])]
	#[case("zzz", vec![])]
	fn query_is_case_insensitive_substring(#[case] query: &str, #[case] expected: Vec<&str>) {
		let g = graph();
		let ids: Vec<String> = filter_rows(Some(&g), query).into_iter().map(|(id, _)| id).collect();
		assert_eq!(ids, expected);
	}
}
