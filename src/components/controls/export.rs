//! Graphviz DOT export of the visible graph, optionally clustered by group.

use leptos::prelude::*;

use crate::components::context::use_graph;
use crate::graph::dot::{DotOptions, to_dot};

/// Read-only Graphviz DOT rendering of the visible graph.
#[component]
pub fn DotExport() -> impl IntoView {
	let graph = use_graph();
	let clusters = RwSignal::new(true);
	let dot = Memo::new(move |_| {
		let options = DotOptions {
			cluster_groups: clusters.get(),
		};
		graph.view.with(|view| to_dot(view, &options))
	});

	view! {
		<details class="dot-export">
			<summary>"Export DOT"</summary>
			<label>
				<input
					type="checkbox"
					prop:checked=move || clusters.get()
					on:change=move |ev| clusters.set(event_target_checked(&ev))
				/>
				"Cluster by group"
			</label>
			<textarea class="dot-output" readonly rows="12" prop:value=move || dot.get() />
		</details>
	}
}
