//! depgraph-view: interactive dependency graph viewer.
//!
//! This crate provides a WASM application that loads a JSON adjacency map
//! into a graph, renders it with a physics-based layout and lets the user
//! filter nodes, highlight neighborhoods and export the visible graph as DOT.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod graph;

use components::context::provide_graph_context;
use components::controls::{DotExport, FilterPanel, SettingsPanel};
use components::input::JsonInput;
pub use components::force_graph::ForceGraphCanvas;
pub use config::ViewerConfig;
pub use error::LoadError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("depgraph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn read_script(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Viewer overrides from `<script id="graph-config">`, defaults otherwise.
fn load_config() -> ViewerConfig {
	let Some(json_text) = read_script("graph-config") else {
		return ViewerConfig::default();
	};
	serde_json::from_str(&json_text).unwrap_or_else(|e| {
		warn!("depgraph: ignoring invalid graph config: {}", e);
		ViewerConfig::default()
	})
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
	Input,
	Graph,
}

/// Main application component.
/// Loads graph data from the DOM when present and shows the graph, or the
/// JSON input view when there is nothing (valid) to show.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph = provide_graph_context(load_config());
	let loaded = read_script("graph-data").is_some_and(|text| graph.load_json(&text).is_ok());
	let screen = RwSignal::new(if loaded { Screen::Graph } else { Screen::Input });

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Dependency Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || match screen.get() {
			Screen::Input => view! {
				<div class="input-screen">
					<h1>"Dependency Graph"</h1>
					<p class="subtitle">"Paste a JSON object mapping each name to its dependencies."</p>
					<JsonInput on_load=move |_: ()| screen.set(Screen::Graph) />
				</div>
			}
			.into_any(),
			Screen::Graph => view! {
				<div class="fullscreen-graph">
					<ForceGraphCanvas fullscreen=true />
					<div class="graph-overlay">
						<h1>"Dependency Graph"</h1>
						<p class="subtitle">
							"Hover to highlight neighbors. Click a node to trace its edges. Drag nodes to reposition. Scroll to zoom."
						</p>
					</div>
					<SettingsPanel>
						<button class="back-to-input" on:click=move |_| screen.set(Screen::Input)>
							"Back to input"
						</button>
						<FilterPanel />
						<DotExport />
					</SettingsPanel>
				</div>
			}
			.into_any(),
		}}
	}
}
