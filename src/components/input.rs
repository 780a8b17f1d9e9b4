//! Textarea view for pasting adjacency JSON by hand.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::context::use_graph;

const PLACEHOLDER: &str = r#"{
	"app": ["core", "ui"],
	"ui": ["core"]
}"#;

/// Loads the typed JSON into the shared store. `on_load` fires after a
/// successful load; a failure is shown below the textarea.
#[component]
pub fn JsonInput(#[prop(into)] on_load: Callback<()>) -> impl IntoView {
	let graph = use_graph();
	let text = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);

	let load = move |_: MouseEvent| match graph.load_json(&text.get_untracked()) {
		Ok(()) => {
			error.set(None);
			on_load.run(());
		}
		Err(err) => error.set(Some(err.to_string())),
	};

	view! {
		<div class="json-input">
			<textarea
				rows="20"
				spellcheck="false"
				placeholder=PLACEHOLDER
				prop:value=move || text.get()
				on:input=move |ev| text.set(event_target_value(&ev))
			/>
			<button on:click=load>"Load"</button>
			{move || error.get().map(|message| view! { <p class="load-error">{message}</p> })}
		</div>
	}
}
