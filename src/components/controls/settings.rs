//! Collapsible container for the side panel.

use leptos::prelude::*;

/// Collapsible side panel holding the other controls.
#[component]
pub fn SettingsPanel(children: Children) -> impl IntoView {
	let open = RwSignal::new(true);

	view! {
		<aside class="settings-panel" class:collapsed=move || !open.get()>
			<button class="settings-toggle" on:click=move |_| open.update(|o| *o = !*o)>
				{move || if open.get() { "Hide settings" } else { "Settings" }}
			</button>
			<div class="settings-body" style:display=move || if open.get() { "block" } else { "none" }>
				{children()}
			</div>
		</aside>
	}
}
