//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component reads the shared [`GraphContext`] and rebuilds its
//! simulation whenever the derived view changes. Mouse and wheel handlers
//! cover node dragging, panning, zooming, hover highlighting and click
//! selection. An animation loop runs via `requestAnimationFrame`, stepping
//! the physics and redrawing each frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, HoverTarget};
use super::theme::Theme;
use crate::components::context::{GraphContext, use_graph};
use crate::config::{ColorConfig, ViewerConfig};

/// Pointer travel in pixels below which a press and release still count as
/// a click.
const CLICK_SLOP: f64 = 3.0;

/// Simulation state plus the visual settings it is drawn with.
struct Surface {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	colors: ColorConfig,
}

type JsHandle = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything the canvas keeps alive between frames. The animation closure
/// holds a handle to itself, so it is only freed by [`Handles::release`].
#[derive(Clone, Default)]
struct Handles {
	surface: Rc<RefCell<Option<Surface>>>,
	animate: JsHandle,
	resize: JsHandle,
	frame: Rc<Cell<Option<i32>>>,
}

impl Handles {
	fn release(&self) {
		self.release_in(web_sys::window().as_ref());
	}

	/// Cancels the pending frame, detaches the resize listener and drops every
	/// handle. Event handlers still holding `surface` become no-ops.
	fn release_in(&self, window: Option<&Window>) {
		if let Some(window) = window {
			if let Some(id) = self.frame.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize.borrow().as_ref() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.resize.borrow_mut().take();
		self.animate.borrow_mut().take();
		self.surface.borrow_mut().take();
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Recomputes the highlight sets for `target` against the current graph.
fn apply_hover(state: &mut ForceGraphState, target: HoverTarget, graph: GraphContext) {
	graph.store.with_untracked(|store| {
		graph.view.with_untracked(|view| match &target {
			HoverTarget::Node(id) => state.highlight.hover_node(Some(id.as_str()), store.graph(), view),
			HoverTarget::Link(id) => state.highlight.hover_link(view.link(id)),
			HoverTarget::Nothing => state.highlight.clear(),
		})
	});
	state.hover = target;
}

/// Renders the shared graph as an interactive force-directed layout.
///
/// Must be mounted below [`provide_graph_context`](crate::components::context::provide_graph_context).
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize automatically with
/// the window. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let graph = use_graph();
	let config: ViewerConfig = graph.config.get_value();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = Handles::default();
	let surface = handles.surface.clone();

	// Cleanup must be Send; the Rc handles stay behind a local arena slot
	let stored = StoredValue::new_local(handles.clone());
	on_cleanup(move || {
		stored.try_with_value(Handles::release);
	});

	Effect::new(move |_| {
		let view = graph.view.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(ref mut s) = *handles.surface.borrow_mut() {
			let hover = s.state.hover.clone();
			s.state = ForceGraphState::rebuild(
				&view,
				s.state.width,
				s.state.height,
				&s.theme,
				&config,
				Some(&s.state),
			);
			apply_hover(&mut s.state, hover, graph);
			debug!("depgraph: simulation rebuilt with {} nodes", view.nodes.len());
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let parent = canvas.parent_element();
		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
				height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("depgraph: canvas has no 2d context");
			return;
		};

		let theme = Theme::named(&config.theme);
		*handles.surface.borrow_mut() = Some(Surface {
			state: ForceGraphState::new(&view, w, h, &theme, &config),
			scale: ScaleConfig::default(),
			theme,
			colors: config.colors.clone(),
		});

		if fullscreen {
			let (surface_resize, canvas_resize) = (handles.surface.clone(), canvas.clone());
			*handles.resize.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *surface_resize.borrow_mut() {
					s.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *handles.resize.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (surface_anim, animate_inner, frame) =
			(handles.surface.clone(), handles.animate.clone(), handles.frame.clone());
		*handles.animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *surface_anim.borrow_mut() {
				let dt = 0.016;
				if s.state.animation_running {
					s.state.tick(dt);
				}
				render::render(&s.state, &ctx, &s.scale, &s.theme, &s.colors);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *handles.animate.borrow() {
			handles
				.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let surface_md = surface.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *surface_md.borrow_mut() {
			s.state.moved = false;
			if let Some(idx) = s.state.node_at_position(x, y, &s.scale) {
				s.state.drag.active = true;
				s.state.drag.node_idx = Some(idx);
				s.state.drag.start_x = x;
				s.state.drag.start_y = y;
				let mut start = (0.0, 0.0);
				s.state.graph.visit_nodes(|node| {
					if node.index() == idx {
						start = (node.x(), node.y());
					}
				});
				(s.state.drag.node_start_x, s.state.drag.node_start_y) = start;
			} else {
				s.state.pan.active = true;
				s.state.pan.start_x = x;
				s.state.pan.start_y = y;
				s.state.pan.transform_start_x = s.state.transform.x;
				s.state.pan.transform_start_y = s.state.transform.y;
			}
		}
	};

	let surface_mm = surface.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let mut borrow = surface_mm.borrow_mut();
		let Some(s) = borrow.as_mut() else {
			return;
		};
		let state = &mut s.state;

		if !state.drag.active {
			let target = state.target_at(x, y, &s.scale);
			if target != state.hover {
				apply_hover(state, target, graph);
			}
		}

		if state.drag.active {
			let (dx, dy) = (x - state.drag.start_x, y - state.drag.start_y);
			if dx.abs() + dy.abs() > CLICK_SLOP {
				state.moved = true;
			}
			if let (Some(idx), true) = (state.drag.node_idx, state.moved) {
				let k = state.transform.k;
				let (nx, ny) = (
					state.drag.node_start_x + (dx / k) as f32,
					state.drag.node_start_y + (dy / k) as f32,
				);
				state.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if state.pan.active {
			let (dx, dy) = (x - state.pan.start_x, y - state.pan.start_y);
			if dx.abs() + dy.abs() > CLICK_SLOP {
				state.moved = true;
			}
			state.transform.x = state.pan.transform_start_x + dx;
			state.transform.y = state.pan.transform_start_y + dy;
		}
	};

	let surface_mu = surface.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *surface_mu.borrow_mut() {
			s.state.drag.active = false;
			s.state.drag.node_idx = None;
			s.state.pan.active = false;
		}
	};

	let surface_ck = surface.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		// Resolve the target first; the store update below re-enters the surface
		let clicked = {
			let borrow = surface_ck.borrow();
			let Some(s) = borrow.as_ref() else {
				return;
			};
			if s.state.moved {
				return;
			}
			s.state
				.node_at_position(x, y, &s.scale)
				.and_then(|idx| s.state.node_id(idx))
				.map(str::to_string)
		};
		graph.select(clicked.as_deref());
	};

	let surface_ml = surface.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *surface_ml.borrow_mut() {
			s.state.drag.active = false;
			s.state.drag.node_idx = None;
			s.state.pan.active = false;
			apply_hover(&mut s.state, HoverTarget::Nothing, graph);
		}
	};

	let surface_wh = surface.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *surface_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.state.transform.k;
			s.state.transform.x = x - (x - s.state.transform.x) * ratio;
			s.state.transform.y = y - (y - s.state.transform.y) * ratio;
			s.state.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:click=on_click
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LoaderConfig;
	use crate::graph::{DerivedView, load_graph};

	fn surface() -> Surface {
		let graph = load_graph(r#"{"a": ["b"]}"#, &LoaderConfig::default()).unwrap();
		let (config, theme) = (ViewerConfig::default(), Theme::default());
		Surface {
			state: ForceGraphState::new(&DerivedView::build(&graph), 800.0, 600.0, &theme, &config),
			scale: ScaleConfig::default(),
			theme,
			colors: config.colors.clone(),
		}
	}

	#[test]
	fn release_drops_the_surface_for_every_holder() {
		let handles = Handles::default();
		*handles.surface.borrow_mut() = Some(surface());
		handles.frame.set(Some(7));
		let from_handler = handles.surface.clone();

		handles.release_in(None);

		assert!(from_handler.borrow().is_none());
		assert!(handles.animate.borrow().is_none());
		assert!(handles.resize.borrow().is_none());
	}

	#[test]
	fn release_twice_is_harmless() {
		let handles = Handles::default();
		*handles.surface.borrow_mut() = Some(surface());
		handles.release_in(None);
		handles.release_in(None);
		assert!(handles.surface.borrow().is_none());
	}
}
