//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Links (dashed for fast edges), arrowheads, then particles on
//!    highlighted links (world space)
//! 3. Node rings, node bodies and labels (world space)
//! 4. Vignette (screen space)

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::particles::particle_positions;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, LinkInfo, NodeInfo};
use super::theme::{Color, Theme};
use crate::config::ColorConfig;
use crate::graph::Ring;
use crate::graph::selection::OUTGOING_KIND;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	colors: &ColorConfig,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = state.positions();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, &scale, theme, colors, &positions);
	draw_particles(state, ctx, &scale, theme, colors, &positions);
	draw_nodes(state, ctx, &scale, theme, colors);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		state.width / 2.0,
		state.height / 2.0,
		state.width.min(state.height) * 0.3,
		state.width / 2.0,
		state.height / 2.0,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Stroke color for a link: its own attribute if set, the configured edge
/// color otherwise.
fn link_color(link: &LinkInfo, colors: &ColorConfig, alpha: f64) -> String {
	let css = link.color.as_deref().unwrap_or(colors.edge.as_str());
	match Color::parse(css) {
		Some(color) => color.with_alpha(color.a * alpha).to_css(),
		None => css.to_string(),
	}
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	colors: &ColorConfig,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	// Highlighted links last so they sit on top
	let (idle, lit): (Vec<&LinkInfo>, Vec<&LinkInfo>) = state
		.links()
		.iter()
		.partition(|l| !state.highlight.has_link(&l.id));

	for link in idle.into_iter().chain(lit) {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let highlighted = state.highlight.has_link(&link.id);
		let (alpha, width) = if highlighted {
			(theme.link.highlight_alpha, scale.highlight_width)
		} else {
			(theme.link.idle_alpha, scale.line_width * link.size.max(1.0))
		};
		let color = link_color(link, colors, alpha);
		let target_radius = scale.node_radius * link.target_size;

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(width);

		// Fast edges march towards their target
		let fast = link.kind.as_deref() == Some(OUTGOING_KIND);
		if fast {
			let dash = 6.0 / scale.k;
			let _ = ctx.set_line_dash(&js_sys::Array::of2(&dash.into(), &(dash * 0.6).into()));
			ctx.set_line_dash_offset(-state.flow_time * 20.0 / scale.k);
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(
			x2 - ux * (target_radius + scale.arrow_size),
			y2 - uy * (target_radius + scale.arrow_size),
		);
		ctx.stroke();

		if fast {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		if !scale.cull_arrows {
			let arrow_color = match Color::parse(&color) {
				Some(c) => c.with_alpha(c.a * scale.arrow_alpha).to_css(),
				None => color.clone(),
			};
			ctx.set_fill_style_str(&arrow_color);

			let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_particles(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	colors: &ColorConfig,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	if state.highlight.links().is_empty() {
		return;
	}
	let radius = theme.particles.radius / scale.k;
	ctx.set_fill_style_str(&colors.particle);

	for link in state.links().iter().filter(|l| state.highlight.has_link(&l.id)) {
		let (Some(&a), Some(&b)) = (positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		for (x, y) in particle_positions(&theme.particles, a, b, state.flow_time) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	colors: &ColorConfig,
) {
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let radius = scale.node_radius * info.size;

		// Ring is painted first and the body over it, leaving a halo
		let (ring_color, ring_mult) = match state.highlight.ring(&info.id) {
			Ring::Hovered => (&colors.hovered_ring, scale.ring_highlight),
			Ring::Neighbor => (&colors.neighbor_ring, scale.ring_highlight),
			Ring::Idle => (&colors.idle_ring, scale.ring_idle),
		};
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius * ring_mult, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(ring_color);
		ctx.fill();

		draw_node_body(ctx, info, x, y, radius, theme);

		if scale.show_labels {
			ctx.set_fill_style_str(&theme.node.label_color.to_css());
			ctx.set_font(&scale.label_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("top");
			let _ = ctx.fill_text(&info.id, x, y + radius * scale.ring_highlight + 2.0 / scale.k);
		}
	});
}

fn draw_node_body(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	radius: f64,
	theme: &Theme,
) {
	let parsed = Color::parse(&info.color);
	let gradient = match parsed {
		Some(base) if theme.node.use_gradient => ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok()
			.map(|g| (g, base)),
		_ => None,
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some((gradient, base)) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color),
	}
	ctx.fill();
}
