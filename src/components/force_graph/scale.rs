//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the simulation. Values in
//!   world-space grow when zoomed in.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant
//!   regardless of zoom level.
//!
//! Drawing happens after the canvas transform, so every value exposed by
//! [`ScaledValues`] is in world-space.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Lower bound in screen pixels.
		min_screen: f64,
		/// Upper bound in screen pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "Constant variant available for custom alpha behaviors")]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, zero at `zero_alpha_k`.
	Fade {
		/// Zoom level at which the property disappears.
		zero_alpha_k: f64,
		/// Zoom level from which it is fully opaque.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Node sizing and hit testing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units, multiplied by node size.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Labels are hidden below this zoom level.
	pub label_min_k: f64,
	/// Ring radius as a multiple of node radius when highlighted.
	pub ring_highlight: f64,
	/// Ring radius as a multiple of node radius otherwise.
	pub ring_idle: f64,
}

/// Link widths and hit testing.
#[derive(Clone, Debug)]
pub struct LinkScaleConfig {
	/// Line width in screen pixels for a link of size 1.
	pub line_width: f64,
	/// Line width in screen pixels for highlighted links.
	pub highlight_width: f64,
	/// Pointer distance in screen pixels that counts as hovering a link.
	pub hover_tolerance: f64,
}

/// Arrowheads at the dependency end of each link.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
	/// How arrow alpha scales with zoom.
	pub alpha_behavior: AlphaBehavior,
	/// Minimum alpha to bother drawing.
	pub cull_alpha: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radius, hit area, labels and rings.
	pub node: NodeScaleConfig,
	/// Link widths and hover tolerance.
	pub link: LinkScaleConfig,
	/// Arrowheads.
	pub arrow: ArrowScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 5.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 8.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				label_size: 10.0,
				label_min_k: 0.5,
				ring_highlight: 1.4,
				ring_idle: 1.1,
			},
			link: LinkScaleConfig {
				line_width: 1.0,
				highlight_width: 3.0,
				hover_tolerance: 4.0,
			},
			arrow: ArrowScaleConfig {
				size: 5.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.3,
					full_alpha_k: 0.8,
				},
				cull_alpha: 0.05,
			},
		}
	}
}

/// Pre-computed world-space values for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space, before the per-node size factor.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Label font string (e.g., "10px sans-serif").
	pub label_font: String,
	/// Whether labels are drawn at this zoom.
	pub show_labels: bool,
	/// Width of an idle link of size 1.
	pub line_width: f64,
	/// Width of a highlighted link.
	pub highlight_width: f64,
	/// Distance from a link that still counts as hovering it.
	pub link_tolerance: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// Arrowhead alpha multiplier.
	pub arrow_alpha: f64,
	/// Arrowheads are skipped when this is set.
	pub cull_arrows: bool,
	/// Highlighted ring multiplier, copied from [`NodeScaleConfig`].
	pub ring_highlight: f64,
	/// Idle ring multiplier.
	pub ring_idle: f64,
}

impl ScaledValues {
	/// Computes every value for zoom level `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", config.node.label_size / k),
			show_labels: k >= config.node.label_min_k,
			line_width: config.link.line_width / k,
			highlight_width: config.link.highlight_width / k,
			link_tolerance: config.link.hover_tolerance / k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
			ring_highlight: config.node.ring_highlight,
			ring_idle: config.node.ring_idle,
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::zoomed_in(2.0, 5.0)]
	#[case::identity(1.0, 5.0)]
	#[case::zoomed_out_hits_floor(0.25, 12.0)]
	fn clamped_radius_keeps_minimum_screen_size(#[case] k: f64, #[case] expected: f64) {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: f64::INFINITY,
		};
		assert_eq!(behavior.apply(5.0, k), expected);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(4.0, 2.0), 2.0);
	}

	#[rstest]
	#[case(0.1, 0.0)]
	#[case(0.55, 0.5)]
	#[case(2.0, 1.0)]
	fn fade_interpolates_between_thresholds(#[case] k: f64, #[case] expected: f64) {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.3,
			full_alpha_k: 0.8,
		};
		assert!((fade.apply(k) - expected).abs() < 1e-9);
	}

	#[test]
	fn arrows_are_culled_when_zoomed_far_out() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 0.2);
		assert!(scaled.cull_arrows);
		assert!(!scaled.show_labels);
		let scaled = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert!(!scaled.cull_arrows);
		assert!(scaled.show_labels);
	}
}
