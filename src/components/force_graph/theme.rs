//! Visual theming for the force graph.
//!
//! Colors that come from graph data (selection colors, ring colors) live in
//! [`ColorConfig`](crate::config::ColorConfig); this module holds the
//! look of everything else.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// `rgba(...)` string for canvas fill and stroke styles.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses `#rgb`, `#rrggbb`, `rgb()`/`rgba()` and the handful of named
	/// colors the viewer uses by default. Anything else is `None` and the
	/// caller should paint with the raw CSS string.
	pub fn parse(css: &str) -> Option<Self> {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			let channel = |s: &str| u8::from_str_radix(s, 16).ok();
			return match hex.len() {
				6 => Some(Self::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				3 => {
					let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
					Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
				}
				_ => None,
			};
		}
		if css.starts_with("rgb") {
			let inner = css
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')');
			let mut parts = inner.split(',').map(str::trim);
			let r = parts.next()?.parse().ok()?;
			let g = parts.next()?.parse().ok()?;
			let b = parts.next()?.parse().ok()?;
			let a = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
			return Some(Self::rgba(r, g, b, a));
		}
		match css {
			"black" => Some(Self::rgb(0, 0, 0)),
			"white" => Some(Self::rgb(255, 255, 255)),
			"red" => Some(Self::rgb(255, 0, 0)),
			"blue" => Some(Self::rgb(0, 0, 255)),
			"pink" => Some(Self::rgb(255, 192, 203)),
			"orange" => Some(Self::rgb(255, 165, 0)),
			_ => None,
		}
	}
}

/// Colors handed out to node groups in first-seen order.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Palette entries, reused cyclically.
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),
				Color::rgb(129, 161, 193),
				Color::rgb(100, 148, 160),
				Color::rgb(136, 160, 175),
				Color::rgb(108, 142, 173),
				Color::rgb(119, 158, 165),
				Color::rgb(143, 163, 180),
				Color::rgb(122, 153, 168),
			],
		}
	}

	/// Warm muted tones, easier to tell apart on large graphs
	pub fn sunset() -> Self {
		Self {
			colors: vec![
				Color::rgb(180, 120, 100),
				Color::rgb(170, 130, 95),
				Color::rgb(185, 145, 110),
				Color::rgb(165, 115, 90),
				Color::rgb(175, 125, 105),
				Color::rgb(160, 135, 100),
				Color::rgb(170, 140, 115),
				Color::rgb(155, 120, 95),
			],
		}
	}

	/// Entry `index`, wrapping around the palette.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Base fill, also the outer gradient stop
	pub color: Color,
	/// Secondary color for the radial gradient
	pub color_secondary: Color,
	/// Radial gradient instead of a flat fill
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Alpha of links outside the current highlight
	pub idle_alpha: f64,
	/// Alpha of highlighted links
	pub highlight_alpha: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Fill for node labels
	pub label_color: Color,
}

/// Directional particles drawn along highlighted links.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Particles per highlighted link
	pub count: usize,
	/// Fraction of the link travelled per second
	pub speed: f64,
	/// Radius in screen pixels
	pub radius: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name matched by [`Theme::named`].
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Link alphas.
	pub link: LinkStyle,
	/// Node bodies and labels.
	pub node: NodeStyle,
	/// Particles along highlighted links.
	pub particles: ParticleStyle,
	/// Group colors.
	pub palette: NodePalette,
}

impl Theme {
	/// Dark theme with gradient nodes (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			link: LinkStyle {
				idle_alpha: 0.3,
				highlight_alpha: 1.0,
			},
			node: NodeStyle {
				use_gradient: true,
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			particles: ParticleStyle {
				count: 4,
				speed: 0.5,
				radius: 2.0,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Flat fills, no gradients
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			background: BackgroundStyle {
				color: Color::rgb(25, 28, 35),
				color_secondary: Color::rgb(25, 28, 35),
				use_gradient: false,
				vignette: 0.0,
			},
			node: NodeStyle {
				use_gradient: false,
				label_color: Color::rgba(255, 255, 255, 0.7),
			},
			palette: NodePalette::sunset(),
			..Self::default_theme()
		}
	}

	/// Looks a theme up by name, falling back to the default.
	pub fn named(name: &str) -> Self {
		match name {
			"minimal" => Self::minimal(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
