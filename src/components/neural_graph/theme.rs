//! Colors and glow settings for the graph.

use super::types::NodeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Edge stroke: a linear gradient faint at both ends and brighter mid-way.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Color at both endpoints.
	pub end_color: Color,
	/// Color at the midpoint.
	pub mid_color: Color,
}

/// Dashed preview line shown while drawing a link.
#[derive(Clone, Debug)]
pub struct PreviewStyle {
	/// Dashed preview line.
	pub line_color: Color,
	/// Dot under the cursor.
	pub dot_color: Color,
}

/// Node fill glow and the rings around dragged / link-source nodes.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Shadow blur of a resting node.
	pub glow_blur: f64,
	/// Shadow blur of the dragged or link-source node.
	pub emphasized_glow_blur: f64,
	/// Outline ring of an emphasized node.
	pub ring_color: Color,
	/// Outer ripple ring of an emphasized node.
	pub ripple_color: Color,
	/// Ripple ring radius as a multiple of the node radius.
	pub ripple_scale: f64,
}

/// Hover tooltip box, drawn in screen space.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
	/// Heading (node kind) color.
	pub kind_color: Color,
	/// Label color.
	pub text_color: Color,
	/// Heading font.
	pub kind_font: &'static str,
	/// Label font.
	pub text_font: &'static str,
	/// Labels longer than this many characters are cut with an ellipsis.
	pub max_chars: usize,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Note node fill.
	pub note: Color,
	/// Task node fill.
	pub task: Color,
	/// Transaction node fill.
	pub finance: Color,
	/// Edge gradient.
	pub edge: EdgeStyle,
	/// Link preview.
	pub preview: PreviewStyle,
	/// Glow and emphasis rings.
	pub node: NodeStyle,
	/// Hover tooltip.
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// Fill color for a node kind.
	pub fn node_color(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Note => self.note,
			NodeKind::Task => self.task,
			NodeKind::Finance => self.finance,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			note: Color::rgb(168, 85, 247),
			task: Color::rgb(59, 130, 246),
			finance: Color::rgb(16, 185, 129),
			edge: EdgeStyle {
				end_color: Color::rgba(255, 255, 255, 0.05),
				mid_color: Color::rgba(255, 255, 255, 0.1),
			},
			preview: PreviewStyle {
				line_color: Color::rgba(255, 255, 255, 0.4),
				dot_color: Color::rgba(255, 255, 255, 0.8),
			},
			node: NodeStyle {
				glow_blur: 10.0,
				emphasized_glow_blur: 40.0,
				ring_color: Color::rgb(255, 255, 255),
				ripple_color: Color::rgba(255, 255, 255, 0.2),
				ripple_scale: 2.0,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(24, 24, 27, 0.9),
				border: Color::rgba(255, 255, 255, 0.1),
				kind_color: Color::rgb(113, 113, 122),
				text_color: Color::rgb(255, 255, 255),
				kind_font: "10px sans-serif",
				text_font: "12px sans-serif",
				max_chars: 32,
			},
		}
	}
}
