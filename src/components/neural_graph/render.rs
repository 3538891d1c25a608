//! Canvas rendering for the neural graph.
//!
//! A frame is a pure projection of [`GraphState`]. Passes, back to front:
//! 1. Clear the whole canvas (screen space)
//! 2. Edges, then the link preview (world space)
//! 3. Nodes with glow, rings on the dragged / link-source node
//! 4. Hover tooltip (screen space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::ScaledValues;
use super::state::GraphState;
use super::theme::{Theme, TooltipStyle};
use super::types::GraphNode;

/// Height of the tooltip box in pixels.
const TOOLTIP_HEIGHT: f64 = 40.0;
const TOOLTIP_PADDING: f64 = 12.0;

/// Renders the complete graph to the canvas.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let cam = &state.camera;
	let scale = ScaledValues::new(&state.config.scale, cam.k);

	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_global_alpha(1.0);
	ctx.clear_rect(0.0, 0.0, state.width, state.height);

	let _ = ctx.set_transform(cam.k, 0.0, 0.0, cam.k, cam.x, cam.y);
	ctx.set_global_alpha(state.fade.alpha());

	draw_edges(state, ctx, &scale, theme);
	draw_link_preview(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	if let Some(node) = state.tooltip_node() {
		draw_tooltip(state, ctx, &theme.tooltip, node);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let (end, mid) = (theme.edge.end_color.to_css(), theme.edge.mid_color.to_css());
	ctx.set_line_width(scale.edge_width);

	for (s, t) in state.graph.resolved_links() {
		let gradient = ctx.create_linear_gradient(s.x, s.y, t.x, t.y);
		let _ = gradient.add_color_stop(0.0, &end);
		let _ = gradient.add_color_stop(0.5, &mid);
		let _ = gradient.add_color_stop(1.0, &end);
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);

		ctx.begin_path();
		ctx.move_to(s.x, s.y);
		ctx.line_to(t.x, t.y);
		ctx.stroke();
	}
}

fn draw_link_preview(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let interaction = &state.interaction;
	let (Some(source), Some((cx, cy))) = (
		interaction
			.link_source_id()
			.and_then(|id| state.graph.node(id)),
		interaction.link_cursor(),
	) else {
		return;
	};

	ctx.begin_path();
	ctx.move_to(source.x, source.y);
	ctx.line_to(cx, cy);
	ctx.set_stroke_style_str(&theme.preview.line_color.to_css());
	ctx.set_line_width(scale.preview_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.preview_dash),
		&JsValue::from_f64(scale.preview_dash),
	));
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.begin_path();
	let _ = ctx.arc(cx, cy, scale.preview_dot_radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.preview.dot_color.to_css());
	ctx.fill();
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	for node in &state.graph.nodes {
		let emphasized = state.interaction.is_emphasized(&node.id);
		let color = theme.node_color(node.kind).to_css();
		let radius = node.radius();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&color);
		ctx.set_shadow_color(&color);
		ctx.set_shadow_blur(glow_blur(theme, emphasized));
		ctx.fill();
		ctx.set_shadow_blur(0.0);

		if !emphasized {
			continue;
		}

		ctx.set_stroke_style_str(&theme.node.ring_color.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();

		ctx.begin_path();
		let _ = ctx.arc(
			node.x,
			node.y,
			radius * theme.node.ripple_scale,
			0.0,
			2.0 * PI,
		);
		ctx.set_stroke_style_str(&theme.node.ripple_color.to_css());
		ctx.set_line_width(scale.ripple_width);
		ctx.stroke();
	}
}

fn draw_tooltip(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	style: &TooltipStyle,
	node: &GraphNode,
) {
	let (kind, label) = tooltip_text(node, style.max_chars);
	let (sx, sy) = state.camera.world_to_screen(node.x, node.y);

	ctx.set_font(style.text_font);
	let label_width = ctx.measure_text(&label).map(|m| m.width()).unwrap_or(0.0);
	ctx.set_font(style.kind_font);
	let kind_width = ctx.measure_text(&kind).map(|m| m.width()).unwrap_or(0.0);

	let (left, top, width, height) = tooltip_box(sx, sy, label_width.max(kind_width));
	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(left, top, width, height);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, width, height);

	ctx.set_fill_style_str(&style.kind_color.to_css());
	let _ = ctx.fill_text(&kind, left + TOOLTIP_PADDING, top + 15.0);
	ctx.set_font(style.text_font);
	ctx.set_fill_style_str(&style.text_color.to_css());
	let _ = ctx.fill_text(&label, left + TOOLTIP_PADDING, top + 31.0);
}

/// Shadow blur behind a node fill.
pub fn glow_blur(theme: &Theme, emphasized: bool) -> f64 {
	if emphasized {
		theme.node.emphasized_glow_blur
	} else {
		theme.node.glow_blur
	}
}

/// Tooltip heading (upper-case kind) and truncated label.
pub fn tooltip_text(node: &GraphNode, max_chars: usize) -> (String, String) {
	(
		node.kind.label().to_uppercase(),
		truncate_label(&node.label, max_chars),
	)
}

/// Cuts `label` to at most `max_chars` characters, ending in `…` when cut.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
	if label.chars().count() <= max_chars {
		return label.to_string();
	}
	let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
	out.push('…');
	out
}

/// Screen rectangle `(left, top, width, height)` of a tooltip for text of the
/// given width, centered horizontally over the anchor and lifted above it.
pub fn tooltip_box(sx: f64, sy: f64, text_width: f64) -> (f64, f64, f64, f64) {
	let width = text_width + TOOLTIP_PADDING * 2.0;
	(sx - width / 2.0, sy - TOOLTIP_HEIGHT * 1.5, width, TOOLTIP_HEIGHT)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::neural_graph::types::NodeKind;

	#[test]
	fn emphasized_nodes_glow_brighter() {
		let theme = Theme::default();
		assert_eq!(glow_blur(&theme, false), 10.0);
		assert_eq!(glow_blur(&theme, true), 40.0);
	}

	#[test]
	fn short_labels_are_kept() {
		assert_eq!(truncate_label("Buy milk", 32), "Buy milk");
	}

	#[test]
	fn long_labels_are_cut_on_char_boundaries() {
		let cut = truncate_label("ünïcödé everywhere in this label", 8);
		assert_eq!(cut.chars().count(), 8);
		assert!(cut.ends_with('…'));
		assert!(cut.starts_with("ünïcödé"));
	}

	#[test]
	fn tooltip_shows_kind_and_label() {
		let node = GraphNode {
			id: "f-1".into(),
			kind: NodeKind::Finance,
			label: "Rent".into(),
			group: "housing".into(),
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
		};
		assert_eq!(tooltip_text(&node, 32), ("FINANCE".to_string(), "Rent".to_string()));
	}

	#[test]
	fn tooltip_box_sits_above_anchor() {
		let (left, top, width, height) = tooltip_box(100.0, 200.0, 56.0);
		assert_eq!(width, 80.0);
		assert_eq!(left, 60.0);
		assert_eq!(top + height, 200.0 - 20.0);
	}
}
