//! Pointer state machine: panning, node dragging, link drawing and hover.
//!
//! Every handler converts the pointer to world space with the current camera
//! and hit-tests nodes in order, taking the first node within the hit radius.
//! Misses fall through to hovering or panning; nothing here can fail.

use log::debug;
use serde::Deserialize;

use super::builder::LINK_STRENGTH;
use super::camera::{Camera, ZoomConfig};
use super::scale::ScaleConfig;
use super::state::Graph;
use super::types::{GraphNode, Link};

/// Pointer behavior settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
	/// A drag shorter than this many screen pixels counts as a click.
	pub click_threshold: f64,
	/// Wheel zoom limits and step.
	pub zoom: ZoomConfig,
}

impl InteractionConfig {
	/// Whether the threshold is usable and the zoom bounds are valid.
	pub fn is_valid(&self) -> bool {
		self.click_threshold.is_finite() && self.click_threshold >= 0.0 && self.zoom.is_valid()
	}
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			click_threshold: 5.0,
			zoom: ZoomConfig::default(),
		}
	}
}

/// A pointer event position in canvas pixels, plus whether the link modifier
/// (shift) is held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Shift held: a press on a node starts a link instead of a drag.
	pub link_modifier: bool,
}

impl PointerInput {
	/// Plain pointer position without modifiers.
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			link_modifier: false,
		}
	}

	/// Same position with shift held.
	pub fn with_link_modifier(self) -> Self {
		Self {
			link_modifier: true,
			..self
		}
	}
}

/// What the current pointer gesture is doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionMode {
	/// No button held.
	#[default]
	Idle,
	/// Background drag.
	Panning {
		/// Previous pointer x in pixels.
		last_x: f64,
		/// Previous pointer y in pixels.
		last_y: f64,
	},
	/// Node drag.
	Dragging {
		/// Node following the pointer.
		node_id: String,
		/// Pointer x at press, in pixels.
		press_x: f64,
		/// Pointer y at press, in pixels.
		press_y: f64,
	},
	/// Shift-drag from a node.
	Linking {
		/// Node the link starts from.
		source_id: String,
		/// Preview endpoint x in world space.
		cursor_x: f64,
		/// Preview endpoint y in world space.
		cursor_y: f64,
	},
}

/// Transient pointer state owned by one graph instance.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
	/// Gesture in progress.
	pub mode: InteractionMode,
	/// Node under the pointer while idle, for the tooltip.
	pub hovered: Option<String>,
}

/// Index of the first node within the hit radius of a screen position.
pub fn hit_test(
	nodes: &[GraphNode],
	camera: &Camera,
	scale: &ScaleConfig,
	sx: f64,
	sy: f64,
) -> Option<usize> {
	let (wx, wy) = camera.screen_to_world(sx, sy);
	let radius = scale.hit_radius.at(camera.k);
	nodes.iter().position(|n| n.distance_to(wx, wy) < radius)
}

impl Interaction {
	/// Id of the node being dragged.
	pub fn dragged_id(&self) -> Option<&str> {
		match &self.mode {
			InteractionMode::Dragging { node_id, .. } => Some(node_id),
			_ => None,
		}
	}

	/// Id of the node a link is being drawn from.
	pub fn link_source_id(&self) -> Option<&str> {
		match &self.mode {
			InteractionMode::Linking { source_id, .. } => Some(source_id),
			_ => None,
		}
	}

	/// Preview endpoint of an in-progress link, in world space.
	pub fn link_cursor(&self) -> Option<(f64, f64)> {
		match self.mode {
			InteractionMode::Linking {
				cursor_x, cursor_y, ..
			} => Some((cursor_x, cursor_y)),
			_ => None,
		}
	}

	/// Whether `id` is the dragged node or the link source.
	pub fn is_emphasized(&self, id: &str) -> bool {
		self.dragged_id() == Some(id) || self.link_source_id() == Some(id)
	}

	/// Node to show a tooltip for. Hidden during any gesture.
	pub fn tooltip_target(&self) -> Option<&str> {
		match self.mode {
			InteractionMode::Idle => self.hovered.as_deref(),
			_ => None,
		}
	}

	/// CSS cursor for the current mode.
	pub fn cursor(&self) -> &'static str {
		match self.mode {
			InteractionMode::Idle => "default",
			InteractionMode::Panning { .. } => "move",
			InteractionMode::Dragging { .. } => "grabbing",
			InteractionMode::Linking { .. } => "crosshair",
		}
	}

	/// Starts a gesture. Grabbing a node stops it dead so a press held
	/// without moving does not let it drift.
	pub fn press(&mut self, input: PointerInput, graph: &mut Graph, camera: &Camera, scale: &ScaleConfig) {
		self.hovered = None;
		self.mode = match hit_test(&graph.nodes, camera, scale, input.x, input.y) {
			Some(i) if input.link_modifier => {
				let (cursor_x, cursor_y) = camera.screen_to_world(input.x, input.y);
				InteractionMode::Linking {
					source_id: graph.nodes[i].id.clone(),
					cursor_x,
					cursor_y,
				}
			}
			Some(i) => {
				let node = &mut graph.nodes[i];
				node.vx = 0.0;
				node.vy = 0.0;
				InteractionMode::Dragging {
					node_id: node.id.clone(),
					press_x: input.x,
					press_y: input.y,
				}
			}
			None => InteractionMode::Panning {
				last_x: input.x,
				last_y: input.y,
			},
		};
	}

	/// Applies a pointer move to whatever gesture is active.
	pub fn move_to(
		&mut self,
		input: PointerInput,
		graph: &mut Graph,
		camera: &mut Camera,
		scale: &ScaleConfig,
	) {
		let (wx, wy) = camera.screen_to_world(input.x, input.y);
		match &mut self.mode {
			InteractionMode::Linking {
				cursor_x, cursor_y, ..
			} => {
				*cursor_x = wx;
				*cursor_y = wy;
			}
			InteractionMode::Dragging { node_id, .. } => {
				if let Some(node) = graph.node_mut(node_id) {
					node.x = wx;
					node.y = wy;
					node.vx = 0.0;
					node.vy = 0.0;
				}
			}
			InteractionMode::Panning { last_x, last_y } => {
				camera.pan_by(input.x - *last_x, input.y - *last_y);
				*last_x = input.x;
				*last_y = input.y;
			}
			InteractionMode::Idle => {
				self.hovered = hit_test(&graph.nodes, camera, scale, input.x, input.y)
					.map(|i| graph.nodes[i].id.clone());
			}
		}
	}

	/// Ends the gesture. Returns the node when a drag turned out to be a click.
	pub fn release(
		&mut self,
		input: PointerInput,
		graph: &mut Graph,
		camera: &Camera,
		scale: &ScaleConfig,
		config: &InteractionConfig,
	) -> Option<GraphNode> {
		self.hovered = None;
		match std::mem::take(&mut self.mode) {
			InteractionMode::Linking { source_id, .. } => {
				let target = hit_test(&graph.nodes, camera, scale, input.x, input.y)
					.map(|i| graph.nodes[i].id.clone())
					.filter(|id| *id != source_id);
				if let Some(target_id) = target {
					debug!("neural-graph: linked {} -> {}", source_id, target_id);
					graph.add_user_link(Link::new(source_id, target_id, LINK_STRENGTH));
				}
				None
			}
			InteractionMode::Dragging {
				node_id,
				press_x,
				press_y,
			} => {
				let moved = ((input.x - press_x).powi(2) + (input.y - press_y).powi(2)).sqrt();
				if moved < config.click_threshold {
					graph.node(&node_id).cloned()
				} else {
					None
				}
			}
			InteractionMode::Panning { .. } | InteractionMode::Idle => None,
		}
	}

	/// Pointer left the canvas: drop whatever gesture was in progress.
	pub fn leave(&mut self) {
		self.mode = InteractionMode::Idle;
		self.hovered = None;
	}
}
