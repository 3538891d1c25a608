//! Graph storage and the per-instance simulation state.
//!
//! `GraphState` is created once when the component mounts and mutated in
//! place by pointer handlers, data rebuilds and the frame loop. All of them
//! run on the UI thread, so the state lives behind a single `RefCell`.

use std::collections::HashMap;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;

use super::builder::build_graph;
use super::camera::Camera;
use super::interaction::{Interaction, InteractionConfig, PointerInput};
use super::physics::{self, PhysicsConfig};
use super::scale::ScaleConfig;
use super::types::{GraphNode, LifeData, Link};

/// All tunables of the graph, grouped by concern.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Force constants.
	pub physics: PhysicsConfig,
	/// Click threshold and zoom limits.
	pub interaction: InteractionConfig,
	/// Zoom-dependent sizes.
	pub scale: ScaleConfig,
}

impl GraphConfig {
	/// Replaces every section that would break the simulation or the camera
	/// (inverted or non-positive bounds, NaN constants) with its defaults.
	pub fn sanitized(self) -> Self {
		let physics = if self.physics.is_valid() {
			self.physics
		} else {
			warn!("neural-graph: invalid physics config {:?}, using defaults", self.physics);
			PhysicsConfig::default()
		};
		let interaction = if self.interaction.is_valid() {
			self.interaction
		} else {
			warn!(
				"neural-graph: invalid interaction config {:?}, using defaults",
				self.interaction
			);
			InteractionConfig::default()
		};
		let scale = if self.scale.is_valid() {
			self.scale
		} else {
			warn!("neural-graph: invalid scale config {:?}, using defaults", self.scale);
			ScaleConfig::default()
		};
		Self {
			physics,
			interaction,
			scale,
		}
	}
}

/// Nodes plus the live edge list and the user-drawn edges that survive rebuilds.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Notes, then tasks, then transactions.
	pub nodes: Vec<GraphNode>,
	/// Inferred edges followed by user edges.
	pub links: Vec<Link>,
	/// Edges drawn by shift-drag, re-appended on every rebuild.
	pub user_links: Vec<Link>,
}

impl Graph {
	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Mutable node with the given id.
	pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Adds an edge to both the live list and the persistent user list.
	pub fn add_user_link(&mut self, link: Link) {
		self.links.push(link.clone());
		self.user_links.push(link);
	}

	/// Links with both endpoints present, paired with their nodes.
	pub fn resolved_links(&self) -> Vec<(&GraphNode, &GraphNode)> {
		let index: HashMap<&str, &GraphNode> =
			self.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		self.links
			.iter()
			.filter_map(|l| Some((*index.get(l.source.as_str())?, *index.get(l.target.as_str())?)))
			.collect()
	}
}

/// Global opacity ramp applied for the first frames after mount.
#[derive(Clone, Debug, Default)]
pub struct FadeIn {
	alpha: f64,
}

impl FadeIn {
	/// Opacity gained per frame (fully visible after 50 frames).
	pub const STEP: f64 = 0.02;

	/// Steps the ramp by one frame, saturating at 1.
	pub fn advance(&mut self) {
		self.alpha = (self.alpha + Self::STEP).min(1.0);
	}

	/// Current global opacity.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}
}

/// Everything one graph instance owns.
pub struct GraphState {
	/// Nodes and edges.
	pub graph: Graph,
	/// Current pan and zoom.
	pub camera: Camera,
	/// Pointer gesture and hover.
	pub interaction: Interaction,
	/// Mount fade-in.
	pub fade: FadeIn,
	/// Validated tunables.
	pub config: GraphConfig,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	rng: SmallRng,
}

impl GraphState {
	/// Creates an empty graph for a canvas of the given size. `seed` drives
	/// the scatter of newly added nodes. Invalid config sections fall back to
	/// their defaults.
	pub fn new(width: f64, height: f64, config: GraphConfig, seed: u64) -> Self {
		Self {
			graph: Graph::default(),
			camera: Camera::default(),
			interaction: Interaction::default(),
			fade: FadeIn::default(),
			config: config.sanitized(),
			width,
			height,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Canvas pixel center. Centering gravity pulls toward this point in world
	/// units, independent of the camera.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Replaces the node set from fresh host data, keeping the layout of nodes
	/// that survive and re-appending user edges.
	pub fn rebuild(&mut self, data: &LifeData) {
		let center = self.center();
		let (nodes, links) = build_graph(
			data,
			&self.graph.nodes,
			&self.graph.user_links,
			center,
			&mut self.rng,
		);
		info!(
			"neural-graph: rebuilt {} nodes, {} links ({} user)",
			nodes.len(),
			links.len(),
			self.graph.user_links.len()
		);
		self.graph.nodes = nodes;
		self.graph.links = links;
	}

	/// One frame of simulation: advance the fade-in, then the physics.
	pub fn tick(&mut self) {
		self.fade.advance();
		let center = self.center();
		physics::step(
			&mut self.graph.nodes,
			&self.graph.links,
			self.interaction.dragged_id(),
			center,
			&self.config.physics,
		);
	}

	/// Records a new canvas size; the centering target follows it.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Mouse button pressed on the canvas.
	pub fn pointer_down(&mut self, input: PointerInput) {
		self.interaction
			.press(input, &mut self.graph, &self.camera, &self.config.scale);
	}

	/// Mouse moved over the canvas.
	pub fn pointer_move(&mut self, input: PointerInput) {
		self.interaction.move_to(
			input,
			&mut self.graph,
			&mut self.camera,
			&self.config.scale,
		);
	}

	/// Returns the clicked node, if the gesture was a click on a node.
	pub fn pointer_up(&mut self, input: PointerInput) -> Option<GraphNode> {
		self.interaction.release(
			input,
			&mut self.graph,
			&self.camera,
			&self.config.scale,
			&self.config.interaction,
		)
	}

	/// Mouse left the canvas.
	pub fn pointer_leave(&mut self) {
		self.interaction.leave();
	}

	/// Wheel event at a canvas pixel.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.camera
			.zoom_at(sx, sy, delta_y, &self.config.interaction.zoom);
	}

	/// Node whose tooltip should be drawn this frame.
	pub fn tooltip_node(&self) -> Option<&GraphNode> {
		self.interaction
			.tooltip_target()
			.and_then(|id| self.graph.node(id))
	}
}
