//! Per-frame force simulation.
//!
//! Each step applies pairwise repulsion, spring attraction along links and a
//! pull toward the viewport center, then integrates positions and damps
//! velocities. There is no timestep: one call is one frame. The layout only
//! has to look settled, not be physically correct.

use std::collections::HashMap;

use serde::Deserialize;

use super::types::{GraphNode, Link};

/// Tuning constants for [`step`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Numerator of the inverse-square repulsion.
	pub repulsion: f64,
	/// Lower bound for the squared distance in the repulsion term.
	pub min_distance_sq: f64,
	/// Spring rest length in world units.
	pub rest_length: f64,
	/// Force per unit of stretch beyond the rest length.
	pub spring_constant: f64,
	/// Fraction of the offset to the viewport center added to velocity.
	pub center_force: f64,
	/// Velocity multiplier applied after integration.
	pub damping: f64,
}

impl PhysicsConfig {
	/// Every constant must be finite and the distance floor positive, or a
	/// single step can turn positions into NaN.
	pub fn is_valid(&self) -> bool {
		[
			self.repulsion,
			self.min_distance_sq,
			self.rest_length,
			self.spring_constant,
			self.center_force,
			self.damping,
		]
		.iter()
		.all(|v| v.is_finite())
			&& self.min_distance_sq > 0.0
	}
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 150.0,
			min_distance_sq: 1.0,
			rest_length: 120.0,
			spring_constant: 0.04,
			center_force: 0.008,
			damping: 0.92,
		}
	}
}

/// Advances every node except `dragged` by one tick.
///
/// The dragged node neither receives force nor moves; it still pushes and
/// pulls the others from wherever the pointer put it. Links whose endpoints
/// are not in `nodes` are skipped.
pub fn step(
	nodes: &mut [GraphNode],
	links: &[Link],
	dragged: Option<&str>,
	center: (f64, f64),
	config: &PhysicsConfig,
) {
	let pinned = dragged.and_then(|id| nodes.iter().position(|n| n.id == id));
	let free = |i: usize| pinned != Some(i);

	// Repulsion
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			let (dx, dy) = (nodes[j].x - nodes[i].x, nodes[j].y - nodes[i].y);
			let dist_sq = (dx * dx + dy * dy).max(config.min_distance_sq);
			let dist = dist_sq.sqrt();
			let force = config.repulsion / dist_sq;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			if free(i) {
				nodes[i].vx -= fx;
				nodes[i].vy -= fy;
			}
			if free(j) {
				nodes[j].vx += fx;
				nodes[j].vy += fy;
			}
		}
	}

	// Springs
	let pairs: Vec<(usize, usize)> = {
		let index: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		links
			.iter()
			.filter_map(|l| Some((*index.get(l.source.as_str())?, *index.get(l.target.as_str())?)))
			.collect()
	};
	for (s, t) in pairs {
		let (dx, dy) = (nodes[t].x - nodes[s].x, nodes[t].y - nodes[s].y);
		let mut dist = (dx * dx + dy * dy).sqrt();
		if dist == 0.0 {
			dist = 1.0;
		}
		let force = (dist - config.rest_length) * config.spring_constant;
		let (fx, fy) = (dx / dist * force, dy / dist * force);
		if free(s) {
			nodes[s].vx += fx;
			nodes[s].vy += fy;
		}
		if free(t) {
			nodes[t].vx -= fx;
			nodes[t].vy -= fy;
		}
	}

	// Centering, integration, damping
	for (i, node) in nodes.iter_mut().enumerate() {
		if !free(i) {
			continue;
		}
		node.vx += (center.0 - node.x) * config.center_force;
		node.vy += (center.1 - node.y) * config.center_force;
		node.x += node.vx;
		node.y += node.vy;
		node.vx *= config.damping;
		node.vy *= config.damping;
	}
}
