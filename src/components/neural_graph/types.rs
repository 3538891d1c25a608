//! Host records consumed by the graph and the simulated node/edge types.

use serde::Deserialize;

/// A free-form note. Only the fields the graph reads are modelled; anything
/// else in the host payload is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Note {
	/// Host record id.
	pub id: String,
	/// Note text, used as the node label.
	pub content: String,
	/// Category assigned by the host (drives edge inference).
	pub category: String,
}

/// A to-do item.
#[derive(Clone, Debug, Deserialize)]
pub struct Task {
	/// Host record id.
	pub id: String,
	/// Task title, used as the node label.
	pub title: String,
	/// Category assigned by the host.
	pub category: String,
}

/// A finance transaction.
#[derive(Clone, Debug, Deserialize)]
pub struct Transaction {
	/// Host record id.
	pub id: String,
	/// Transaction description, used as the node label.
	pub title: String,
	/// Category assigned by the host.
	pub category: String,
}

/// The three collections the graph is built from.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LifeData {
	/// Notes, in display order.
	pub notes: Vec<Note>,
	/// Tasks, in display order.
	pub tasks: Vec<Task>,
	/// Transactions, in display order.
	pub transactions: Vec<Transaction>,
}

impl LifeData {
	/// Total number of records, i.e. the node count after a rebuild.
	pub fn len(&self) -> usize {
		self.notes.len() + self.tasks.len() + self.transactions.len()
	}

	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Which kind of record a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// A note.
	Note,
	/// A task.
	Task,
	/// A finance transaction.
	Finance,
}

impl NodeKind {
	/// Prefix used to build node ids (`n-42`, `t-7`, `f-3`).
	pub fn prefix(self) -> &'static str {
		match self {
			NodeKind::Note => "n",
			NodeKind::Task => "t",
			NodeKind::Finance => "f",
		}
	}

	/// Node radius in world units.
	pub fn radius(self) -> f64 {
		match self {
			NodeKind::Note => 8.0,
			NodeKind::Task => 6.0,
			NodeKind::Finance => 5.0,
		}
	}

	/// Lower-case kind name, shown upper-cased in the tooltip.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Note => "note",
			NodeKind::Task => "task",
			NodeKind::Finance => "finance",
		}
	}

	/// Graph id for a record of this kind, e.g. `n-42`.
	pub fn node_id(self, record_id: &str) -> String {
		format!("{}-{}", self.prefix(), record_id)
	}
}

/// One simulated particle.
///
/// Position and velocity are world-space and are owned by the physics step,
/// except while the node is dragged, when the interaction controller writes
/// the position and keeps the velocity at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// `<prefix>-<record id>`, unique within the graph.
	pub id: String,
	/// Record kind, drives color and radius.
	pub kind: NodeKind,
	/// Note content or task/transaction title.
	pub label: String,
	/// Lower-cased category, only used for edge inference.
	pub group: String,
	/// World position.
	pub x: f64,
	/// World position.
	pub y: f64,
	/// Velocity in world units per frame.
	pub vx: f64,
	/// Velocity in world units per frame.
	pub vy: f64,
}

impl GraphNode {
	/// Draw radius in world units.
	pub fn radius(&self) -> f64 {
		self.kind.radius()
	}

	/// Euclidean distance from this node to a world-space point.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
	}
}

/// Edge between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Reserved for weighting; the spring step currently ignores it.
	pub strength: f64,
}

impl Link {
	/// Edge between two node ids.
	pub fn new(source: impl Into<String>, target: impl Into<String>, strength: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			strength,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_ids_use_kind_prefix() {
		assert_eq!(NodeKind::Note.node_id("1"), "n-1");
		assert_eq!(NodeKind::Task.node_id("abc"), "t-abc");
		assert_eq!(NodeKind::Finance.node_id("9"), "f-9");
	}

	#[test]
	fn radius_depends_on_kind() {
		assert_eq!(NodeKind::Note.radius(), 8.0);
		assert_eq!(NodeKind::Task.radius(), 6.0);
		assert_eq!(NodeKind::Finance.radius(), 5.0);
	}

	#[test]
	fn life_data_ignores_extra_fields_and_missing_lists() {
		let json = r#"{
			"notes": [{"id": "1", "content": "Plan sprint", "category": "Work", "action": "todo"}],
			"tasks": [{"id": "2", "title": "Sprint review", "category": "work", "completed": false}]
		}"#;
		let data: LifeData = serde_json::from_str(json).unwrap();
		assert_eq!(data.notes.len(), 1);
		assert_eq!(data.tasks[0].title, "Sprint review");
		assert!(data.transactions.is_empty());
		assert_eq!(data.len(), 2);
	}
}
