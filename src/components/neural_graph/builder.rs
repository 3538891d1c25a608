//! Turns host collections into the node set and the inferred edge set.
//!
//! Runs once per data change, never per frame. Edge inference compares every
//! unordered pair of nodes, so cost is O(n²); that is fine for the low hundreds
//! of records a personal workspace holds but will not scale much past that.

use std::collections::HashMap;

use rand::Rng;

use super::types::{GraphNode, LifeData, Link, NodeKind};

/// Strength of an edge between nodes sharing (or nesting) a category.
pub const GROUP_LINK_STRENGTH: f64 = 0.05;
/// Strength of a note→task edge and of user-drawn edges.
pub const LINK_STRENGTH: f64 = 0.1;

/// Half-width of the square new nodes are scattered in around the center.
const SPAWN_SPREAD: f64 = 25.0;
/// Maximum initial speed per axis for new nodes.
const SPAWN_SPEED: f64 = 1.0;

/// Builds the node list and the full edge list (inferred edges followed by the
/// user edges).
///
/// Nodes whose id already exists in `previous` keep their position and
/// velocity so the layout does not jump on a data change. New nodes are placed
/// around `center` with a small random velocity.
pub fn build_graph<R: Rng>(
	data: &LifeData,
	previous: &[GraphNode],
	user_links: &[Link],
	center: (f64, f64),
	rng: &mut R,
) -> (Vec<GraphNode>, Vec<Link>) {
	let previous: HashMap<&str, &GraphNode> =
		previous.iter().map(|n| (n.id.as_str(), n)).collect();
	let mut nodes = Vec::with_capacity(data.len());

	let mut add_node = |kind: NodeKind, record_id: &str, label: &str, category: &str| {
		let id = kind.node_id(record_id);
		let (x, y, vx, vy) = match previous.get(id.as_str()) {
			Some(old) => (old.x, old.y, old.vx, old.vy),
			None => (
				center.0 + rng.gen_range(-SPAWN_SPREAD..=SPAWN_SPREAD),
				center.1 + rng.gen_range(-SPAWN_SPREAD..=SPAWN_SPREAD),
				rng.gen_range(-SPAWN_SPEED..=SPAWN_SPEED),
				rng.gen_range(-SPAWN_SPEED..=SPAWN_SPEED),
			),
		};
		nodes.push(GraphNode {
			id,
			kind,
			label: label.to_string(),
			group: category.to_lowercase(),
			x,
			y,
			vx,
			vy,
		});
	};

	for note in &data.notes {
		add_node(NodeKind::Note, &note.id, &note.content, &note.category);
	}
	for task in &data.tasks {
		add_node(NodeKind::Task, &task.id, &task.title, &task.category);
	}
	for tx in &data.transactions {
		add_node(NodeKind::Finance, &tx.id, &tx.title, &tx.category);
	}

	let mut links = infer_links(&nodes);
	links.extend(user_links.iter().cloned());
	(nodes, links)
}

/// Connects every unordered pair whose groups match or nest, plus every
/// note/task pair where the note mentions the task's first word.
pub fn infer_links(nodes: &[GraphNode]) -> Vec<Link> {
	let mut links = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			if groups_related(&a.group, &b.group) {
				links.push(Link::new(&a.id, &b.id, GROUP_LINK_STRENGTH));
			}
			let mention = match (a.kind, b.kind) {
				(NodeKind::Note, NodeKind::Task) => Some((a, b)),
				(NodeKind::Task, NodeKind::Note) => Some((b, a)),
				_ => None,
			};
			if let Some((note, task)) = mention {
				if note_mentions_task(&note.label, &task.label) {
					links.push(Link::new(&note.id, &task.id, LINK_STRENGTH));
				}
			}
		}
	}
	links
}

fn groups_related(a: &str, b: &str) -> bool {
	a == b || a.contains(b) || b.contains(a)
}

/// Case-sensitive substring test against the text before the first space.
/// A task title starting with a space has an empty first word, which every
/// note contains.
fn note_mentions_task(note_label: &str, task_label: &str) -> bool {
	let first_word = task_label.split(' ').next().unwrap_or_default();
	note_label.contains(first_word)
}
