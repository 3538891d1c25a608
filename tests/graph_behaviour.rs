//! End-to-end behaviour of the graph state: rebuilds, physics and pointer
//! gestures driven the way the canvas component drives them.

use neural_graph::components::neural_graph::{
	GraphConfig, GraphState, LifeData, Link, NodeKind, Note, PointerInput, Task, Transaction,
	active_loops, frame_loop,
};

const EPS: f64 = 1e-9;

fn note(id: &str, content: &str, category: &str) -> Note {
	Note {
		id: id.into(),
		content: content.into(),
		category: category.into(),
	}
}

fn task(id: &str, title: &str, category: &str) -> Task {
	Task {
		id: id.into(),
		title: title.into(),
		category: category.into(),
	}
}

fn transaction(id: &str, title: &str, category: &str) -> Transaction {
	Transaction {
		id: id.into(),
		title: title.into(),
		category: category.into(),
	}
}

fn state() -> GraphState {
	GraphState::new(800.0, 600.0, GraphConfig::default(), 7)
}

/// Two unrelated notes placed far apart at known positions.
fn two_notes() -> (GraphState, LifeData) {
	let data = LifeData {
		notes: vec![note("a", "alpha", "Garden"), note("b", "beta", "Music")],
		..LifeData::default()
	};
	let mut s = state();
	s.rebuild(&data);
	place(&mut s, "n-a", 100.0, 100.0);
	place(&mut s, "n-b", 300.0, 300.0);
	(s, data)
}

fn place(s: &mut GraphState, id: &str, x: f64, y: f64) {
	let node = s.graph.node_mut(id).expect("node exists");
	node.x = x;
	node.y = y;
	node.vx = 0.0;
	node.vy = 0.0;
}

fn has_link(s: &GraphState, source: &str, target: &str) -> bool {
	s.graph
		.links
		.iter()
		.any(|l| l.source == source && l.target == target)
}

#[test]
fn empty_data_builds_and_ticks_an_empty_graph() {
	let mut s = state();
	s.rebuild(&LifeData::default());
	for _ in 0..60 {
		s.tick();
	}
	assert!(s.graph.nodes.is_empty());
	assert!(s.graph.links.is_empty());
	assert_eq!(s.fade.alpha(), 1.0);
}

#[test]
fn shared_categories_and_mentions_become_edges() {
	let data = LifeData {
		notes: vec![
			note("1", "Call Bob about the roof", "Work"),
			note("2", "quarterly numbers", "work"),
		],
		tasks: vec![task("1", "Call the bank", "Errands")],
		transactions: vec![transaction("1", "Rent", "Housing")],
	};
	let mut s = state();
	s.rebuild(&data);

	let ids: Vec<&str> = s.graph.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, ["n-1", "n-2", "t-1", "f-1"]);
	assert_eq!(s.graph.nodes[2].kind, NodeKind::Task);

	let group = s
		.graph
		.links
		.iter()
		.find(|l| l.source == "n-1" && l.target == "n-2")
		.expect("same category links");
	assert!((group.strength - 0.05).abs() < EPS);

	let mention = s
		.graph
		.links
		.iter()
		.find(|l| l.source == "n-1" && l.target == "t-1")
		.expect("note mentioning the task's first word links");
	assert!((mention.strength - 0.1).abs() < EPS);

	assert!(!has_link(&s, "n-2", "t-1"));
	assert!(s.graph.links.iter().all(|l| l.source != "f-1" && l.target != "f-1"));
}

#[test]
fn nested_categories_link_in_either_direction() {
	let data = LifeData {
		notes: vec![note("1", "x", "Health")],
		transactions: vec![transaction("1", "Gym", "health & fitness")],
		..LifeData::default()
	};
	let mut s = state();
	s.rebuild(&data);
	assert!(has_link(&s, "n-1", "f-1"));
}

#[test]
fn rebuild_keeps_surviving_positions_and_scatters_new_nodes() {
	let (mut s, mut data) = two_notes();
	s.graph.node_mut("n-a").expect("node").vx = 2.5;

	data.tasks.push(task("new", "Water plants", "Garden"));
	s.rebuild(&data);

	let a = s.graph.node("n-a").expect("survivor");
	assert_eq!((a.x, a.y, a.vx), (100.0, 100.0, 2.5));
	let b = s.graph.node("n-b").expect("survivor");
	assert_eq!((b.x, b.y), (300.0, 300.0));

	let fresh = s.graph.node("t-new").expect("new node");
	let (cx, cy) = s.center();
	assert!((fresh.x - cx).abs() <= 25.0 && (fresh.y - cy).abs() <= 25.0);
	assert!(fresh.vx.abs() <= 1.0 && fresh.vy.abs() <= 1.0);
}

#[test]
fn shift_drag_between_nodes_creates_a_persistent_link() {
	let (mut s, data) = two_notes();
	assert!(s.graph.links.is_empty());

	s.pointer_down(PointerInput::at(100.0, 100.0).with_link_modifier());
	assert_eq!(s.interaction.link_source_id(), Some("n-a"));
	assert_eq!(s.interaction.cursor(), "crosshair");
	s.pointer_move(PointerInput::at(200.0, 200.0));
	assert_eq!(s.interaction.link_cursor(), Some((200.0, 200.0)));
	assert_eq!(s.pointer_up(PointerInput::at(302.0, 298.0)), None);

	let expected = Link::new("n-a", "n-b", 0.1);
	assert_eq!(s.graph.links, vec![expected.clone()]);
	assert_eq!(s.graph.user_links, vec![expected.clone()]);
	assert_eq!(s.interaction.link_source_id(), None);

	s.rebuild(&data);
	assert!(s.graph.links.contains(&expected));
}

#[test]
fn link_released_on_background_or_source_adds_nothing() {
	let (mut s, _) = two_notes();

	s.pointer_down(PointerInput::at(100.0, 100.0).with_link_modifier());
	s.pointer_up(PointerInput::at(600.0, 50.0));
	s.pointer_down(PointerInput::at(100.0, 100.0).with_link_modifier());
	s.pointer_up(PointerInput::at(101.0, 101.0));

	assert!(s.graph.links.is_empty());
	assert!(s.graph.user_links.is_empty());
}

#[test]
fn dragged_node_stays_under_the_pointer_while_others_move() {
	let (mut s, _) = two_notes();

	s.pointer_down(PointerInput::at(100.0, 100.0));
	s.pointer_move(PointerInput::at(150.0, 120.0));
	let before_b = s.graph.node("n-b").cloned().expect("node");
	for _ in 0..30 {
		s.tick();
	}

	let a = s.graph.node("n-a").expect("node");
	assert_eq!((a.x, a.y, a.vx, a.vy), (150.0, 120.0, 0.0, 0.0));
	let b = s.graph.node("n-b").expect("node");
	assert!((b.x - before_b.x).abs() > EPS || (b.y - before_b.y).abs() > EPS);

	s.pointer_up(PointerInput::at(150.0, 120.0));
	s.tick();
	let a = s.graph.node("n-a").expect("node");
	assert!(a.x != 150.0 || a.y != 120.0, "released node rejoins the simulation");
}

#[test]
fn node_held_without_moving_stays_at_rest() {
	let (mut s, _) = two_notes();
	{
		let a = s.graph.node_mut("n-a").expect("node");
		a.vx = 3.0;
		a.vy = -2.0;
	}

	s.pointer_down(PointerInput::at(100.0, 100.0));
	for _ in 0..10 {
		s.tick();
		let a = s.graph.node("n-a").expect("node");
		assert_eq!((a.x, a.y, a.vx, a.vy), (100.0, 100.0, 0.0, 0.0));
	}
}

#[test]
fn tooltip_stays_hidden_after_a_gesture_ends_elsewhere() {
	let (mut s, _) = two_notes();
	s.pointer_move(PointerInput::at(100.0, 100.0));
	assert!(s.tooltip_node().is_some());

	s.pointer_down(PointerInput::at(500.0, 500.0));
	s.pointer_move(PointerInput::at(600.0, 550.0));
	s.pointer_up(PointerInput::at(600.0, 550.0));
	assert!(s.tooltip_node().is_none());
}

#[test]
fn invalid_page_config_cannot_break_the_camera() {
	let config: GraphConfig =
		serde_json::from_str(r#"{"interaction": {"zoom": {"min_scale": 6, "max_scale": 5}}}"#)
			.expect("well-formed json");
	let mut s = GraphState::new(800.0, 600.0, config, 3);
	for _ in 0..100 {
		s.wheel(10.0, 10.0, 120.0);
	}
	assert!((s.camera.k - 0.1).abs() < EPS);
	assert!(s.camera.x.is_finite() && s.camera.y.is_finite());
}

#[test]
fn short_press_is_a_click_and_long_drag_is_not() {
	let (mut s, _) = two_notes();

	s.pointer_down(PointerInput::at(100.0, 100.0));
	let clicked = s.pointer_up(PointerInput::at(103.0, 102.0));
	assert_eq!(clicked.map(|n| n.id), Some("n-a".to_string()));

	place(&mut s, "n-a", 100.0, 100.0);
	s.pointer_down(PointerInput::at(100.0, 100.0));
	s.pointer_move(PointerInput::at(110.0, 100.0));
	assert_eq!(s.pointer_up(PointerInput::at(110.0, 100.0)), None);

	s.pointer_down(PointerInput::at(500.0, 500.0));
	assert_eq!(s.pointer_up(PointerInput::at(500.0, 500.0)), None);
}

#[test]
fn background_drag_pans_the_camera() {
	let (mut s, _) = two_notes();
	s.pointer_down(PointerInput::at(500.0, 500.0));
	assert_eq!(s.interaction.cursor(), "move");
	s.pointer_move(PointerInput::at(520.0, 490.0));
	s.pointer_move(PointerInput::at(530.0, 480.0));
	s.pointer_up(PointerInput::at(530.0, 480.0));
	assert_eq!((s.camera.x, s.camera.y), (30.0, -20.0));
	assert_eq!(s.interaction.cursor(), "default");
}

#[test]
fn zoom_stays_in_bounds_and_keeps_the_pointer_anchored() {
	let mut s = state();
	let (px, py) = (420.0, 250.0);
	let anchor = s.camera.screen_to_world(px, py);

	for _ in 0..100 {
		s.wheel(px, py, -120.0);
	}
	assert!((s.camera.k - 5.0).abs() < EPS);
	let (wx, wy) = s.camera.screen_to_world(px, py);
	assert!((wx - anchor.0).abs() < 1e-6 && (wy - anchor.1).abs() < 1e-6);

	for _ in 0..100 {
		s.wheel(px, py, 120.0);
	}
	assert!((s.camera.k - 0.1).abs() < EPS);
	let (wx, wy) = s.camera.screen_to_world(px, py);
	assert!((wx - anchor.0).abs() < 1e-6 && (wy - anchor.1).abs() < 1e-6);

	let before = s.camera.clone();
	s.wheel(px, py, 0.0);
	assert_eq!(s.camera, before);
}

#[test]
fn hit_radius_grows_in_world_units_when_zoomed_out() {
	let (mut s, _) = two_notes();
	// At k = 0.5 the hit radius is 40 world units.
	s.camera.k = 0.5;
	let (sx, sy) = s.camera.world_to_screen(130.0, 100.0);
	s.pointer_down(PointerInput::at(sx, sy));
	assert_eq!(s.interaction.dragged_id(), Some("n-a"));
}

#[test]
fn removed_nodes_leave_no_dangling_edges_behind() {
	let (mut s, mut data) = two_notes();
	s.pointer_down(PointerInput::at(100.0, 100.0).with_link_modifier());
	s.pointer_up(PointerInput::at(300.0, 300.0));
	assert_eq!(s.graph.resolved_links().len(), 1);

	data.notes.retain(|n| n.id != "b");
	s.rebuild(&data);
	for _ in 0..10 {
		s.tick();
	}

	assert_eq!(s.graph.nodes.len(), 1);
	assert!(s.graph.resolved_links().is_empty());
	let a = s.graph.node("n-a").expect("node");
	assert!(a.x.is_finite() && a.y.is_finite());
}

#[test]
fn tooltip_only_shows_while_idle() {
	let (mut s, _) = two_notes();
	s.pointer_move(PointerInput::at(102.0, 100.0));
	assert_eq!(s.tooltip_node().map(|n| n.id.as_str()), Some("n-a"));

	s.pointer_down(PointerInput::at(102.0, 100.0));
	assert!(s.tooltip_node().is_none());

	s.pointer_leave();
	assert_eq!(s.interaction.dragged_id(), None);
	assert!(s.tooltip_node().is_none());
}

#[test]
fn leaving_mid_gesture_cancels_it() {
	let (mut s, _) = two_notes();
	s.pointer_down(PointerInput::at(100.0, 100.0).with_link_modifier());
	s.pointer_leave();
	assert_eq!(s.pointer_up(PointerInput::at(300.0, 300.0)), None);
	assert!(s.graph.user_links.is_empty());
}

#[test]
fn repeated_mount_and_unmount_leaves_no_running_loops() {
	let baseline = active_loops();
	for _ in 0..20 {
		let id = frame_loop::LoopId::new();
		frame_loop::register(id, || {});
		assert_eq!(active_loops(), baseline + 1);
		frame_loop::stop(id);
	}
	assert_eq!(active_loops(), baseline);
}
