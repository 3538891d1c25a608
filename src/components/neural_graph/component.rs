//! Leptos component wrapping the neural graph canvas.
//!
//! The component creates a canvas, wires mouse and wheel handlers to the
//! interaction controller, and runs a `requestAnimationFrame` loop that steps
//! the physics and renders each frame. A second effect rebuilds the graph
//! whenever the host data signal changes. The loop and the resize listener
//! are torn down in `on_cleanup`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::frame_loop::{self, LoopId};
use super::interaction::PointerInput;
use super::render;
use super::state::{GraphConfig, GraphState};
use super::theme::Theme;
use super::types::{GraphNode, LifeData, NodeKind};

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

/// Renders the interactive neural graph of notes, tasks and transactions.
///
/// The graph is rebuilt whenever `data` changes; nodes that survive keep their
/// place. `on_node_click` fires when a node is pressed and released without
/// moving more than a few pixels. The canvas fills its parent container, or
/// the window when `fullscreen` is set.
#[component]
pub fn NeuralGraph(
	#[prop(into)] data: Signal<LifeData>,
	#[prop(optional)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let theme = Theme::default();
	let state = Rc::new(RefCell::new(GraphState::new(
		DEFAULT_WIDTH,
		DEFAULT_HEIGHT,
		config,
		js_sys::Date::now() as u64,
	)));
	let loop_id = LoopId::new();

	let (state_mount, theme_mount) = (state.clone(), theme.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if frame_loop::is_active(loop_id) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if !start_loop(loop_id, canvas, state_mount.clone(), theme_mount.clone(), fullscreen) {
			warn!("neural-graph: canvas unavailable, not animating");
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let data = data.get();
		state_data.borrow_mut().rebuild(&data);
	});

	on_cleanup(move || {
		frame_loop::stop(loop_id);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(input) = pointer(canvas_ref, &ev) else {
			return;
		};
		let cursor = {
			let mut s = state_md.borrow_mut();
			s.pointer_down(input);
			s.interaction.cursor()
		};
		set_cursor(canvas_ref, cursor);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(input) = pointer(canvas_ref, &ev) else {
			return;
		};
		state_mm.borrow_mut().pointer_move(input);
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(input) = pointer(canvas_ref, &ev) else {
			return;
		};
		let (clicked, cursor) = {
			let mut s = state_mu.borrow_mut();
			let clicked = s.pointer_up(input);
			(clicked, s.interaction.cursor())
		};
		set_cursor(canvas_ref, cursor);
		if let (Some(node), Some(callback)) = (clicked, on_node_click) {
			debug!("neural-graph: clicked {}", node.id);
			callback.run(node);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let cursor = {
			let mut s = state_ml.borrow_mut();
			s.pointer_leave();
			s.interaction.cursor()
		};
		set_cursor(canvas_ref, cursor);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(input) = pointer(canvas_ref, &ev) else {
			return;
		};
		state_wh.borrow_mut().wheel(input.x, input.y, ev.delta_y());
	};

	let legend = [NodeKind::Note, NodeKind::Task, NodeKind::Finance]
		.into_iter()
		.map(|kind| {
			let dot = format!(
				"display: inline-block; width: 8px; height: 8px; border-radius: 50%; background: {color}; box-shadow: 0 0 10px {glow};",
				color = theme.node_color(kind).to_css(),
				glow = theme.node_color(kind).with_alpha(0.5).to_css(),
			);
			view! {
				<div class="neural-graph-legend-item">
					<span style=dot></span>
					<span>{legend_name(kind)}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div
			class="neural-graph"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="neural-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: default;"
			/>
			<div
				class="neural-graph-hint"
				style="position: absolute; top: 16px; right: 16px; pointer-events: none; opacity: 0.5;"
			>
				"Scroll to Zoom • Drag to Pan • Shift+Drag to Link"
			</div>
			<div
				class="neural-graph-legend"
				style="position: absolute; bottom: 16px; right: 16px; pointer-events: none;"
			>
				{legend}
			</div>
		</div>
	}
}

/// Legend caption for each node kind.
fn legend_name(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Note => "Thought",
		NodeKind::Task => "Task",
		NodeKind::Finance => "Asset",
	}
}

/// Sizes the canvas, registers the resize listener and starts the frame
/// loop under `id`. Returns false when no window or 2d context is available.
fn start_loop(
	id: LoopId,
	canvas: HtmlCanvasElement,
	state: Rc<RefCell<GraphState>>,
	theme: Theme,
	fullscreen: bool,
) -> bool {
	let Some(window) = web_sys::window() else {
		return false;
	};
	let Some(ctx) = context_2d(&canvas) else {
		return false;
	};

	resize(&window, &canvas, &state, fullscreen);

	let (canvas_resize, state_resize) = (canvas.clone(), state.clone());
	let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
		if let Some(win) = web_sys::window() {
			resize(&win, &canvas_resize, &state_resize, fullscreen);
		}
	});
	let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

	let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id = Rc::new(Cell::new(0));
	let (frame_inner, frame_id_inner) = (frame.clone(), frame_id.clone());
	*frame.borrow_mut() = Some(Closure::new(move || {
		{
			let mut s = state.borrow_mut();
			s.tick();
			render::render(&s, &ctx, &theme);
		}
		if let (Some(cb), Some(win)) = (&*frame_inner.borrow(), web_sys::window()) {
			if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_id_inner.set(id);
			}
		}
	}));
	if let Some(ref cb) = *frame.borrow() {
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			frame_id.set(id);
		}
	}

	frame_loop::register(id, move || {
		if let Some(win) = web_sys::window() {
			let _ = win.cancel_animation_frame(frame_id.get());
			let _ = win.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
		}
		// Dropping the closure breaks its self-reference.
		frame.borrow_mut().take();
		debug!("neural-graph: frame loop stopped");
	});
	debug!("neural-graph: frame loop started");
	true
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Recomputes the canvas pixel size from its container (or the window).
fn resize(window: &Window, canvas: &HtmlCanvasElement, state: &RefCell<GraphState>, fullscreen: bool) {
	let (w, h) = if fullscreen {
		(
			window
				.inner_width()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(DEFAULT_WIDTH),
			window
				.inner_height()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(DEFAULT_HEIGHT),
		)
	} else {
		let parent = canvas.parent_element();
		let measure = |dim: Option<i32>, fallback: f64| match dim {
			Some(px) if px > 0 => px as f64,
			_ => fallback,
		};
		(
			measure(parent.as_ref().map(|p| p.client_width()), DEFAULT_WIDTH),
			measure(parent.as_ref().map(|p| p.client_height()), DEFAULT_HEIGHT),
		)
	};
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	state.borrow_mut().resize(w, h);
	debug!("neural-graph: canvas resized to {}x{}", w, h);
}

/// Pointer position relative to the canvas, with the link modifier state.
fn pointer(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<PointerInput> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(PointerInput {
		x: ev.client_x() as f64 - rect.left(),
		y: ev.client_y() as f64 - rect.top(),
		link_modifier: ev.shift_key(),
	})
}

fn set_cursor(canvas_ref: NodeRef<Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get_untracked() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}
