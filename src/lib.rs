//! neural-graph: Interactive force-directed graph of a personal life-OS.
//!
//! This crate provides a WASM-based canvas component that renders notes,
//! tasks and finance transactions as physically-simulated nodes, linked by
//! shared categories and user-drawn edges, with pan/zoom, drag and
//! shift-drag linking.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;

pub use components::neural_graph::{
	GraphConfig, GraphNode, GraphState, LifeData, Link, NeuralGraph, NodeKind, Note, PointerInput,
	Task, Transaction,
};

/// Element holding the host records as JSON.
pub const DATA_ELEMENT_ID: &str = "life-data";
/// Optional element holding a [`GraphConfig`] override as JSON.
pub const CONFIG_ELEMENT_ID: &str = "graph-config";

/// Failure to read embedded JSON from the page.
#[derive(Debug, Error)]
pub enum DataError {
	/// Not running in a browser page.
	#[error("no window or document available")]
	NoWindow,
	/// No element with the given id.
	#[error("element #{0} not found")]
	MissingElement(String),
	/// The element exists but holds no script text.
	#[error("element #{0} is not a <script>")]
	NotAScript(String),
	/// The payload is not valid for the expected type.
	#[error("invalid JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("neural-graph: logging initialized");
}

/// Parses a JSON payload embedded in the page.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, DataError> {
	Ok(serde_json::from_str(text)?)
}

fn script_text(id: &str) -> Result<String, DataError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(DataError::NoWindow)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| DataError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| DataError::NotAScript(id.to_string()))?;
	script.text().map_err(|_| DataError::NotAScript(id.to_string()))
}

/// Load host records from a script element with id="life-data".
/// Expected format: JSON with { notes: [...], tasks: [...], transactions: [...] }
pub fn load_life_data() -> Result<LifeData, DataError> {
	let data: LifeData = parse_json(&script_text(DATA_ELEMENT_ID)?)?;
	info!(
		"neural-graph: loaded {} notes, {} tasks, {} transactions",
		data.notes.len(),
		data.tasks.len(),
		data.transactions.len()
	);
	Ok(data)
}

/// Load graph tunables from a script element with id="graph-config".
/// Sections with unusable values are replaced by their defaults.
pub fn load_config() -> Result<GraphConfig, DataError> {
	let config: GraphConfig = parse_json(&script_text(CONFIG_ELEMENT_ID)?)?;
	Ok(config.sanitized())
}

/// Top-level views of the host dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
	/// Overview.
	Dashboard,
	/// Task schedule.
	Calendar,
	/// Transactions.
	Finance,
	/// The neural graph.
	#[default]
	Brain,
}

impl ViewState {
	fn title(self) -> &'static str {
		match self {
			ViewState::Dashboard => "Dashboard",
			ViewState::Calendar => "Calendar",
			ViewState::Finance => "Finance",
			ViewState::Brain => "Second Brain",
		}
	}
}

/// Where a node click takes the host: notes open in place, tasks and
/// transactions switch to their own view.
pub fn click_target(kind: NodeKind) -> Option<ViewState> {
	match kind {
		NodeKind::Note => None,
		NodeKind::Task => Some(ViewState::Calendar),
		NodeKind::Finance => Some(ViewState::Finance),
	}
}

/// Main application component.
/// Loads records and config from the DOM and renders the graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_life_data().unwrap_or_else(|e| {
		warn!("neural-graph: no life data ({}), starting empty", e);
		LifeData::default()
	});
	let config = match load_config() {
		Ok(config) => config,
		Err(DataError::MissingElement(_)) => GraphConfig::default(),
		Err(e) => {
			warn!("neural-graph: ignoring graph config: {}", e);
			GraphConfig::default()
		}
	};

	let life_data = RwSignal::new(data);
	let view = RwSignal::new(ViewState::default());
	let selected = RwSignal::new(None::<GraphNode>);

	let on_node_click = Callback::new(move |node: GraphNode| match click_target(node.kind) {
		Some(target) => {
			info!("neural-graph: {} -> {:?}", node.id, target);
			view.set(target);
		}
		None => selected.set(Some(node)),
	});

	let nav = [
		ViewState::Dashboard,
		ViewState::Calendar,
		ViewState::Finance,
		ViewState::Brain,
	]
	.into_iter()
	.map(|target| {
		view! {
			<button
				class="nav-item"
				class:active=move || view.get() == target
				on:click=move |_| view.set(target)
			>
				{target.title()}
			</button>
		}
	})
	.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Neural Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<nav class="app-nav">{nav}</nav>
		<main class="app-main">
			<Show
				when=move || view.get() == ViewState::Brain
				fallback=move || {
					view! {
						<section class="app-placeholder">
							<h1>{move || view.get().title()}</h1>
						</section>
					}
				}
			>
				<div class="fullscreen-graph">
					<NeuralGraph data=life_data config=config.clone() on_node_click=on_node_click />
				</div>
			</Show>
			{move || {
				selected
					.get()
					.map(|node| {
						view! {
							<aside class="note-detail">
								<button class="note-detail-close" on:click=move |_| selected.set(None)>
									"×"
								</button>
								<p class="note-detail-group">{node.group.clone()}</p>
								<p class="note-detail-content">{node.label.clone()}</p>
							</aside>
						}
					})
			}}
		</main>
	}
}
