//! Force-directed "neural graph" of notes, tasks and finance transactions.
//!
//! Renders an interactive graph on an HTML canvas with:
//! - Edges inferred from shared categories and note/task word matches
//! - A custom force simulation (repulsion, springs, centering, damping)
//! - Pan, pointer-anchored zoom, node dragging and shift-drag linking
//! - Glow, hover tooltip and a fade-in on mount
//!
//! Everything except [`component`] and [`render`] is plain Rust and can be
//! driven without a browser through [`GraphState`].
//!
//! # Example
//!
//! ```ignore
//! use neural_graph::{LifeData, NeuralGraph, NodeKind};
//!
//! let data = Signal::derive(move || life_data.clone());
//! let on_click = Callback::new(|node: GraphNode| match node.kind {
//!     NodeKind::Note => open_note(&node.id),
//!     NodeKind::Task => show_calendar(),
//!     NodeKind::Finance => show_finance(),
//! });
//!
//! view! { <NeuralGraph data=data on_node_click=on_click /> }
//! ```

pub mod builder;
pub mod camera;
mod component;
pub mod frame_loop;
pub mod interaction;
pub mod physics;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
pub mod types;

pub use builder::build_graph;
pub use camera::{Camera, ZoomConfig};
pub use component::NeuralGraph;
pub use frame_loop::active_loops;
pub use interaction::{Interaction, InteractionConfig, InteractionMode, PointerInput};
pub use physics::PhysicsConfig;
pub use scale::ScaleConfig;
pub use state::{Graph, GraphConfig, GraphState};
pub use theme::Theme;
pub use types::{GraphNode, LifeData, Link, NodeKind, Note, Task, Transaction};
