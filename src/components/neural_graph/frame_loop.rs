//! Lifetime tracking for per-instance frame loops.
//!
//! Mounting a graph schedules a `requestAnimationFrame` chain and a window
//! resize listener. Both must be torn down when the component unmounts, or a
//! long-lived page accumulates loops that keep redrawing detached canvases.
//!
//! Teardown closures hold JS callbacks and cannot leave the UI thread, so they
//! live in a thread-local registry. Cleanup hooks only carry the `Copy`
//! [`LoopId`] and call [`stop`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

thread_local! {
	static LOOPS: RefCell<HashMap<u64, Box<dyn FnOnce()>>> = RefCell::new(HashMap::new());
	static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Identifies one component instance's loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopId(u64);

impl LoopId {
	/// Allocates a fresh id. Nothing is active until [`register`] is called.
	pub fn new() -> Self {
		NEXT_ID.with(|n| {
			let id = n.get();
			n.set(id + 1);
			LoopId(id)
		})
	}
}

impl Default for LoopId {
	fn default() -> Self {
		Self::new()
	}
}

/// Marks the loop `id` as running; `teardown` cancels its callbacks. A loop
/// already registered under `id` is stopped first.
pub fn register(id: LoopId, teardown: impl FnOnce() + 'static) {
	stop(id);
	LOOPS.with(|loops| {
		loops.borrow_mut().insert(id.0, Box::new(teardown));
	});
}

/// Whether `id` is registered and not yet stopped.
pub fn is_active(id: LoopId) -> bool {
	LOOPS.with(|loops| loops.borrow().contains_key(&id.0))
}

/// Runs the teardown of `id`. Returns false if nothing was running.
pub fn stop(id: LoopId) -> bool {
	// Release the registry borrow before running the teardown.
	let teardown = LOOPS.with(|loops| loops.borrow_mut().remove(&id.0));
	match teardown {
		Some(teardown) => {
			teardown();
			true
		}
		None => false,
	}
}

/// Number of loops registered and not yet stopped on this thread.
pub fn active_loops() -> usize {
	LOOPS.with(|loops| loops.borrow().len())
}
