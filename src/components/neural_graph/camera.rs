//! Pan/zoom camera mapping between screen pixels and world coordinates.
//!
//! `screen = world * k + (x, y)`. The physics step and all node positions live
//! in world space; pointer events arrive in screen space.

use serde::Deserialize;

/// Zoom limits and wheel step.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
	/// Smallest zoom factor reachable with the wheel.
	pub min_scale: f64,
	/// Largest zoom factor reachable with the wheel.
	pub max_scale: f64,
	/// Relative scale change per wheel event.
	pub step: f64,
}

impl ZoomConfig {
	/// Scale bounds must be positive and ordered, and a step must shrink the
	/// scale without flipping its sign.
	pub fn is_valid(&self) -> bool {
		self.min_scale > 0.0
			&& self.min_scale <= self.max_scale
			&& self.max_scale.is_finite()
			&& self.step > 0.0
			&& self.step < 1.0
	}
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.1,
			max_scale: 5.0,
			step: 0.1,
		}
	}
}

/// Affine camera transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	/// Pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl Camera {
	/// Maps a canvas pixel to world coordinates.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Maps a world point to canvas pixels.
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	/// Shifts the view by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Zooms one wheel step around the pointer so the world point under it
	/// stays put. Scrolling down (`delta_y > 0`) zooms out; a zero delta does
	/// nothing.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64, config: &ZoomConfig) {
		if delta_y == 0.0 || delta_y.is_nan() {
			return;
		}
		let direction = if delta_y > 0.0 { -1.0 } else { 1.0 };
		let factor = 1.0 + direction * config.step;
		let new_k = (self.k * factor).clamp(config.min_scale, config.max_scale);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}
