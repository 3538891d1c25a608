//! Zoom-dependent sizes for hit testing and stroke widths.
//!
//! Drawing happens after the camera transform is applied, so every value here
//! is returned in world units. A size that must look constant on screen is
//! divided by the zoom factor `k`; a size that must never shrink below some
//! on-screen size is clamped.

use serde::Deserialize;

/// How a size reacts to the zoom level.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size in pixels.
	Screen,
	/// World-space size, clamped so its on-screen size stays within bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels; unbounded when omitted.
		#[serde(default = "unbounded")]
		max_screen: f64,
	},
}

fn unbounded() -> f64 {
	f64::INFINITY
}

impl ScaleBehavior {
	/// Clamp bounds must be non-negative and ordered; the upper one may be
	/// infinite.
	pub fn is_valid(&self) -> bool {
		match self {
			ScaleBehavior::World | ScaleBehavior::Screen => true,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => min_screen.is_finite() && *min_screen >= 0.0 && min_screen <= max_screen,
		}
	}

	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// A base size paired with its zoom behavior.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scaled {
	/// Size in world units at zoom 1.
	pub base: f64,
	/// How the size follows the zoom factor.
	pub behavior: ScaleBehavior,
}

impl Scaled {
	/// A size fixed in screen pixels.
	pub fn screen(base: f64) -> Self {
		Self {
			base,
			behavior: ScaleBehavior::Screen,
		}
	}

	/// Finite base with valid bounds.
	pub fn is_valid(&self) -> bool {
		self.base.is_finite() && self.behavior.is_valid()
	}

	/// World-space size at zoom `k`.
	pub fn at(&self, k: f64) -> f64 {
		self.behavior.apply(self.base, k)
	}
}

/// Sizes for every zoom-dependent element of the graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
	/// Pointer hit radius around node centers.
	pub hit_radius: Scaled,
	/// Edge stroke width.
	pub edge_width: Scaled,
	/// Link preview stroke width.
	pub preview_width: Scaled,
	/// Dash and gap length of the link preview.
	pub preview_dash: Scaled,
	/// Radius of the dot at the link preview end.
	pub preview_dot_radius: Scaled,
	/// Outline ring of dragged / link-source nodes.
	pub ring_width: Scaled,
	/// Stroke width of the ripple ring.
	pub ripple_width: Scaled,
}

impl ScaleConfig {
	/// Whether every size is usable.
	pub fn is_valid(&self) -> bool {
		[
			&self.hit_radius,
			&self.edge_width,
			&self.preview_width,
			&self.preview_dash,
			&self.preview_dot_radius,
			&self.ring_width,
			&self.ripple_width,
		]
		.iter()
		.all(|s| s.is_valid())
	}
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			// max(20, 20 / k): 20 world units, but never under 20px on screen
			hit_radius: Scaled {
				base: 20.0,
				behavior: ScaleBehavior::Clamped {
					min_screen: 20.0,
					max_screen: f64::INFINITY,
				},
			},
			edge_width: Scaled::screen(1.0),
			preview_width: Scaled::screen(1.5),
			preview_dash: Scaled::screen(5.0),
			preview_dot_radius: Scaled::screen(3.0),
			ring_width: Scaled::screen(2.0),
			ripple_width: Scaled::screen(1.0),
		}
	}
}

/// Pre-computed world-space sizes for one zoom level.
///
/// Create this once per frame and pass it to the drawing functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub hit_radius: f64,
	pub edge_width: f64,
	pub preview_width: f64,
	pub preview_dash: f64,
	pub preview_dot_radius: f64,
	pub ring_width: f64,
	pub ripple_width: f64,
}

impl ScaledValues {
	/// Resolves every size in `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			hit_radius: config.hit_radius.at(k),
			edge_width: config.edge_width.at(k),
			preview_width: config.preview_width.at(k),
			preview_dash: config.preview_dash.at(k),
			preview_dot_radius: config.preview_dot_radius.at(k),
			ring_width: config.ring_width.at(k),
			ripple_width: config.ripple_width.at(k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hit_radius_never_drops_below_twenty() {
		let config = ScaleConfig::default();
		assert_eq!(config.hit_radius.at(1.0), 20.0);
		assert_eq!(config.hit_radius.at(5.0), 20.0);
		assert_eq!(config.hit_radius.at(0.5), 40.0);
		assert!((config.hit_radius.at(0.1) - 200.0).abs() < 1e-9);
	}

	#[test]
	fn screen_sizes_divide_by_zoom() {
		let values = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(values.edge_width, 0.5);
		assert_eq!(values.preview_width, 0.75);
		assert_eq!(values.preview_dash, 2.5);
		assert_eq!(values.ring_width, 1.0);
	}

	#[test]
	fn world_sizes_ignore_zoom() {
		assert_eq!(ScaleBehavior::World.apply(7.0, 3.0), 7.0);
	}

	#[test]
	fn clamped_bound_can_be_omitted_in_json() {
		let behavior: ScaleBehavior =
			serde_json::from_str(r#"{"Clamped": {"min_screen": 10.0}}"#).unwrap();
		assert_eq!(behavior.apply(4.0, 1.0), 10.0);
		assert_eq!(behavior.apply(400.0, 1.0), 400.0);
	}

	#[test]
	fn inverted_clamp_bounds_are_invalid() {
		let inverted: ScaleBehavior =
			serde_json::from_str(r#"{"Clamped": {"min_screen": 30.0, "max_screen": 10.0}}"#).unwrap();
		assert!(!inverted.is_valid());
		let negative = ScaleBehavior::Clamped {
			min_screen: -1.0,
			max_screen: 10.0,
		};
		assert!(!negative.is_valid());
		assert!(ScaleConfig::default().is_valid());

		let config = ScaleConfig {
			hit_radius: Scaled {
				base: 20.0,
				behavior: inverted,
			},
			..ScaleConfig::default()
		};
		assert!(!config.is_valid());
	}
}
