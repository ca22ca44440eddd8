//! Visual styling for the rain layer.
//!
//! Colors are kept as RGBA and converted to CSS strings at draw time.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`. Defaults to opaque when omitted from JSON.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// An opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// The same color with alpha replaced by `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// How drops and the trail overlay are painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RainStyle {
	/// Streak color. Its alpha channel is ignored; the gradient supplies alpha.
	pub color: Color,
	/// Multiplier from a drop's opacity to the gradient's peak alpha.
	pub intensity: f64,
	/// Alpha of the glow drawn around each streak.
	pub glow_alpha: f64,
	/// Shadow blur radius of the glow, in pixels (0 = no glow pass).
	pub glow_blur: f64,
	/// Fill used by the trail overlay; alpha comes from `trailFadeAlpha`.
	pub trail_color: Color,
	/// CSS opacity of the whole canvas layer.
	pub layer_opacity: f64,
}

impl Default for RainStyle {
	fn default() -> Self {
		Self {
			color: Color::rgb(255, 0, 0),
			intensity: 0.5,
			glow_alpha: 0.2,
			glow_blur: 5.0,
			trail_color: Color::rgb(0, 0, 0),
			layer_opacity: 0.8,
		}
	}
}
