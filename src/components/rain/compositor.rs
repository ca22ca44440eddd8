//! Per-tick drawing: the trail overlay and the drop streaks.
//!
//! Each tick paints a translucent full-surface fill over the previous frame
//! instead of clearing it, so old streaks decay over a few frames. Drops are
//! then stroked with a vertical gradient that is transparent at both ends,
//! followed by a second stroke with a shadow blur for the glow.

use super::error::RainError;
use super::particles::Raindrop;
use super::surface::Dimensions;
use super::theme::RainStyle;

/// A gradient color stop at `offset` in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
	/// Position along the gradient.
	pub offset: f64,
	/// CSS color at this stop.
	pub color: String,
}

/// Shadow settings for the glow pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
	/// CSS shadow color.
	pub color: String,
	/// Shadow blur radius in pixels.
	pub blur: f64,
}

/// A vertical line stroked with a linear gradient along its length.
#[derive(Clone, Debug, PartialEq)]
pub struct Streak {
	/// Horizontal position of the line.
	pub x: f64,
	/// Start of the gradient, the drop's leading edge.
	pub top: f64,
	/// End of the gradient, `top + length`.
	pub bottom: f64,
	/// Line width in pixels.
	pub width: f64,
	/// Transparent, peak, transparent.
	pub stops: [GradientStop; 3],
	/// When set, the line is stroked a second time with this shadow.
	pub glow: Option<Glow>,
}

/// Drawing operations the rain layer needs from a 2D surface.
pub trait DrawSurface {
	/// Whether the surface can still be drawn on. Once this returns false
	/// the render loop stops.
	fn is_available(&self) -> bool;

	/// Fill the rectangle `(x, y, w, h)` with the CSS color `fill`.
	fn fill_rect(&mut self, fill: &str, x: f64, y: f64, w: f64, h: f64) -> Result<(), RainError>;

	/// Stroke `streak`, plus its glow pass if it has one.
	fn stroke_streak(&mut self, streak: &Streak) -> Result<(), RainError>;
}

/// Dim the previous frame by painting `style.trail_color` at `alpha` over
/// the whole surface.
pub fn fade_trail<C: DrawSurface + ?Sized>(
	canvas: &mut C,
	bounds: Dimensions,
	style: &RainStyle,
	alpha: f64,
) -> Result<(), RainError> {
	let fill = style.trail_color.with_alpha(alpha).to_css();
	canvas.fill_rect(&fill, 0.0, 0.0, bounds.width, bounds.height)
}

/// Build the streak for a drop: peak alpha in the middle, fading to zero at
/// both ends.
pub fn streak_for(drop: &Raindrop, style: &RainStyle) -> Streak {
	let peak = (drop.opacity * style.intensity).clamp(0.0, 1.0);
	let stop = |offset: f64, alpha: f64| GradientStop {
		offset,
		color: style.color.with_alpha(alpha).to_css(),
	};
	let glow = (style.glow_blur > 0.0).then(|| Glow {
		color: style.color.with_alpha(style.glow_alpha).to_css(),
		blur: style.glow_blur,
	});

	Streak {
		x: drop.x,
		top: drop.y,
		bottom: drop.y + drop.length,
		width: drop.width,
		stops: [stop(0.0, 0.0), stop(0.5, peak), stop(1.0, 0.0)],
		glow,
	}
}

pub fn draw_drop<C: DrawSurface + ?Sized>(
	canvas: &mut C,
	drop: &Raindrop,
	style: &RainStyle,
) -> Result<(), RainError> {
	canvas.stroke_streak(&streak_for(drop, style))
}
