//! Named parameters for the rain layer.
//!
//! Every tunable of the effect lives in [`RainConfig`]. The host may supply it
//! as JSON (camelCase keys, ranges as `[min, max]` arrays); missing keys take
//! the defaults below and unknown keys are rejected.

use serde::{Deserialize, Serialize};

use super::error::RainError;
use super::theme::RainStyle;

/// A closed-open numeric range `[min, max)`, serialized as `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Span {
	/// Inclusive lower bound.
	pub min: f64,
	/// Exclusive upper bound.
	pub max: f64,
}

impl Span {
	/// The range `[min, max)`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	fn check(&self, name: &str) -> Result<(), RainError> {
		if !self.min.is_finite() || !self.max.is_finite() {
			return Err(RainError::InvalidConfig(format!("{name} must be finite")));
		}
		if self.min > self.max {
			return Err(RainError::InvalidConfig(format!(
				"{name} is inverted: [{}, {}]",
				self.min, self.max
			)));
		}
		Ok(())
	}

	fn check_positive(&self, name: &str) -> Result<(), RainError> {
		self.check(name)?;
		if self.min <= 0.0 {
			return Err(RainError::InvalidConfig(format!(
				"{name} must be strictly positive, got min {}",
				self.min
			)));
		}
		Ok(())
	}
}

impl From<[f64; 2]> for Span {
	fn from([min, max]: [f64; 2]) -> Self {
		Self { min, max }
	}
}

impl From<Span> for [f64; 2] {
	fn from(span: Span) -> Self {
		[span.min, span.max]
	}
}

/// How far a drop falls per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Motion {
	/// `speed` pixels every tick, whatever the refresh rate. Faster on
	/// high-refresh displays.
	#[default]
	PerTick,
	/// `speed` pixels per 1/60 s of elapsed frame time.
	Elapsed,
}

/// Complete configuration of the rain layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RainConfig {
	/// Fixed number of drops in the pool.
	pub particle_count: usize,
	/// Pixels fallen per tick.
	pub speed_range: Span,
	/// Streak length in pixels.
	pub length_range: Span,
	/// Stroke thickness in pixels.
	pub width_range: Span,
	/// Base opacity, must sit inside `(0, 1)`.
	pub opacity_range: Span,
	/// Alpha of the overlay painted each tick instead of clearing.
	pub trail_fade_alpha: f64,
	/// Drops spawn with `y` in `[-spawnTopOffset, 0)`.
	pub spawn_top_offset: f64,
	/// How `speed` maps to displacement per frame.
	pub motion: Motion,
	/// Colors, glow and layer opacity.
	pub style: RainStyle,
}

impl Default for RainConfig {
	fn default() -> Self {
		Self {
			particle_count: 100,
			speed_range: Span::new(2.0, 5.0),
			length_range: Span::new(20.0, 70.0),
			width_range: Span::new(0.5, 2.5),
			opacity_range: Span::new(0.1, 0.6),
			trail_fade_alpha: 0.1,
			spawn_top_offset: 100.0,
			motion: Motion::PerTick,
			style: RainStyle::default(),
		}
	}
}

impl RainConfig {
	/// Parse and validate a JSON configuration.
	pub fn from_json(text: &str) -> Result<Self, RainError> {
		let config: Self =
			serde_json::from_str(text).map_err(|e| RainError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Check every parameter bound the engine relies on.
	pub fn validate(&self) -> Result<(), RainError> {
		if self.particle_count == 0 {
			return Err(RainError::InvalidConfig(
				"particleCount must be at least 1".into(),
			));
		}
		self.speed_range.check_positive("speedRange")?;
		self.length_range.check_positive("lengthRange")?;
		self.width_range.check_positive("widthRange")?;
		self.opacity_range.check_positive("opacityRange")?;
		if self.opacity_range.max >= 1.0 {
			return Err(RainError::InvalidConfig(format!(
				"opacityRange must stay below 1, got max {}",
				self.opacity_range.max
			)));
		}
		if !(self.trail_fade_alpha > 0.0 && self.trail_fade_alpha <= 1.0) {
			return Err(RainError::InvalidConfig(format!(
				"trailFadeAlpha must be in (0, 1], got {}",
				self.trail_fade_alpha
			)));
		}
		if !(self.spawn_top_offset.is_finite() && self.spawn_top_offset > 0.0) {
			return Err(RainError::InvalidConfig(format!(
				"spawnTopOffset must be positive, got {}",
				self.spawn_top_offset
			)));
		}
		self.check_style()
	}

	fn check_style(&self) -> Result<(), RainError> {
		let style = &self.style;
		if !(style.intensity.is_finite() && style.intensity >= 0.0) {
			return Err(RainError::InvalidConfig(format!(
				"style.intensity must be non-negative, got {}",
				style.intensity
			)));
		}
		if !(style.glow_blur.is_finite() && style.glow_blur >= 0.0) {
			return Err(RainError::InvalidConfig(format!(
				"style.glowBlur must be non-negative, got {}",
				style.glow_blur
			)));
		}
		for (name, value) in [
			("style.glowAlpha", style.glow_alpha),
			("style.layerOpacity", style.layer_opacity),
			("style.color.a", style.color.a),
			("style.trailColor.a", style.trail_color.a),
		] {
			if !(0.0..=1.0).contains(&value) {
				return Err(RainError::InvalidConfig(format!(
					"{name} must be in [0, 1], got {value}"
				)));
			}
		}
		Ok(())
	}
}
