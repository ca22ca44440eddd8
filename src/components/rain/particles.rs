//! Fixed-size pool of falling raindrops.

use super::config::{RainConfig, Span};
use super::random::RandomSource;
use super::surface::Dimensions;

/// A single falling streak.
#[derive(Clone, Debug, PartialEq)]
pub struct Raindrop {
	/// Horizontal position, fixed for the drop's lifetime.
	pub x: f64,
	/// Leading edge. Negative while the drop is still above the surface.
	pub y: f64,
	/// Streak length in pixels.
	pub length: f64,
	/// Pixels fallen per unit step. Always positive.
	pub speed: f64,
	/// Base alpha in `(0, 1)`, scaled by the style's intensity when drawn.
	pub opacity: f64,
	/// Stroke thickness in pixels.
	pub width: f64,
}

impl Raindrop {
	/// Move the drop down by `speed * step`.
	pub fn fall(&mut self, step: f64) {
		self.y += self.speed * step;
	}

	/// Whether the leading edge is past `height`.
	pub fn is_below(&self, height: f64) -> bool {
		self.y > height
	}
}

/// Value ranges new drops are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRanges {
	/// See [`RainConfig::speed_range`].
	pub speed: Span,
	/// See [`RainConfig::length_range`].
	pub length: Span,
	/// See [`RainConfig::width_range`].
	pub width: Span,
	/// See [`RainConfig::opacity_range`].
	pub opacity: Span,
	/// New drops start up to this far above the top edge.
	pub top_offset: f64,
}

impl From<&RainConfig> for SpawnRanges {
	fn from(config: &RainConfig) -> Self {
		Self {
			speed: config.speed_range,
			length: config.length_range,
			width: config.width_range,
			opacity: config.opacity_range,
			top_offset: config.spawn_top_offset,
		}
	}
}

impl SpawnRanges {
	/// A fresh drop somewhere across `bounds.width`, strictly above the top edge.
	pub fn spawn<R: RandomSource + ?Sized>(&self, bounds: Dimensions, rng: &mut R) -> Raindrop {
		let x = bounds.width * rng.unit();
		// 1 - u lies in (0, 1], so y lands in [-top_offset, 0).
		let y = -self.top_offset * (1.0 - rng.unit());
		Raindrop {
			x,
			y,
			length: rng.within(self.length),
			speed: rng.within(self.speed),
			opacity: rng.within(self.opacity),
			width: rng.within(self.width),
		}
	}
}

/// Ordered, fixed-cardinality collection of drops.
///
/// Slots are only ever overwritten in place; the pool never grows or shrinks
/// after [`RainPool::initialize`].
#[derive(Clone, Debug)]
pub struct RainPool {
	drops: Vec<Raindrop>,
	respawns: Vec<u32>,
	ranges: SpawnRanges,
}

impl RainPool {
	/// `count` freshly spawned drops.
	pub fn initialize<R: RandomSource + ?Sized>(
		count: usize,
		ranges: SpawnRanges,
		bounds: Dimensions,
		rng: &mut R,
	) -> Self {
		let drops = (0..count).map(|_| ranges.spawn(bounds, rng)).collect();
		Self {
			drops,
			respawns: vec![0; count],
			ranges,
		}
	}

	/// Number of slots. Fixed for the pool's lifetime.
	pub fn len(&self) -> usize {
		self.drops.len()
	}

	/// True only for a pool initialized with zero drops.
	pub fn is_empty(&self) -> bool {
		self.drops.is_empty()
	}

	/// All drops in slot order.
	pub fn drops(&self) -> &[Raindrop] {
		&self.drops
	}

	/// The drop in slot `index`.
	pub fn get(&self, index: usize) -> Option<&Raindrop> {
		self.drops.get(index)
	}

	/// How many times slot `index` has been replaced since initialization.
	pub fn respawn_count(&self, index: usize) -> u32 {
		self.respawns.get(index).copied().unwrap_or(0)
	}

	/// Replace slot `index` with a fresh drop if it has fallen past
	/// `bounds.height`. Returns whether a replacement happened.
	pub fn replace_if_expired<R: RandomSource + ?Sized>(
		&mut self,
		index: usize,
		bounds: Dimensions,
		rng: &mut R,
	) -> bool {
		let Some(drop) = self.drops.get(index) else {
			return false;
		};
		if !drop.is_below(bounds.height) {
			return false;
		}
		self.drops[index] = self.ranges.spawn(bounds, rng);
		self.respawns[index] += 1;
		true
	}

	/// Run `step` on every drop in index order, then test that slot for
	/// expiry. Stops at the first error. Returns the number of replacements.
	pub fn for_each<R, E>(
		&mut self,
		bounds: Dimensions,
		rng: &mut R,
		mut step: impl FnMut(&mut Raindrop) -> Result<(), E>,
	) -> Result<usize, E>
	where
		R: RandomSource + ?Sized,
	{
		let mut replaced = 0;
		for index in 0..self.drops.len() {
			step(&mut self.drops[index])?;
			if self.replace_if_expired(index, bounds, rng) {
				replaced += 1;
			}
		}
		Ok(replaced)
	}
}

#[cfg(test)]
mod tests {
	use super::super::fakes::Midpoint;
	use super::super::random::SystemRandom;
	use super::*;

	fn bounds() -> Dimensions {
		Dimensions::new(400.0, 600.0)
	}

	#[test]
	fn test_midpoint_spawn() {
		let ranges = SpawnRanges::from(&RainConfig::default());
		let drop = ranges.spawn(bounds(), &mut Midpoint);
		assert_eq!(
			drop,
			Raindrop {
				x: 200.0,
				y: -50.0,
				length: 45.0,
				speed: 3.5,
				opacity: 0.35,
				width: 1.5,
			}
		);
	}

	#[test]
	fn test_spawn_starts_above_surface() {
		let ranges = SpawnRanges::from(&RainConfig::default());
		let mut rng = SystemRandom::seeded(3);
		for _ in 0..1000 {
			let drop = ranges.spawn(bounds(), &mut rng);
			assert!(drop.y < 0.0 && drop.y >= -100.0);
			assert!(drop.x >= 0.0 && drop.x < 400.0);
			assert!(drop.opacity > 0.0 && drop.opacity < 1.0);
			assert!(drop.speed > 0.0 && drop.length > 0.0 && drop.width > 0.0);
		}
	}

	#[test]
	fn test_replace_only_when_below() {
		let ranges = SpawnRanges::from(&RainConfig::default());
		let mut pool = RainPool::initialize(2, ranges, bounds(), &mut Midpoint);
		pool.drops[0].y = 600.0;
		pool.drops[1].y = 600.5;
		assert!(!pool.replace_if_expired(0, bounds(), &mut Midpoint));
		assert!(pool.replace_if_expired(1, bounds(), &mut Midpoint));
		assert_eq!(pool.get(1).unwrap().y, -50.0);
		assert_eq!(pool.respawn_count(0), 0);
		assert_eq!(pool.respawn_count(1), 1);
		assert!(!pool.replace_if_expired(9, bounds(), &mut Midpoint));
	}

	#[test]
	fn test_for_each_visits_in_order_and_keeps_size() {
		let ranges = SpawnRanges::from(&RainConfig::default());
		let mut pool = RainPool::initialize(5, ranges, bounds(), &mut Midpoint);
		for (i, drop) in pool.drops.iter_mut().enumerate() {
			drop.x = i as f64;
		}
		let mut seen = Vec::new();
		let replaced = pool
			.for_each(bounds(), &mut Midpoint, |drop| {
				seen.push(drop.x);
				drop.y = 1000.0;
				Ok::<(), ()>(())
			})
			.unwrap();
		assert_eq!(seen, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
		assert_eq!(replaced, 5);
		assert_eq!(pool.len(), 5);
		assert!(pool.drops().iter().all(|d| d.y < 0.0));
	}

	#[test]
	fn test_for_each_stops_on_error() {
		let ranges = SpawnRanges::from(&RainConfig::default());
		let mut pool = RainPool::initialize(3, ranges, bounds(), &mut Midpoint);
		let mut calls = 0;
		let result = pool.for_each(bounds(), &mut Midpoint, |_| {
			calls += 1;
			if calls == 2 { Err("boom") } else { Ok(()) }
		});
		assert_eq!(result, Err("boom"));
		assert_eq!(calls, 2);
	}
}
