//! Injected randomness for drop spawning.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::Span;

/// Source of uniform samples used to randomize new drops.
pub trait RandomSource {
	/// A uniform sample in `[0, 1)`.
	fn unit(&mut self) -> f64;

	/// A uniform sample in `[span.min, span.max)`, or exactly `min` for a
	/// degenerate span.
	fn within(&mut self, span: Span) -> f64 {
		span.min + (span.max - span.min) * self.unit()
	}
}

/// Production random source backed by a small, fast PRNG.
pub struct SystemRandom(SmallRng);

impl SystemRandom {
	/// A deterministic source, for reproducible runs.
	pub fn seeded(seed: u64) -> Self {
		Self(SmallRng::seed_from_u64(seed))
	}

	/// Seed from the host's `Math.random`. Only callable on the wasm target.
	pub fn from_host() -> Self {
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		Self::seeded(seed ^ js_sys::Date::now().to_bits())
	}
}

impl RandomSource for SystemRandom {
	fn unit(&mut self) -> f64 {
		self.0.random::<f64>()
	}
}
