//! In-memory stand-ins for the browser seams, used by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::compositor::{DrawSurface, Streak};
use super::engine::FrameScheduler;
use super::error::RainError;
use super::random::RandomSource;

/// Always returns 0.5, so every sampled value is the midpoint of its range.
pub struct Midpoint;

impl RandomSource for Midpoint {
	fn unit(&mut self) -> f64 {
		0.5
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
	Fill { fill: String, w: f64, h: f64 },
	Streak { x: f64, top: f64, glow: bool },
}

/// Records draw calls. Clones share the log and the availability flag.
#[derive(Clone)]
pub struct RecordingCanvas {
	calls: Rc<RefCell<Vec<DrawCall>>>,
	available: Rc<Cell<bool>>,
	/// Streaks still accepted before every further one is rejected.
	accept_streaks: Rc<Cell<Option<usize>>>,
}

impl Default for RecordingCanvas {
	fn default() -> Self {
		Self {
			calls: Rc::default(),
			available: Rc::new(Cell::new(true)),
			accept_streaks: Rc::default(),
		}
	}
}

impl RecordingCanvas {
	pub fn calls(&self) -> Vec<DrawCall> {
		self.calls.borrow().clone()
	}

	pub fn clear(&self) {
		self.calls.borrow_mut().clear();
	}

	pub fn set_available(&self, available: bool) {
		self.available.set(available);
	}

	/// Accept `count` more streaks, then reject all of them. `None` accepts
	/// everything again.
	pub fn reject_streaks_after(&self, count: Option<usize>) {
		self.accept_streaks.set(count);
	}
}

impl DrawSurface for RecordingCanvas {
	fn is_available(&self) -> bool {
		self.available.get()
	}

	fn fill_rect(&mut self, fill: &str, _x: f64, _y: f64, w: f64, h: f64) -> Result<(), RainError> {
		self.calls.borrow_mut().push(DrawCall::Fill {
			fill: fill.to_string(),
			w,
			h,
		});
		Ok(())
	}

	fn stroke_streak(&mut self, streak: &Streak) -> Result<(), RainError> {
		match self.accept_streaks.get() {
			Some(0) => return Err(RainError::Canvas("rejected".into())),
			Some(n) => self.accept_streaks.set(Some(n - 1)),
			None => {}
		}
		self.calls.borrow_mut().push(DrawCall::Streak {
			x: streak.x,
			top: streak.top,
			glow: streak.glow.is_some(),
		});
		Ok(())
	}
}

/// Counts frame requests and cancellations instead of scheduling anything.
#[derive(Clone, Default)]
pub struct ManualScheduler {
	requests: Rc<Cell<usize>>,
	cancels: Rc<Cell<usize>>,
}

impl ManualScheduler {
	pub fn requests(&self) -> usize {
		self.requests.get()
	}

	pub fn cancels(&self) -> usize {
		self.cancels.get()
	}
}

impl FrameScheduler for ManualScheduler {
	fn request_frame(&mut self) -> Result<(), RainError> {
		self.requests.set(self.requests.get() + 1);
		Ok(())
	}

	fn cancel(&mut self) {
		self.cancels.set(self.cancels.get() + 1);
	}
}
