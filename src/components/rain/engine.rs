//! The render loop driving the rain layer.
//!
//! [`RenderLoop`] is a two-state machine (Stopped, Running). Starting it on an
//! available surface fills the pool and runs one tick immediately. Every tick
//! then fades the previous frame, draws and advances each drop, respawns the
//! ones that fell off the bottom, and asks the [`FrameScheduler`] for the next
//! frame. The host calls [`RenderLoop::tick`] from its frame callback.
//!
//! The loop owns the canvas and the pool exclusively. The only state shared
//! with the outside is the [`Surface`] size, which the host may overwrite
//! between ticks.

use log::{debug, info, warn};

use super::compositor::{self, DrawSurface};
use super::config::{Motion, RainConfig};
use super::error::RainError;
use super::particles::{RainPool, SpawnRanges};
use super::random::RandomSource;
use super::surface::Surface;

/// Frame rate that `speed` is expressed against under [`Motion::Elapsed`].
const REFERENCE_FPS: f64 = 60.0;

/// Longest frame gap honored under [`Motion::Elapsed`]. Longer gaps (a
/// background tab, a debugger pause) are treated as this long.
const MAX_FRAME_SECONDS: f64 = 0.1;

/// Asks the host for one more tick on the next display refresh.
pub trait FrameScheduler {
	/// Schedule one call to [`RenderLoop::tick`].
	fn request_frame(&mut self) -> Result<(), RainError>;

	/// Drop any outstanding request. Must be safe to call with none pending.
	fn cancel(&mut self);
}

/// Whether the loop is currently scheduling ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// Not scheduling. The initial state, and the state after detach or a
	/// lost context.
	Stopped,
	/// A tick is either running or scheduled.
	Running,
}

/// Counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Ticks run since the last start.
	pub ticks: u64,
	/// Drops replaced after falling off the bottom.
	pub respawns: u64,
	/// Ticks whose drawing was cut short by a rejected draw call.
	pub skipped: u64,
}

/// Drives the pool and the compositor, one tick per scheduled frame.
///
/// Generic over the host seams: `C` draws, `S` schedules frames and `R`
/// randomizes new drops.
pub struct RenderLoop<C, S, R> {
	config: RainConfig,
	surface: Surface,
	canvas: C,
	scheduler: S,
	rng: R,
	pool: Option<RainPool>,
	state: LoopState,
	last_timestamp: Option<f64>,
	stats: FrameStats,
}

impl<C, S, R> RenderLoop<C, S, R>
where
	C: DrawSurface,
	S: FrameScheduler,
	R: RandomSource,
{
	/// A stopped loop. Nothing is drawn or scheduled until [`RenderLoop::start`].
	pub fn new(config: RainConfig, surface: Surface, canvas: C, scheduler: S, rng: R) -> Self {
		Self {
			config,
			surface,
			canvas,
			scheduler,
			rng,
			pool: None,
			state: LoopState::Stopped,
			last_timestamp: None,
			stats: FrameStats::default(),
		}
	}

	/// Current state.
	pub fn state(&self) -> LoopState {
		self.state
	}

	/// Shorthand for `state() == LoopState::Running`.
	pub fn is_running(&self) -> bool {
		self.state == LoopState::Running
	}

	/// The live pool, present only while running.
	pub fn pool(&self) -> Option<&RainPool> {
		self.pool.as_ref()
	}

	/// Counters for the current (or last) run.
	pub fn stats(&self) -> FrameStats {
		self.stats
	}

	/// Populate the pool and run the first tick.
	///
	/// Leaves the loop Stopped if the configuration is invalid or the canvas
	/// is not drawable. Starting a running loop does nothing.
	pub fn start(&mut self) -> Result<(), RainError> {
		if self.is_running() {
			return Ok(());
		}
		self.config.validate()?;
		if !self.canvas.is_available() {
			return Err(RainError::SurfaceUnavailable);
		}

		let bounds = self.surface.dimensions();
		self.pool = Some(RainPool::initialize(
			self.config.particle_count,
			SpawnRanges::from(&self.config),
			bounds,
			&mut self.rng,
		));
		self.state = LoopState::Running;
		self.last_timestamp = None;
		self.stats = FrameStats::default();
		info!(
			"rain-canvas: started {} drops on {}x{} surface",
			self.config.particle_count, bounds.width, bounds.height
		);

		self.tick(None);
		Ok(())
	}

	/// Run one frame. `timestamp` is the host's frame time in milliseconds,
	/// only consulted under [`Motion::Elapsed`].
	///
	/// A tick on a stopped loop does nothing, so a frame callback that races
	/// with [`RenderLoop::detach`] is harmless.
	pub fn tick(&mut self, timestamp: Option<f64>) -> LoopState {
		if !self.is_running() {
			return self.state;
		}

		let step = self.step_scale(timestamp);
		match self.render_frame(step) {
			Ok(()) => {}
			Err(RainError::Canvas(msg)) => {
				self.stats.skipped += 1;
				if self.stats.skipped == 1 {
					warn!("rain-canvas: skipping frame: {}", msg);
				} else {
					debug!("rain-canvas: skipping frame: {}", msg);
				}
			}
			Err(e) => {
				warn!("rain-canvas: stopping: {}", e);
				self.halt();
				return self.state;
			}
		}
		self.stats.ticks += 1;

		if let Err(e) = self.scheduler.request_frame() {
			warn!("rain-canvas: cannot schedule next frame: {}", e);
			self.halt();
		}
		self.state
	}

	/// Stop scheduling and release the pool. Returns false if already stopped.
	pub fn detach(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.halt();
		debug!(
			"rain-canvas: detached after {} ticks, {} respawns",
			self.stats.ticks, self.stats.respawns
		);
		true
	}

	fn halt(&mut self) {
		self.scheduler.cancel();
		self.pool = None;
		self.state = LoopState::Stopped;
	}

	fn step_scale(&mut self, timestamp: Option<f64>) -> f64 {
		match self.config.motion {
			Motion::PerTick => 1.0,
			Motion::Elapsed => {
				let previous = self.last_timestamp;
				if timestamp.is_some() {
					self.last_timestamp = timestamp;
				}
				match (previous, timestamp) {
					(Some(prev), Some(now)) => {
						((now - prev) / 1000.0).clamp(0.0, MAX_FRAME_SECONDS) * REFERENCE_FPS
					}
					_ => 1.0,
				}
			}
		}
	}

	/// Draw and advance every drop. A rejected draw call stops drawing for the
	/// rest of the frame but never stops the simulation, so every drop still
	/// falls and expired slots are still respawned. The first draw error is
	/// returned after the pass.
	fn render_frame(&mut self, step: f64) -> Result<(), RainError> {
		if !self.canvas.is_available() {
			return Err(RainError::ContextLost);
		}
		let bounds = self.surface.dimensions();
		let Some(pool) = self.pool.as_mut() else {
			return Ok(());
		};

		let mut draw_error = compositor::fade_trail(
			&mut self.canvas,
			bounds,
			&self.config.style,
			self.config.trail_fade_alpha,
		)
		.err();

		let (canvas, style) = (&mut self.canvas, &self.config.style);
		let respawned = pool.for_each(bounds, &mut self.rng, |drop| {
			if draw_error.is_none() {
				draw_error = compositor::draw_drop(canvas, drop, style).err();
			}
			drop.fall(step);
			Ok::<(), RainError>(())
		})?;
		self.stats.respawns += respawned as u64;

		match draw_error {
			Some(e) => Err(e),
			None => Ok(()),
		}
	}
}
