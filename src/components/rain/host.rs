//! Browser bindings for the render loop.
//!
//! Implements the engine's seams on top of `web-sys`: the canvas 2D context as
//! a [`DrawSurface`], `requestAnimationFrame` as a [`FrameScheduler`], and a
//! window `resize` listener that keeps the shared [`Surface`] and the canvas
//! backing store in step with the viewport. [`attach`] wires them together
//! and returns the [`RainHandle`] that tears everything down again.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::compositor::{DrawSurface, Streak};
use super::config::RainConfig;
use super::engine::{FrameScheduler, RenderLoop};
use super::error::RainError;
use super::random::SystemRandom;
use super::surface::{Dimensions, Surface};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type BrowserLoop = RenderLoop<BrowserCanvas, AnimationFrames, SystemRandom>;

/// Current viewport size, or `None` if the window refuses to report it.
pub fn viewport_size(window: &Window) -> Option<Dimensions> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some(Dimensions::new(width, height))
}

fn size_canvas(element: &HtmlCanvasElement, dims: Dimensions) {
	element.set_width(dims.width as u32);
	element.set_height(dims.height as u32);
}

fn js_message(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// A canvas element together with its 2D context.
pub struct BrowserCanvas {
	element: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl BrowserCanvas {
	pub fn new(element: HtmlCanvasElement) -> Result<Self, RainError> {
		let ctx: CanvasRenderingContext2d = element
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
			.ok_or(RainError::SurfaceUnavailable)?;
		Ok(Self { element, ctx })
	}
}

impl DrawSurface for BrowserCanvas {
	fn is_available(&self) -> bool {
		self.element.is_connected()
	}

	fn fill_rect(&mut self, fill: &str, x: f64, y: f64, w: f64, h: f64) -> Result<(), RainError> {
		self.ctx.set_fill_style_str(fill);
		self.ctx.fill_rect(x, y, w, h);
		Ok(())
	}

	fn stroke_streak(&mut self, streak: &Streak) -> Result<(), RainError> {
		let gradient = self
			.ctx
			.create_linear_gradient(streak.x, streak.top, streak.x, streak.bottom);
		for stop in &streak.stops {
			gradient
				.add_color_stop(stop.offset as f32, &stop.color)
				.map_err(|e| RainError::Canvas(js_message(e)))?;
		}

		self.ctx.begin_path();
		#[allow(deprecated)]
		self.ctx.set_stroke_style(&gradient);
		self.ctx.set_line_width(streak.width);
		self.ctx.move_to(streak.x, streak.top);
		self.ctx.line_to(streak.x, streak.bottom);
		self.ctx.stroke();

		if let Some(glow) = &streak.glow {
			self.ctx.set_shadow_color(&glow.color);
			self.ctx.set_shadow_blur(glow.blur);
			self.ctx.stroke();
			self.ctx.set_shadow_blur(0.0);
		}
		Ok(())
	}
}

/// Schedules ticks with `requestAnimationFrame`.
///
/// The callback slot is shared with [`attach`], which fills it once the
/// render loop exists and empties it on detach.
pub struct AnimationFrames {
	window: Window,
	callback: FrameCallback,
	pending: Option<i32>,
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&mut self) -> Result<(), RainError> {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Err(RainError::ContextLost);
		};
		let id = self
			.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| RainError::Canvas(js_message(e)))?;
		self.pending = Some(id);
		Ok(())
	}

	fn cancel(&mut self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}
}

/// Window `resize` listener resizing the canvas and the shared surface.
/// Removed on [`ResizeListener::remove`] or drop.
pub struct ResizeListener {
	window: Window,
	closure: Option<Closure<dyn FnMut()>>,
}

impl ResizeListener {
	pub fn install(
		window: &Window,
		element: HtmlCanvasElement,
		surface: Surface,
	) -> Result<Self, RainError> {
		let win = window.clone();
		let closure: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(dims) = viewport_size(&win) else {
				return;
			};
			size_canvas(&element, dims);
			surface.resize(dims);
		});
		window
			.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
			.map_err(|_| RainError::SurfaceUnavailable)?;
		Ok(Self {
			window: window.clone(),
			closure: Some(closure),
		})
	}

	/// Unregister the listener. Returns false if it was already removed.
	pub fn remove(&mut self) -> bool {
		let Some(closure) = self.closure.take() else {
			return false;
		};
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
		true
	}
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let _ = self.remove();
	}
}

struct Attached {
	render_loop: Rc<RefCell<BrowserLoop>>,
	resize: ResizeListener,
	callback: FrameCallback,
}

/// Keeps a running rain layer alive. Detaches on drop.
pub struct RainHandle {
	attached: Option<Attached>,
}

impl RainHandle {
	/// Stop the loop, cancel the pending frame and remove the resize
	/// listener. Calling it again does nothing and returns false.
	pub fn detach(&mut self) -> bool {
		let Some(mut attached) = self.attached.take() else {
			return false;
		};
		attached.render_loop.borrow_mut().detach();
		attached.resize.remove();
		// Dropping the closure breaks the loop -> scheduler -> closure cycle.
		let callback = attached.callback.borrow_mut().take();
		drop(callback);
		info!("rain-canvas: detached");
		true
	}
}

impl Drop for RainHandle {
	fn drop(&mut self) {
		let _ = self.detach();
	}
}

/// Size `element` to the viewport and start raining on it.
///
/// Fails with [`RainError::SurfaceUnavailable`] when there is no window or no
/// 2D context, and with [`RainError::InvalidConfig`] for a bad `config`. In
/// both cases nothing is left registered.
pub fn attach(element: HtmlCanvasElement, config: RainConfig) -> Result<RainHandle, RainError> {
	config.validate()?;
	let window = web_sys::window().ok_or(RainError::SurfaceUnavailable)?;
	let dims = viewport_size(&window).ok_or(RainError::SurfaceUnavailable)?;
	size_canvas(&element, dims);

	let canvas = BrowserCanvas::new(element.clone())?;
	let surface = Surface::new(dims);
	let resize = ResizeListener::install(&window, element, surface.clone())?;

	let callback: FrameCallback = Rc::new(RefCell::new(None));
	let scheduler = AnimationFrames {
		window,
		callback: callback.clone(),
		pending: None,
	};
	let render_loop = Rc::new(RefCell::new(RenderLoop::new(
		config,
		surface,
		canvas,
		scheduler,
		SystemRandom::from_host(),
	)));

	let render_loop_cb = render_loop.clone();
	*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
		// Frames never overlap, but guard against a callback sneaking in
		// while the loop is borrowed elsewhere.
		let Ok(mut render_loop) = render_loop_cb.try_borrow_mut() else {
			debug!("rain-canvas: frame skipped, loop busy");
			return;
		};
		render_loop.tick(Some(timestamp));
	}));

	let mut handle = RainHandle {
		attached: Some(Attached {
			render_loop: render_loop.clone(),
			resize,
			callback,
		}),
	};
	let started = render_loop.borrow_mut().start();
	if let Err(e) = started {
		handle.detach();
		return Err(e);
	}
	Ok(handle)
}
