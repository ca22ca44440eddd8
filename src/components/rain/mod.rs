//! Falling-rain background layer.
//!
//! Draws a fixed-size pool of gradient streaks onto a canvas, one tick per
//! display refresh, fading the previous frame instead of clearing it so each
//! drop leaves a short trail. Drops that fall past the bottom edge are
//! replaced in place by fresh ones spawned just above the top.
//!
//! The engine itself ([`RenderLoop`]) only talks to three seams: a
//! [`DrawSurface`], a [`FrameScheduler`] and a [`RandomSource`]. [`attach`]
//! implements them for the browser and returns a [`RainHandle`].
//!
//! # Example
//!
//! ```ignore
//! use rain_canvas::{RainCanvas, RainConfig};
//!
//! let config = RainConfig { particle_count: 150, ..RainConfig::default() };
//! view! { <RainCanvas config=config /> }
//! ```

mod component;
mod compositor;
mod config;
mod engine;
mod error;
#[cfg(test)]
mod fakes;
mod host;
mod particles;
mod random;
mod surface;
mod theme;

pub use component::RainCanvas;
pub use compositor::{DrawSurface, Glow, GradientStop, Streak};
pub use config::{Motion, RainConfig, Span};
pub use engine::{FrameScheduler, FrameStats, LoopState, RenderLoop};
pub use error::RainError;
pub use host::{RainHandle, attach};
pub use particles::{RainPool, Raindrop, SpawnRanges};
pub use random::{RandomSource, SystemRandom};
pub use surface::{Dimensions, Surface};
pub use theme::{Color, RainStyle};
