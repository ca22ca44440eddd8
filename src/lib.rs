//! rain-canvas: decorative falling-rain background layer for web pages.
//!
//! This crate provides a WASM canvas component that draws a continuous rain
//! effect behind page content. The animation engine is independent of the
//! browser and can be driven from tests with fake surfaces and schedulers.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::rain::{
	Color, Dimensions, DrawSurface, FrameScheduler, FrameStats, LoopState, Motion, RainCanvas,
	RainConfig, RainError, RainHandle, RainStyle, RandomSource, RenderLoop, Span, Surface,
	SystemRandom, attach,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("rain-canvas: logging initialized");
}

/// Load rain settings from a script element with id="rain-config".
/// Expected format: JSON matching [`RainConfig`], e.g. `{ "particleCount": 150 }`.
fn load_rain_config() -> Option<RainConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("rain-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match RainConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"rain-canvas: loaded config with {} drops",
				config.particle_count
			);
			Some(config)
		}
		Err(e) => {
			warn!("rain-canvas: ignoring rain-config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the optional page configuration and mounts the rain layer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_rain_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Rain" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<RainCanvas config=config />
	}
}
