//! Leptos component mounting the rain layer.
//!
//! The component renders a fixed, full-viewport canvas that ignores pointer
//! events, attaches the render loop once the element is mounted, and
//! detaches it when the owning scope is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use super::config::RainConfig;
use super::host::{self, RainHandle};

/// Decorative rain drawn behind the page content.
///
/// Pass a [`RainConfig`] to tune the effect; defaults match the classic red
/// rain. An invalid configuration is logged and the layer stays blank.
#[component]
pub fn RainCanvas(#[prop(optional)] config: RainConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<RainHandle>>> = Rc::new(RefCell::new(None));
	let style = format!(
		"position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; opacity: {};",
		config.style.layer_opacity
	);

	let handle_init = handle.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let mut slot = handle_init.borrow_mut();
		if let Some(mut previous) = slot.take() {
			previous.detach();
		}
		match host::attach(canvas, config.clone()) {
			Ok(attached) => *slot = Some(attached),
			Err(e) => warn!("rain-canvas: not started: {}", e),
		}
	});

	let handle_cleanup = SendWrapper::new(handle);
	on_cleanup(move || {
		if let Some(mut attached) = RefCell::borrow_mut(&handle_cleanup).take() {
			attached.detach();
		}
	});

	view! { <canvas node_ref=canvas_ref class="rain-canvas" aria-hidden="true" style=style /> }
}
