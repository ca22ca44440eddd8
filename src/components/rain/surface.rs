//! Shared surface dimensions.
//!
//! The render loop reads the dimensions at the start of each tick while the
//! host's resize handler overwrites them between ticks. Both sides hold a
//! clone of the same [`Surface`].

use std::cell::Cell;
use std::rc::Rc;

/// Width and height of the drawable region in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent. Drops below it are respawned.
	pub height: f64,
}

impl Dimensions {
	/// Dimensions of `width` by `height`.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Handle to the current surface size. Cloning shares the underlying value.
#[derive(Clone, Debug, Default)]
pub struct Surface {
	dims: Rc<Cell<Dimensions>>,
}

impl Surface {
	/// A fresh, unshared surface of size `dims`.
	pub fn new(dims: Dimensions) -> Self {
		Self {
			dims: Rc::new(Cell::new(dims)),
		}
	}

	/// Latest dimensions, as last written by [`Surface::resize`].
	pub fn dimensions(&self) -> Dimensions {
		self.dims.get()
	}

	/// Overwrite the dimensions. In-flight drops are not repositioned; only
	/// future spawns and expiry checks see the new bounds.
	pub fn resize(&self, dims: Dimensions) {
		self.dims.set(dims);
	}
}
