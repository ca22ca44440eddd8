//! Error types for the rain layer.

use std::fmt;

/// Errors that can occur while attaching or running the rain layer.
#[derive(Clone, Debug, PartialEq)]
pub enum RainError {
	/// No drawable surface exists: the canvas is missing, detached from the
	/// document, or refused to hand out a 2D context.
	SurfaceUnavailable,
	/// The drawing context went away mid-run. Terminal for the current run.
	ContextLost,
	/// A single draw call was rejected. Only the current tick is skipped.
	Canvas(String),
	/// Configuration failed to parse or violates a parameter bound.
	InvalidConfig(String),
}

impl fmt::Display for RainError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RainError::SurfaceUnavailable => write!(f, "No drawable surface is available"),
			RainError::ContextLost => write!(f, "Drawing context was lost"),
			RainError::Canvas(msg) => write!(f, "Canvas call failed: {}", msg),
			RainError::InvalidConfig(msg) => write!(f, "Invalid rain configuration: {}", msg),
		}
	}
}

impl std::error::Error for RainError {}
