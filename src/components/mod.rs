//! UI components.

pub mod rain;
