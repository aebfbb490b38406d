//! Display models for CLI output
//!
//! Converts resource state and schemas into CLI-friendly display formats.

pub mod display;

pub use display::{AttributeDisplay, LabelDisplay};
