//! Display model implementations for table and JSON output
//!
//! Display models transform provider types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod label;
mod schema;

pub use label::LabelDisplay;
pub use schema::AttributeDisplay;
