//! Resources managed by the Linear provider

pub mod team_label;

pub use team_label::TeamLabelResource;
