//! Linear API data models
//!
//! Domain types exchanged with the Linear GraphQL API, organized by resource.

mod label;
mod viewer;

pub use label::{
    IssueLabel, IssueLabelCreateInput, IssueLabelRef, IssueLabelUpdateInput, LabelTeam,
};
pub use viewer::Viewer;
