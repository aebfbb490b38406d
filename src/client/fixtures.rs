//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{IssueLabel, LabelTeam};

/// Team ID used by fixtures unless overridden
pub const TEAM_ID: &str = "72b2a2dc-6f4f-4423-9d34-24b5bd10634a";

/// Second valid team ID for replacement scenarios
pub const OTHER_TEAM_ID: &str = "0d5a2b3c-1e2f-4a5b-8c9d-0e1f2a3b4c5d";

// ============================================================================
// IssueLabelBuilder
// ============================================================================

/// Builder for creating test IssueLabel instances.
///
/// # Example
/// ```ignore
/// let label = IssueLabelBuilder::new("lbl-1")
///     .name("Bug")
///     .color("#eb5757")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct IssueLabelBuilder {
    id: String,
    name: String,
    description: Option<String>,
    color: Option<String>,
    team_id: Option<String>,
}

impl IssueLabelBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Label {}", &id),
            id,
            description: None,
            color: Some("#bec2c8".to_string()),
            team_id: Some(TEAM_ID.to_string()),
        }
    }

    /// Set the label name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the owning team.
    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Make this a workspace label with no team.
    pub fn no_team(mut self) -> Self {
        self.team_id = None;
        self
    }

    /// Build the IssueLabel.
    pub fn build(self) -> IssueLabel {
        IssueLabel {
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
            team: self.team_id.map(|id| LabelTeam { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_builder_defaults() {
        let label = IssueLabelBuilder::new("lbl-1").build();

        assert_eq!(label.id, "lbl-1");
        assert_eq!(label.name, "Label lbl-1");
        assert!(label.description.is_none());
        assert_eq!(label.team.unwrap().id, TEAM_ID);
    }

    #[test]
    fn test_label_builder_overrides() {
        let label = IssueLabelBuilder::new("lbl-2")
            .name("Bug")
            .description("Broken things")
            .color("#eb5757")
            .no_team()
            .build();

        assert_eq!(label.name, "Bug");
        assert_eq!(label.description.as_deref(), Some("Broken things"));
        assert_eq!(label.color.as_deref(), Some("#eb5757"));
        assert!(label.team.is_none());
    }
}
