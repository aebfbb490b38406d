//! Issue label models

use serde::{Deserialize, Serialize};

/// Issue label as returned by the `LabelFields` fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLabel {
    /// Label ID
    pub id: String,

    /// Label name
    pub name: String,

    /// Label description (optional)
    #[serde(default)]
    pub description: Option<String>,

    /// Label color as `#rrggbb` (optional)
    #[serde(default)]
    pub color: Option<String>,

    /// Owning team; workspace labels have none
    #[serde(default)]
    pub team: Option<LabelTeam>,
}

/// Team reference nested in a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTeam {
    /// Team ID
    pub id: String,
}

/// Minimal label reference returned by label searches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLabelRef {
    /// Label ID
    pub id: String,
}

/// Input for the `issueLabelCreate` mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLabelCreateInput {
    /// Label name
    pub name: String,

    /// Owning team ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,

    /// Label description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Label color; the server picks one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Input for the `issueLabelUpdate` mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLabelUpdateInput {
    /// Label name
    pub name: String,

    /// Label description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Label color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
