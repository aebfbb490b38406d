//! Team label display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{display_value, truncate_string};
use crate::provider::State;

/// Longest description shown in a table cell
const DESCRIPTION_WIDTH: usize = 40;

/// Team label display model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LabelDisplay {
    /// Label ID
    #[tabled(rename = "ID")]
    pub id: String,

    /// Label name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Label description
    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    /// Label color
    #[tabled(rename = "COLOR")]
    pub color: String,

    /// Owning team ID
    #[tabled(rename = "TEAM ID")]
    pub team_id: String,
}

impl From<&State> for LabelDisplay {
    fn from(state: &State) -> Self {
        Self {
            id: display_value(state.get("id")),
            name: display_value(state.get("name")),
            description: truncate_string(&display_value(state.get("description")), DESCRIPTION_WIDTH),
            color: display_value(state.get("color")),
            team_id: display_value(state.get("team_id")),
        }
    }
}
