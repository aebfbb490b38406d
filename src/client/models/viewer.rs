//! Authenticated user model

use serde::{Deserialize, Serialize};

/// The user that owns the API token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    /// User ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
