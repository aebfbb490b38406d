//! Linear GraphQL API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
pub mod graphql;
pub mod linear;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use linear::LinearClient;
#[cfg(test)]
pub use mock::MockLinearClient;
use models::{IssueLabel, IssueLabelCreateInput, IssueLabelRef, IssueLabelUpdateInput, Viewer};

/// Linear API operations used by the provider
#[async_trait]
pub trait LinearApi: Send + Sync {
    /// Fetch the user that owns the API token.
    ///
    /// Used to verify a token before it is saved.
    async fn viewer(&self) -> Result<Viewer>;

    /// Create an issue label.
    async fn create_label(&self, input: IssueLabelCreateInput) -> Result<IssueLabel>;

    /// Fetch a label by ID.
    ///
    /// Returns `ApiError::NotFound` when the label does not exist.
    async fn get_label(&self, id: &str) -> Result<IssueLabel>;

    /// Update a label by ID.
    async fn update_label(&self, id: &str, input: IssueLabelUpdateInput) -> Result<IssueLabel>;

    /// Delete a label by ID.
    async fn delete_label(&self, id: &str) -> Result<()>;

    /// Find labels by exact name within the team with the given key.
    async fn find_team_labels(&self, name: &str, team_key: &str) -> Result<Vec<IssueLabelRef>>;
}
