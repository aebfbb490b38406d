//! Mock Linear API client for testing
//!
//! Provides an in-memory implementation of [`LinearApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::LinearApi;
use super::models::{
    IssueLabel, IssueLabelCreateInput, IssueLabelRef, IssueLabelUpdateInput, LabelTeam, Viewer,
};
use crate::error::{ApiError, Result};

/// Color the mock server assigns when a label is created without one
pub const DEFAULT_COLOR: &str = "#bec2c8";

/// Mock API client for testing.
///
/// Behaves like a tiny in-memory Linear workspace: created labels get
/// sequential IDs and can be read, updated, deleted and searched.
///
/// # Example
/// ```ignore
/// let mock = MockLinearClient::new()
///     .with_team("team-1", "ENG")
///     .await
///     .with_labels(vec![IssueLabelBuilder::new("lbl-1").team("team-1").build()])
///     .await;
/// ```
#[derive(Default)]
pub struct MockLinearClient {
    /// Stored labels
    labels: Arc<Mutex<Vec<IssueLabel>>>,
    /// Team ID -> team key, used by label searches
    team_keys: Arc<Mutex<HashMap<String, String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured inputs for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Sequence for generated label IDs
    next_id: Arc<Mutex<usize>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub viewer: usize,
    pub create_label: usize,
    pub get_label: usize,
    pub update_label: usize,
    pub delete_label: usize,
    pub find_team_labels: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.viewer
            + self.create_label
            + self.get_label
            + self.update_label
            + self.delete_label
            + self.find_team_labels
    }
}

/// A captured mutation input for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    Create(IssueLabelCreateInput),
    Update { id: String, input: IssueLabelUpdateInput },
}

impl MockLinearClient {
    /// Create a new mock client with an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed labels into the workspace.
    pub async fn with_labels(self, labels: Vec<IssueLabel>) -> Self {
        *self.labels.lock().await = labels;
        self
    }

    /// Register a team key so label searches can resolve it.
    pub async fn with_team(self, team_id: &str, key: &str) -> Self {
        self.team_keys
            .lock()
            .await
            .insert(team_id.to_string(), key.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Queue an error on an already shared client.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured mutation inputs.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Snapshot of the stored labels.
    pub async fn labels(&self) -> Vec<IssueLabel> {
        self.labels.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::NotFound(format!("IssueLabel {}", id))
    }
}

#[async_trait]
impl LinearApi for MockLinearClient {
    async fn viewer(&self) -> Result<Viewer> {
        self.call_count.lock().await.viewer += 1;
        self.check_error().await?;

        Ok(Viewer {
            id: "mock-user".to_string(),
            name: "Mock User".to_string(),
            email: Some("mock@example.com".to_string()),
        })
    }

    async fn create_label(&self, input: IssueLabelCreateInput) -> Result<IssueLabel> {
        self.call_count.lock().await.create_label += 1;
        self.captured_requests
            .lock()
            .await
            .push(CapturedRequest::Create(input.clone()));
        self.check_error().await?;

        let id = {
            let mut next = self.next_id.lock().await;
            *next += 1;
            format!("mock-label-{}", *next)
        };

        let label = IssueLabel {
            id,
            name: input.name,
            description: input.description,
            color: Some(input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            team: input.team_id.map(|id| LabelTeam { id }),
        };

        self.labels.lock().await.push(label.clone());
        Ok(label)
    }

    async fn get_label(&self, id: &str) -> Result<IssueLabel> {
        self.call_count.lock().await.get_label += 1;
        self.check_error().await?;

        let labels = self.labels.lock().await;
        labels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn update_label(&self, id: &str, input: IssueLabelUpdateInput) -> Result<IssueLabel> {
        self.call_count.lock().await.update_label += 1;
        self.captured_requests.lock().await.push(CapturedRequest::Update {
            id: id.to_string(),
            input: input.clone(),
        });
        self.check_error().await?;

        let mut labels = self.labels.lock().await;
        let label = labels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        label.name = input.name;
        if let Some(description) = input.description {
            label.description = Some(description);
        }
        if let Some(color) = input.color {
            label.color = Some(color);
        }

        Ok(label.clone())
    }

    async fn delete_label(&self, id: &str) -> Result<()> {
        self.call_count.lock().await.delete_label += 1;
        self.check_error().await?;

        let mut labels = self.labels.lock().await;
        let initial_len = labels.len();
        labels.retain(|l| l.id != id);

        if labels.len() == initial_len {
            return Err(Self::not_found(id).into());
        }
        Ok(())
    }

    async fn find_team_labels(&self, name: &str, team_key: &str) -> Result<Vec<IssueLabelRef>> {
        self.call_count.lock().await.find_team_labels += 1;
        self.check_error().await?;

        let team_keys = self.team_keys.lock().await;
        let labels = self.labels.lock().await;

        Ok(labels
            .iter()
            .filter(|l| l.name == name)
            .filter(|l| {
                l.team
                    .as_ref()
                    .and_then(|t| team_keys.get(&t.id))
                    .is_some_and(|key| key == team_key)
            })
            .map(|l| IssueLabelRef { id: l.id.clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{IssueLabelBuilder, TEAM_ID};

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockLinearClient::new();

        let result = mock.get_label("anything").await;
        assert!(result.is_err());
        assert_eq!(mock.call_counts().await.get_label, 1);
    }

    #[tokio::test]
    async fn test_mock_create_assigns_id_and_default_color() {
        let mock = MockLinearClient::new();

        let label = mock
            .create_label(IssueLabelCreateInput {
                name: "Bug".to_string(),
                team_id: Some(TEAM_ID.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(label.id, "mock-label-1");
        assert_eq!(label.color.as_deref(), Some(DEFAULT_COLOR));
        assert_eq!(mock.labels().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_with_error_consumed_once() {
        let mock = MockLinearClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.viewer().await.is_err());
        assert!(mock.viewer().await.is_ok());
        assert_eq!(mock.call_counts().await.viewer, 2);
    }

    #[tokio::test]
    async fn test_mock_update_keeps_absent_fields() {
        let mock = MockLinearClient::new()
            .with_labels(vec![
                IssueLabelBuilder::new("lbl-1")
                    .description("keep me")
                    .color("#000000")
                    .build(),
            ])
            .await;

        let label = mock
            .update_label(
                "lbl-1",
                IssueLabelUpdateInput {
                    name: "Renamed".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(label.name, "Renamed");
        assert_eq!(label.description.as_deref(), Some("keep me"));
        assert_eq!(label.color.as_deref(), Some("#000000"));
    }

    #[tokio::test]
    async fn test_mock_delete_not_found() {
        let mock = MockLinearClient::new();
        let result = mock.delete_label("nonexistent").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_find_filters_by_name_and_team_key() {
        let mock = MockLinearClient::new()
            .with_team(TEAM_ID, "ENG")
            .await
            .with_labels(vec![
                IssueLabelBuilder::new("lbl-1").name("Bug").build(),
                IssueLabelBuilder::new("lbl-2").name("Feature").build(),
                IssueLabelBuilder::new("lbl-3").name("Bug").no_team().build(),
            ])
            .await;

        let found = mock.find_team_labels("Bug", "ENG").await.unwrap();
        assert_eq!(found, vec![IssueLabelRef { id: "lbl-1".to_string() }]);

        let none = mock.find_team_labels("Bug", "OPS").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_mock_captures_mutations() {
        let mock = MockLinearClient::new();
        let label = mock
            .create_label(IssueLabelCreateInput {
                name: "Bug".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        mock.update_label(
            &label.id,
            IssueLabelUpdateInput {
                name: "Defect".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 2);
        assert!(matches!(captured[0], CapturedRequest::Create(_)));
        assert!(matches!(captured[1], CapturedRequest::Update { .. }));
        assert_eq!(mock.call_counts().await.total(), 2);
    }
}
