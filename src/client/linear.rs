//! Linear API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::graphql::{self, GraphQlRequest, GraphQlResponse, Operation};
use super::models::{
    IssueLabel, IssueLabelCreateInput, IssueLabelRef, IssueLabelUpdateInput, Viewer,
};
use super::LinearApi;
use crate::config::DEFAULT_API_URL;
use crate::error::{ApiError, Result};

/// Linear allows 1,500 requests per hour per API key
const REQUESTS_PER_HOUR: u32 = 1_500;

/// Linear API client
pub struct LinearClient {
    http: HttpClient,
    endpoint: String,
    token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl LinearClient {
    /// Create a client for the public Linear API
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(token, DEFAULT_API_URL)
    }

    /// Create a client for a custom GraphQL endpoint
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("linear-provider/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_hour(NonZeroU32::new(REQUESTS_PER_HOUR).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL operation and decode its `data`
    async fn execute<V, T>(&self, operation: &Operation, variables: V) -> Result<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        self.rate_limiter.until_ready().await;

        debug!("GraphQL {} -> {}", operation.name, self.endpoint);

        let body = GraphQlRequest::new(operation, variables);
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", &self.token)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Unauthorized.into());
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into());
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                return Err(ApiError::ServerError(error_msg).into());
            }
            _ => {}
        }

        // Linear reports GraphQL errors with 200 or 400 and a JSON body
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let envelope: GraphQlResponse<T> = serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            } else {
                ApiError::BadRequest(text.clone())
            }
        })?;

        if !envelope.errors.is_empty() {
            return Err(graphql::classify_errors(&envelope.errors).into());
        }

        envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse(format!("Response to {} has no data", operation.name)).into()
        })
    }
}

#[async_trait]
impl LinearApi for LinearClient {
    async fn viewer(&self) -> Result<Viewer> {
        #[derive(serde::Deserialize)]
        struct ViewerResponse {
            viewer: Viewer,
        }

        let response: ViewerResponse = self.execute(&graphql::VIEWER, json!({})).await?;
        Ok(response.viewer)
    }

    async fn create_label(&self, input: IssueLabelCreateInput) -> Result<IssueLabel> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateResponse {
            issue_label_create: LabelPayload,
        }

        let response: CreateResponse = self
            .execute(&graphql::CREATE_LABEL, json!({ "input": input }))
            .await?;
        response.issue_label_create.into_label("issueLabelCreate")
    }

    async fn get_label(&self, id: &str) -> Result<IssueLabel> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct GetResponse {
            issue_label: Option<IssueLabel>,
        }

        let response: GetResponse = self
            .execute(&graphql::GET_LABEL, json!({ "id": id }))
            .await?;
        response
            .issue_label
            .ok_or_else(|| ApiError::NotFound(format!("IssueLabel {}", id)).into())
    }

    async fn update_label(&self, id: &str, input: IssueLabelUpdateInput) -> Result<IssueLabel> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct UpdateResponse {
            issue_label_update: LabelPayload,
        }

        let response: UpdateResponse = self
            .execute(&graphql::UPDATE_LABEL, json!({ "input": input, "id": id }))
            .await?;
        response.issue_label_update.into_label("issueLabelUpdate")
    }

    async fn delete_label(&self, id: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct DeletePayload {
            success: bool,
        }

        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct DeleteResponse {
            issue_label_delete: DeletePayload,
        }

        let response: DeleteResponse = self
            .execute(&graphql::DELETE_LABEL, json!({ "id": id }))
            .await?;

        if !response.issue_label_delete.success {
            return Err(ApiError::GraphQl(format!(
                "issueLabelDelete: deletion of label {} was not successful",
                id
            ))
            .into());
        }
        Ok(())
    }

    async fn find_team_labels(&self, name: &str, team_key: &str) -> Result<Vec<IssueLabelRef>> {
        #[derive(serde::Deserialize)]
        struct Connection {
            nodes: Vec<IssueLabelRef>,
        }

        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct FindResponse {
            issue_labels: Connection,
        }

        let response: FindResponse = self
            .execute(
                &graphql::FIND_TEAM_LABEL,
                json!({ "name": name, "key": team_key }),
            )
            .await?;
        Ok(response.issue_labels.nodes)
    }
}

/// Mutation payload wrapping the affected label
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelPayload {
    issue_label: Option<IssueLabel>,
}

impl LabelPayload {
    fn into_label(self, field: &str) -> Result<IssueLabel> {
        self.issue_label.ok_or_else(|| {
            ApiError::InvalidResponse(format!("{} returned no issueLabel", field)).into()
        })
    }
}
