//! GraphQL request/response envelope and Linear operation documents

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Fields selected for every label returned by the API
const LABEL_FIELDS: &str = "fragment LabelFields on IssueLabel { id name description color team { id } }";

/// A named GraphQL operation
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Operation name as declared in the document
    pub name: &'static str,
    /// Document body, without fragments
    pub body: &'static str,
    /// Whether the document spreads `LabelFields`
    pub uses_label_fields: bool,
}

impl Operation {
    /// Full document text sent to the server
    pub fn document(&self) -> String {
        if self.uses_label_fields {
            format!("{}\n{}", self.body, LABEL_FIELDS)
        } else {
            self.body.to_string()
        }
    }
}

pub const VIEWER: Operation = Operation {
    name: "viewer",
    body: "query viewer { viewer { id name email } }",
    uses_label_fields: false,
};

pub const CREATE_LABEL: Operation = Operation {
    name: "createLabel",
    body: "mutation createLabel($input: IssueLabelCreateInput!) { issueLabelCreate(input: $input) { issueLabel { ...LabelFields } } }",
    uses_label_fields: true,
};

pub const GET_LABEL: Operation = Operation {
    name: "getLabel",
    body: "query getLabel($id: String!) { issueLabel(id: $id) { ...LabelFields } }",
    uses_label_fields: true,
};

pub const UPDATE_LABEL: Operation = Operation {
    name: "updateLabel",
    body: "mutation updateLabel($input: IssueLabelUpdateInput!, $id: String!) { issueLabelUpdate(input: $input, id: $id) { issueLabel { ...LabelFields } } }",
    uses_label_fields: true,
};

pub const DELETE_LABEL: Operation = Operation {
    name: "deleteLabel",
    body: "mutation deleteLabel($id: String!) { issueLabelDelete(id: $id) { success } }",
    uses_label_fields: false,
};

pub const FIND_TEAM_LABEL: Operation = Operation {
    name: "findTeamLabel",
    body: "query findTeamLabel($name: String!, $key: String!) { issueLabels(filter: { name: { eq: $name }, team: { key: { eq: $key } } }) { nodes { id } } }",
    uses_label_fields: false,
};

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V: Serialize> {
    pub query: String,
    pub operation_name: &'static str,
    pub variables: V,
}

impl<V: Serialize> GraphQlRequest<V> {
    pub fn new(operation: &Operation, variables: V) -> Self {
        Self {
            query: operation.document(),
            operation_name: operation.name,
            variables,
        }
    }
}

/// Response envelope: `data` and/or `errors`
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single GraphQL error entry
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,

    #[serde(default)]
    pub path: Vec<serde_json::Value>,

    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

/// Linear-specific error metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExtensions {
    /// Error class, e.g. `authentication error`, `invalid input`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Machine code, e.g. `RATELIMITED`
    #[serde(default)]
    pub code: Option<String>,

    /// Message intended for end users
    #[serde(default)]
    pub user_presentable_message: Option<String>,
}

impl GraphQlError {
    fn is_authentication(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.kind.as_deref())
            .is_some_and(|kind| kind.eq_ignore_ascii_case("authentication error"))
    }

    fn is_rate_limited(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            .is_some_and(|code| code == "RATELIMITED")
    }

    fn is_not_found(&self) -> bool {
        self.message.starts_with("Entity not found")
    }

    /// User-facing message with the response path prefixed, if any
    fn describe(&self) -> String {
        let message = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.user_presentable_message.as_deref())
            .unwrap_or(&self.message);

        let path: Vec<String> = self
            .path
            .iter()
            .map(|segment| match segment {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        if path.is_empty() {
            message.to_string()
        } else {
            format!("{}: {}", path.join("."), message)
        }
    }
}

/// Classify a non-empty list of GraphQL errors into a single `ApiError`
pub fn classify_errors(errors: &[GraphQlError]) -> ApiError {
    if errors.iter().any(GraphQlError::is_authentication) {
        return ApiError::Unauthorized;
    }

    if errors.iter().any(GraphQlError::is_rate_limited) {
        return ApiError::RateLimit(Duration::from_secs(60));
    }

    if let Some(err) = errors.iter().find(|e| e.is_not_found()) {
        let entity = err
            .message
            .trim_start_matches("Entity not found")
            .trim_start_matches(':')
            .trim();
        let entity = if entity.is_empty() { "IssueLabel" } else { entity };
        return ApiError::NotFound(entity.to_string());
    }

    let messages: Vec<String> = errors.iter().map(GraphQlError::describe).collect();
    ApiError::GraphQl(messages.join("; "))
}
