//! Provider host contract and the Linear provider
//!
//! The host contract is the small set of types a resource is written against:
//! attribute values, diagnostics, schemas, plan modifiers and the lifecycle
//! traits. [`LinearProvider`] configures the API client shared by its
//! resources.

use std::sync::Arc;

pub mod diagnostics;
pub mod plan;
pub mod resource;
pub mod schema;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use plan::{PlanAction, PlannedChange, plan_resource_change};
pub use resource::{
    ConfigureRequest, CreateRequest, DeleteRequest, ImportStateRequest, MetadataRequest,
    ProviderData, ReadRequest, Resource, ResourceWithImportState, UpdateRequest,
};
pub use schema::{Attribute, PlanModifier, Schema, Validator};
pub use value::{State, StringValue};

use crate::client::{LinearApi, LinearClient};
use crate::resources::TeamLabelResource;

/// Provider type name; resource type names are prefixed with it
pub const PROVIDER_TYPE_NAME: &str = "linear";

/// Environment variable consulted when the config has no token
pub const TOKEN_ENV_VAR: &str = "LINEAR_TOKEN";

/// Constructor for a resource type
pub type ResourceFactory = fn() -> Box<dyn ResourceWithImportState>;

/// Result of configuring the provider
#[derive(Default)]
pub struct ProviderConfigureResponse {
    /// Passed to every resource's `configure`
    pub provider_data: Option<ProviderData>,
    pub diagnostics: Diagnostics,
}

/// The Linear provider
#[derive(Debug, Default)]
pub struct LinearProvider {
    version: String,
}

impl LinearProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Provider configuration schema
    pub fn schema(&self) -> Schema {
        Schema::new("Interact with Linear.")
            .attribute(
                "token",
                Attribute::optional("Personal API token. Falls back to `LINEAR_TOKEN`.").sensitive(),
            )
            .attribute(
                "api_url",
                Attribute::optional("GraphQL endpoint. Defaults to `https://api.linear.app/graphql`."),
            )
    }

    /// Build the API client from provider configuration
    pub fn configure(&self, config: &State) -> ProviderConfigureResponse {
        let mut resp = ProviderConfigureResponse {
            diagnostics: self.schema().validate_config(config),
            ..Default::default()
        };
        if resp.diagnostics.has_error() {
            return resp;
        }

        let token = match config.get("token").as_known() {
            Some(token) => token.to_string(),
            None => std::env::var(TOKEN_ENV_VAR).unwrap_or_default(),
        };

        if token.is_empty() {
            resp.diagnostics.push(
                Diagnostic::error(
                    "Missing API Token",
                    format!(
                        "The provider cannot create the Linear API client because no API token was configured. \
                         Set the token in the provider configuration or the {} environment variable.",
                        TOKEN_ENV_VAR
                    ),
                )
                .at("token"),
            );
            return resp;
        }

        let client = match config.get("api_url").as_known() {
            Some(endpoint) => LinearClient::with_endpoint(token, endpoint),
            None => LinearClient::new(token),
        };

        match client {
            Ok(client) => {
                log::debug!("Configured Linear client for {}", client.endpoint());
                resp.provider_data = Some(client_data(Arc::new(client)));
            }
            Err(err) => resp.diagnostics.add_error(
                "Unable to Create Linear API Client",
                format!("An unexpected error occurred when creating the Linear API client: {}", err),
            ),
        }

        resp
    }

    /// Resource types this provider manages
    pub fn resources(&self) -> Vec<ResourceFactory> {
        vec![TeamLabelResource::boxed as ResourceFactory]
    }

    /// Instantiate the resource with the given full type name
    pub fn resource(&self, type_name: &str) -> Option<Box<dyn ResourceWithImportState>> {
        let req = MetadataRequest {
            provider_type_name: self.type_name().to_string(),
        };
        self.resources()
            .into_iter()
            .map(|factory| factory())
            .find(|resource| resource.metadata(&req).type_name == type_name)
    }
}

/// Wrap an API client as provider data
pub fn client_data(client: Arc<dyn LinearApi>) -> ProviderData {
    Arc::new(client)
}
