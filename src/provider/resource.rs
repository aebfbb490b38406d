//! Resource lifecycle contract
//!
//! Each operation takes a request and returns a response carrying the new
//! state plus diagnostics, so failures are reported to the user instead of
//! aborting the host.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use super::diagnostics::Diagnostics;
use super::schema::Schema;
use super::value::State;

/// Opaque value a provider hands to its resources during configure
pub type ProviderData = Arc<dyn Any + Send + Sync>;

pub struct MetadataRequest {
    pub provider_type_name: String,
}

#[derive(Debug, Default)]
pub struct MetadataResponse {
    pub type_name: String,
}

#[derive(Default)]
pub struct ConfigureRequest {
    /// `None` until the provider itself has been configured
    pub provider_data: Option<ProviderData>,
}

#[derive(Debug, Default)]
pub struct ConfigureResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub config: State,
    pub plan: State,
}

#[derive(Debug, Default)]
pub struct CreateResponse {
    /// `None` when nothing was created
    pub state: Option<State>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub state: State,
}

#[derive(Debug, Default)]
pub struct ReadResponse {
    pub state: Option<State>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub config: State,
    pub plan: State,
    /// State before the update
    pub state: State,
}

#[derive(Debug, Default)]
pub struct UpdateResponse {
    pub state: Option<State>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub state: State,
}

#[derive(Debug, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct ImportStateRequest {
    /// User-supplied import identifier
    pub id: String,
}

#[derive(Debug, Default)]
pub struct ImportStateResponse {
    /// Partial state, completed by a subsequent read
    pub state: Option<State>,
    pub diagnostics: Diagnostics,
}

/// A managed resource type
#[async_trait]
pub trait Resource: Send + Sync {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse;

    fn schema(&self) -> Schema;

    fn configure(&mut self, req: ConfigureRequest) -> ConfigureResponse;

    async fn create(&self, req: CreateRequest) -> CreateResponse;

    async fn read(&self, req: ReadRequest) -> ReadResponse;

    async fn update(&self, req: UpdateRequest) -> UpdateResponse;

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse;
}

/// A resource that can adopt existing remote objects
#[async_trait]
pub trait ResourceWithImportState: Resource {
    async fn import_state(&self, req: ImportStateRequest) -> ImportStateResponse;
}
