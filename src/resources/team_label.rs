//! `linear_team_label` resource
//!
//! Maps a Linear issue label owned by a team onto the resource lifecycle.
//! Every mutating call copies the server's response back into state, so the
//! label ID and any server-chosen values (such as the default color) are
//! always authoritative.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use log::trace;
use regex::Regex;
use thiserror::Error;

use crate::client::LinearApi;
use crate::client::models::{IssueLabel, IssueLabelCreateInput, IssueLabelUpdateInput};
use crate::error::{ApiError, Error};
use crate::provider::resource::{
    ConfigureResponse, CreateResponse, DeleteResponse, ImportStateResponse, MetadataResponse,
    ReadResponse, UpdateResponse,
};
use crate::provider::{
    Attribute, ConfigureRequest, CreateRequest, DeleteRequest, Diagnostic, ImportStateRequest,
    MetadataRequest, PlanModifier, ReadRequest, Resource, ResourceWithImportState, Schema, State,
    StringValue, UpdateRequest, Validator,
};

static COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern is valid"));

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

/// Failures of the team label resource, each mapped to one diagnostic
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Unable to {action} team label, got error: {source}")]
    Client {
        action: &'static str,
        #[source]
        source: Error,
    },

    #[error("Unable to {action} team label, got error: {message}")]
    NotFound {
        action: &'static str,
        message: String,
    },

    #[error("Expected import identifier with format: label_name:team_key. Got: {0:?}")]
    InvalidImportId(String),

    #[error(
        "Expected the Linear API client (Arc<dyn LinearApi>), got a different provider data type. \
         Please report this issue to the provider developers."
    )]
    UnexpectedConfigureType,

    #[error("The team label resource was used before the provider configured its API client.")]
    Unconfigured,
}

impl LabelError {
    /// Wrap an API error, singling out missing labels
    fn from_api(action: &'static str, err: Error) -> Self {
        match err {
            Error::Api(ApiError::NotFound(_)) => LabelError::NotFound {
                action,
                message: err.to_string(),
            },
            source => LabelError::Client { action, source },
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            LabelError::Client { .. } => "Client Error",
            LabelError::NotFound { .. } => "Not Found",
            LabelError::InvalidImportId(_) => "Unexpected Import Identifier",
            LabelError::UnexpectedConfigureType => "Unexpected Resource Configure Type",
            LabelError::Unconfigured => "Unconfigured Client",
        }
    }
}

impl From<LabelError> for Diagnostic {
    fn from(err: LabelError) -> Self {
        Diagnostic::error(err.summary(), err.to_string())
    }
}

/// Typed view of the resource's attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamLabelModel {
    pub id: StringValue,
    pub name: StringValue,
    pub description: StringValue,
    pub color: StringValue,
    pub team_id: StringValue,
}

impl TeamLabelModel {
    pub fn from_state(state: &State) -> Self {
        Self {
            id: state.get("id").clone(),
            name: state.get("name").clone(),
            description: state.get("description").clone(),
            color: state.get("color").clone(),
            team_id: state.get("team_id").clone(),
        }
    }

    pub fn to_state(&self) -> State {
        State::new()
            .with("id", self.id.clone())
            .with("name", self.name.clone())
            .with("description", self.description.clone())
            .with("color", self.color.clone())
            .with("team_id", self.team_id.clone())
    }

    fn create_input(&self) -> IssueLabelCreateInput {
        IssueLabelCreateInput {
            name: self.name.value().to_string(),
            team_id: Some(self.team_id.value().to_string()),
            description: self.description.as_known().map(str::to_string),
            color: self.color.as_known().map(str::to_string),
        }
    }

    fn update_input(&self) -> IssueLabelUpdateInput {
        IssueLabelUpdateInput {
            name: self.name.value().to_string(),
            description: self.description.as_known().map(str::to_string),
            color: self.color.as_known().map(str::to_string),
        }
    }

    /// Copy the server's view of the label; absent optional fields keep their value
    fn apply_label(&mut self, label: IssueLabel) {
        self.id = StringValue::Known(label.id);
        self.name = StringValue::Known(label.name);

        if let Some(description) = label.description {
            self.description = StringValue::Known(description);
        }
        if let Some(color) = label.color {
            self.color = StringValue::Known(color);
        }
        if let Some(team) = label.team {
            self.team_id = StringValue::Known(team.id);
        }
    }

    /// After apply nothing may stay unknown
    fn resolve_unknowns(&mut self) {
        for value in [
            &mut self.id,
            &mut self.name,
            &mut self.description,
            &mut self.color,
            &mut self.team_id,
        ] {
            if value.is_unknown() {
                *value = StringValue::Null;
            }
        }
    }
}

/// Split `label_name:team_key` into its two non-empty parts
pub fn parse_import_id(id: &str) -> Result<(&str, &str), LabelError> {
    let parts: Vec<&str> = id.split(':').collect();

    match parts.as_slice() {
        [name, key] if !name.is_empty() && !key.is_empty() => Ok((*name, *key)),
        _ => Err(LabelError::InvalidImportId(id.to_string())),
    }
}

/// The team label resource
#[derive(Default)]
pub struct TeamLabelResource {
    client: Option<Arc<dyn LinearApi>>,
}

impl TeamLabelResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory registered with the provider
    pub fn boxed() -> Box<dyn ResourceWithImportState> {
        Box::new(Self::new())
    }

    fn client(&self) -> Result<&Arc<dyn LinearApi>, LabelError> {
        self.client.as_ref().ok_or(LabelError::Unconfigured)
    }

    async fn create_label(&self, plan: &State) -> Result<State, LabelError> {
        let client = self.client()?;
        let mut data = TeamLabelModel::from_state(plan);

        let label = client
            .create_label(data.create_input())
            .await
            .map_err(|err| LabelError::Client {
                action: "create",
                source: err,
            })?;

        trace!("created a team label");

        data.apply_label(label);
        data.resolve_unknowns();
        Ok(data.to_state())
    }

    async fn read_label(&self, state: &State) -> Result<State, LabelError> {
        let client = self.client()?;
        let mut data = TeamLabelModel::from_state(state);

        let label = client
            .get_label(data.id.value())
            .await
            .map_err(|err| LabelError::from_api("read", err))?;

        data.apply_label(label);
        Ok(data.to_state())
    }

    async fn update_label(&self, plan: &State, prior: &State) -> Result<State, LabelError> {
        let client = self.client()?;
        let mut data = TeamLabelModel::from_state(plan);

        let id = match data.id.as_known() {
            Some(id) => id.to_string(),
            None => prior.get("id").value().to_string(),
        };

        let label = client
            .update_label(&id, data.update_input())
            .await
            .map_err(|err| LabelError::Client {
                action: "update",
                source: err,
            })?;

        trace!("updated a team label");

        data.apply_label(label);
        data.resolve_unknowns();
        Ok(data.to_state())
    }

    async fn delete_label(&self, state: &State) -> Result<(), LabelError> {
        let client = self.client()?;
        let data = TeamLabelModel::from_state(state);

        client
            .delete_label(data.id.value())
            .await
            .map_err(|err| LabelError::Client {
                action: "delete",
                source: err,
            })?;

        trace!("deleted a team label");
        Ok(())
    }

    async fn import_label(&self, id: &str) -> Result<State, LabelError> {
        let (name, team_key) = parse_import_id(id)?;
        let client = self.client()?;

        let nodes = client
            .find_team_labels(name, team_key)
            .await
            .map_err(|err| LabelError::Client {
                action: "import",
                source: err,
            })?;

        let [node] = nodes.as_slice() else {
            return Err(LabelError::NotFound {
                action: "import",
                message: "label not found".to_string(),
            });
        };

        let mut state = self.schema().null_state();
        state.set("id", StringValue::known(node.id.clone()));
        Ok(state)
    }
}

#[async_trait]
impl Resource for TeamLabelResource {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_team_label", req.provider_type_name),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new("Linear team label.")
            .attribute(
                "id",
                Attribute::computed("Identifier of the label.")
                    .modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute(
                "name",
                Attribute::required("Name of the label.").validator(Validator::MinLength(1)),
            )
            .attribute(
                "description",
                Attribute::optional("Description of the label.")
                    .and_computed()
                    .modifier(PlanModifier::NullableString),
            )
            .attribute(
                "color",
                Attribute::optional("Color of the label.")
                    .and_computed()
                    .modifier(PlanModifier::UseStateForUnknown)
                    .validator(Validator::Match {
                        pattern: &COLOR_PATTERN,
                        description: "a hex color like #aabbcc",
                    }),
            )
            .attribute(
                "team_id",
                Attribute::required("Identifier of the team.")
                    .modifier(PlanModifier::RequiresReplace)
                    .validator(Validator::Match {
                        pattern: &UUID_PATTERN,
                        description: "a lowercase UUID",
                    }),
            )
    }

    fn configure(&mut self, req: ConfigureRequest) -> ConfigureResponse {
        let mut resp = ConfigureResponse::default();

        // The provider has not been configured yet
        let Some(data) = req.provider_data else {
            return resp;
        };

        match data.downcast_ref::<Arc<dyn LinearApi>>() {
            Some(client) => self.client = Some(Arc::clone(client)),
            None => resp
                .diagnostics
                .push(LabelError::UnexpectedConfigureType.into()),
        }

        resp
    }

    async fn create(&self, req: CreateRequest) -> CreateResponse {
        let mut resp = CreateResponse::default();
        match self.create_label(&req.plan).await {
            Ok(state) => resp.state = Some(state),
            Err(err) => resp.diagnostics.push(err.into()),
        }
        resp
    }

    async fn read(&self, req: ReadRequest) -> ReadResponse {
        let mut resp = ReadResponse::default();
        match self.read_label(&req.state).await {
            Ok(state) => resp.state = Some(state),
            Err(err) => resp.diagnostics.push(err.into()),
        }
        resp
    }

    async fn update(&self, req: UpdateRequest) -> UpdateResponse {
        let mut resp = UpdateResponse::default();
        match self.update_label(&req.plan, &req.state).await {
            Ok(state) => resp.state = Some(state),
            Err(err) => resp.diagnostics.push(err.into()),
        }
        resp
    }

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse {
        let mut resp = DeleteResponse::default();
        if let Err(err) = self.delete_label(&req.state).await {
            resp.diagnostics.push(err.into());
        }
        resp
    }
}

#[async_trait]
impl ResourceWithImportState for TeamLabelResource {
    async fn import_state(&self, req: ImportStateRequest) -> ImportStateResponse {
        let mut resp = ImportStateResponse::default();
        match self.import_label(&req.id).await {
            Ok(state) => resp.state = Some(state),
            Err(err) => resp.diagnostics.push(err.into()),
        }
        resp
    }
}
