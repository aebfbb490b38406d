//! Team label command handlers
//!
//! Each handler drives the `linear_team_label` resource the way a host
//! would: validate the config against the schema, plan, apply, then print
//! the resulting state.

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use log::debug;

use crate::cli::context::check;
use crate::cli::{CommandContext, GlobalOptions, LabelFields};
use crate::error::{Error, Result};
use crate::output::{Formattable, LabelState};
use crate::provider::{
    CreateRequest, DeleteRequest, ImportStateRequest, PlanAction, ReadRequest, Resource,
    ResourceWithImportState, State, StringValue, UpdateRequest, plan_resource_change,
};

/// Changes requested by `label update`; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct LabelChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub color: Option<String>,
    pub team_id: Option<String>,
}

impl LabelChanges {
    /// Build the desired config by layering these changes over the current state
    pub fn apply_to(&self, current: &State) -> State {
        let pick = |change: &Option<String>, attribute: &str| match change {
            Some(value) => StringValue::known(value.clone()),
            None => current.get(attribute).clone(),
        };

        // Linear keeps the old description when the field is omitted, so
        // clearing sends an empty one
        let description = if self.clear_description {
            StringValue::known("")
        } else {
            pick(&self.description, "description")
        };

        State::new()
            .with("name", pick(&self.name, "name"))
            .with("description", description)
            .with("color", pick(&self.color, "color"))
            .with("team_id", pick(&self.team_id, "team_id"))
    }
}

// ============================================================================
// Create Command
// ============================================================================

/// Create a team label
pub async fn create(opts: &GlobalOptions, fields: &LabelFields, team_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let config = State::new()
        .with("name", StringValue::known(fields.name.clone()))
        .with("description", StringValue::from(fields.description.clone()))
        .with("color", StringValue::from(fields.color.clone()))
        .with("team_id", StringValue::known(team_id));

    let state = apply_create(ctx.resource.as_ref(), config).await?;

    eprintln!(
        "{} Created team label {}",
        "✓".green(),
        state.get("id").value().bold()
    );
    LabelState(&state).print(ctx.format)
}

// ============================================================================
// Read Command
// ============================================================================

/// Read a team label by ID
pub async fn read(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let state = read_by_id(ctx.resource.as_ref(), id).await?;
    LabelState(&state).print(ctx.format)
}

// ============================================================================
// Update Command
// ============================================================================

/// Update a team label, replacing it when the team changes
pub async fn update(opts: &GlobalOptions, id: &str, changes: &LabelChanges) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let state = apply_update(ctx.resource.as_ref(), id, changes).await?;
    LabelState(&state).print(ctx.format)
}

// ============================================================================
// Delete Command
// ============================================================================

/// Delete a team label, asking first unless `yes` is set
pub async fn delete(opts: &GlobalOptions, id: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete team label {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    let state = ctx
        .resource
        .schema()
        .null_state()
        .with("id", StringValue::known(id));
    apply_delete(ctx.resource.as_ref(), state).await?;

    eprintln!("{} Deleted team label {}", "✓".green(), id.bold());
    Ok(())
}

// ============================================================================
// Import Command
// ============================================================================

/// Import an existing label by `label_name:team_key` and print its full state
pub async fn import(opts: &GlobalOptions, import_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let resource = ctx.resource.as_ref();

    let resp = resource
        .import_state(ImportStateRequest {
            id: import_id.to_string(),
        })
        .await;
    check(resp.diagnostics)?;
    let imported = resp.state.ok_or_else(|| missing_state("import"))?;

    let state = apply_read(resource, imported).await?;

    eprintln!(
        "{} Imported {} as {}",
        "✓".green(),
        import_id,
        state.get("id").value().bold()
    );
    LabelState(&state).print(ctx.format)
}

// ============================================================================
// Lifecycle helpers
// ============================================================================

async fn apply_create(resource: &dyn ResourceWithImportState, config: State) -> Result<State> {
    let schema = resource.schema();
    check(schema.validate_config(&config))?;

    let change = plan_resource_change(&schema, &config, None);
    let resp = resource
        .create(CreateRequest {
            config,
            plan: change.planned,
        })
        .await;
    check(resp.diagnostics)?;

    resp.state.ok_or_else(|| missing_state("create"))
}

/// Read the label, plan the requested changes against it, then apply the
/// plan in place or by delete-then-create
async fn apply_update(
    resource: &dyn ResourceWithImportState,
    id: &str,
    changes: &LabelChanges,
) -> Result<State> {
    let prior = read_by_id(resource, id).await?;
    let config = changes.apply_to(&prior);

    let schema = resource.schema();
    check(schema.validate_config(&config))?;

    let change = plan_resource_change(&schema, &config, Some(&prior));
    debug!("Planned {:?} for {}", change.action, id);

    match change.action {
        PlanAction::NoOp => {
            eprintln!("{} No changes", "○".dimmed());
            Ok(prior)
        }
        PlanAction::Create | PlanAction::Update => {
            let resp = resource
                .update(UpdateRequest {
                    config,
                    plan: change.planned,
                    state: prior,
                })
                .await;
            check(resp.diagnostics)?;
            let state = resp.state.ok_or_else(|| missing_state("update"))?;
            eprintln!("{} Updated team label {}", "✓".green(), id.bold());
            Ok(state)
        }
        PlanAction::Replace => {
            eprintln!(
                "{} {} forces replacement",
                "⚠".yellow(),
                change.replace_paths.join(", ")
            );
            apply_delete(resource, prior).await?;
            let state = apply_create(resource, config).await?;
            eprintln!(
                "{} Replaced team label {} with {}",
                "✓".green(),
                id,
                state.get("id").value().bold()
            );
            Ok(state)
        }
    }
}

async fn read_by_id(resource: &dyn ResourceWithImportState, id: &str) -> Result<State> {
    let state = resource
        .schema()
        .null_state()
        .with("id", StringValue::known(id));
    apply_read(resource, state).await
}

async fn apply_read(resource: &dyn ResourceWithImportState, state: State) -> Result<State> {
    let resp = resource.read(ReadRequest { state }).await;
    check(resp.diagnostics)?;
    resp.state.ok_or_else(|| missing_state("read"))
}

async fn apply_delete(resource: &dyn ResourceWithImportState, state: State) -> Result<()> {
    let resp = resource.delete(DeleteRequest { state }).await;
    check(resp.diagnostics)
}

fn missing_state(operation: &str) -> Error {
    Error::Other(format!("{} returned no state", operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::MockLinearClient;
    use crate::client::fixtures::{IssueLabelBuilder, OTHER_TEAM_ID, TEAM_ID};
    use crate::client::mock::CapturedRequest;
    use crate::client::models::{IssueLabelCreateInput, IssueLabelUpdateInput};
    use crate::provider::{ConfigureRequest, client_data};
    use crate::resources::TeamLabelResource;

    fn current() -> State {
        State::new()
            .with("id", StringValue::known("lbl-1"))
            .with("name", StringValue::known("Bug"))
            .with("description", StringValue::known("Broken"))
            .with("color", StringValue::known("#eb5757"))
            .with("team_id", StringValue::known(TEAM_ID))
    }

    async fn resource(mock: Arc<MockLinearClient>) -> TeamLabelResource {
        let mut resource = TeamLabelResource::new();
        resource.configure(ConfigureRequest {
            provider_data: Some(client_data(mock)),
        });
        resource
    }

    #[test]
    fn test_changes_keep_current_values() {
        let config = LabelChanges::default().apply_to(&current());

        assert_eq!(config.get("name").value(), "Bug");
        assert_eq!(config.get("description").value(), "Broken");
        assert_eq!(config.get("color").value(), "#eb5757");
        assert!(config.get("id").is_null());
    }

    #[test]
    fn test_changes_override_and_clear() {
        let changes = LabelChanges {
            name: Some("Defect".to_string()),
            clear_description: true,
            ..Default::default()
        };

        let config = changes.apply_to(&current());

        assert_eq!(config.get("name").value(), "Defect");
        assert_eq!(config.get("description"), &StringValue::known(""));
        assert_eq!(config.get("team_id").value(), TEAM_ID);
    }

    #[tokio::test]
    async fn test_apply_create_rejects_invalid_color_without_calls() {
        let mock = Arc::new(MockLinearClient::new());
        let resource = resource(mock.clone()).await;

        let config = State::new()
            .with("name", StringValue::known("Bug"))
            .with("color", StringValue::known("red"))
            .with("team_id", StringValue::known(TEAM_ID));

        let err = apply_create(&resource, config).await.unwrap_err();

        assert!(err.to_string().contains("Invalid Attribute Value"));
        assert_eq!(mock.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_read_by_id_fills_state() {
        let mock = Arc::new(
            MockLinearClient::new()
                .with_labels(vec![IssueLabelBuilder::new("lbl-1").name("Bug").build()])
                .await,
        );
        let resource = resource(mock).await;

        let state = read_by_id(&resource, "lbl-1").await.unwrap();

        assert_eq!(state.get("name").value(), "Bug");
        assert_eq!(state.get("team_id").value(), TEAM_ID);
        assert!(state.get("description").is_null());
    }

    #[tokio::test]
    async fn test_apply_delete_reports_client_error() {
        let mock = Arc::new(MockLinearClient::new());
        let resource = resource(mock).await;

        let state = State::new().with("id", StringValue::known("gone"));
        let err = apply_delete(&resource, state).await.unwrap_err();

        assert!(err.to_string().contains("Client Error"));
    }

    fn seeded_label() -> crate::client::models::IssueLabel {
        IssueLabelBuilder::new("lbl-1")
            .name("Bug")
            .description("Broken")
            .color("#eb5757")
            .build()
    }

    #[tokio::test]
    async fn test_apply_update_without_changes_is_noop() {
        let mock = Arc::new(MockLinearClient::new().with_labels(vec![seeded_label()]).await);
        let resource = resource(mock.clone()).await;

        let state = apply_update(&resource, "lbl-1", &LabelChanges::default())
            .await
            .unwrap();

        assert_eq!(state, current());
        assert!(mock.captured_requests().await.is_empty());
        let counts = mock.call_counts().await;
        assert_eq!(counts.update_label, 0);
        assert_eq!(counts.delete_label, 0);
    }

    #[tokio::test]
    async fn test_apply_update_changes_only_flagged_fields() {
        let mock = Arc::new(MockLinearClient::new().with_labels(vec![seeded_label()]).await);
        let resource = resource(mock.clone()).await;

        let changes = LabelChanges {
            name: Some("Defect".to_string()),
            ..Default::default()
        };
        let state = apply_update(&resource, "lbl-1", &changes).await.unwrap();

        assert_eq!(state.get("id").value(), "lbl-1");
        assert_eq!(state.get("name").value(), "Defect");
        assert_eq!(state.get("description").value(), "Broken");
        assert_eq!(state.get("color").value(), "#eb5757");
        assert_eq!(state.get("team_id").value(), TEAM_ID);

        assert_eq!(
            mock.captured_requests().await,
            vec![CapturedRequest::Update {
                id: "lbl-1".to_string(),
                input: IssueLabelUpdateInput {
                    name: "Defect".to_string(),
                    description: Some("Broken".to_string()),
                    color: Some("#eb5757".to_string()),
                },
            }]
        );
        let counts = mock.call_counts().await;
        assert_eq!(counts.update_label, 1);
        assert_eq!(counts.delete_label, 0);
        assert_eq!(counts.create_label, 0);
    }

    #[tokio::test]
    async fn test_apply_update_team_change_replaces_label() {
        let mock = Arc::new(MockLinearClient::new().with_labels(vec![seeded_label()]).await);
        let resource = resource(mock.clone()).await;

        let changes = LabelChanges {
            team_id: Some(OTHER_TEAM_ID.to_string()),
            ..Default::default()
        };
        let state = apply_update(&resource, "lbl-1", &changes).await.unwrap();

        assert_eq!(state.get("id").value(), "mock-label-1");
        assert_eq!(state.get("team_id").value(), OTHER_TEAM_ID);
        assert_eq!(state.get("name").value(), "Bug");

        let counts = mock.call_counts().await;
        assert_eq!(counts.delete_label, 1);
        assert_eq!(counts.create_label, 1);
        assert_eq!(counts.update_label, 0);

        assert_eq!(
            mock.captured_requests().await,
            vec![CapturedRequest::Create(IssueLabelCreateInput {
                name: "Bug".to_string(),
                team_id: Some(OTHER_TEAM_ID.to_string()),
                description: Some("Broken".to_string()),
                color: Some("#eb5757".to_string()),
            })]
        );

        let labels = mock.labels().await;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].id, "mock-label-1");
    }

    #[tokio::test]
    async fn test_apply_update_rejects_invalid_color_without_mutation() {
        let mock = Arc::new(MockLinearClient::new().with_labels(vec![seeded_label()]).await);
        let resource = resource(mock.clone()).await;

        let changes = LabelChanges {
            color: Some("red".to_string()),
            ..Default::default()
        };
        let err = apply_update(&resource, "lbl-1", &changes).await.unwrap_err();

        assert!(err.to_string().contains("Invalid Attribute Value"));
        assert!(mock.captured_requests().await.is_empty());
    }
}
