//! Plan modifier evaluation for a single resource instance

use super::schema::{PlanModifier, Schema};
use super::value::{State, StringValue};

/// What applying a plan will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Update,
    /// Delete the existing instance, then create a new one
    Replace,
    NoOp,
}

/// Planned values and the action needed to reach them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    pub action: PlanAction,
    pub planned: State,
    /// Attributes whose change forces replacement
    pub replace_paths: Vec<String>,
}

/// Compute the planned state for `config`, given the prior state if the
/// instance already exists.
///
/// Computed attributes left null in config keep their prior value, or are
/// unknown for a new instance. If anything else changes they become unknown,
/// then each attribute's plan modifiers are applied.
pub fn plan_resource_change(schema: &Schema, config: &State, prior: Option<&State>) -> PlannedChange {
    let mut planned = State::new();

    for (name, attribute) in &schema.attributes {
        let config_value = config.get(name);
        let value = if attribute.computed && config_value.is_null() {
            prior.map_or(StringValue::Unknown, |p| p.get(name).clone())
        } else {
            config_value.clone()
        };
        planned.set(*name, value);
    }

    let Some(prior) = prior else {
        let planned = apply_modifiers(schema, config, None, planned);
        return PlannedChange {
            action: PlanAction::Create,
            planned,
            replace_paths: Vec::new(),
        };
    };

    if planned != *prior {
        for (name, attribute) in &schema.attributes {
            if attribute.computed && config.get(name).is_null() {
                planned.set(*name, StringValue::Unknown);
            }
        }
    }

    let planned = apply_modifiers(schema, config, Some(prior), planned);

    let replace_paths: Vec<String> = schema
        .attributes
        .iter()
        .filter(|(_, attribute)| attribute.has_modifier(PlanModifier::RequiresReplace))
        .filter(|(name, _)| {
            let value = planned.get(name);
            !value.is_unknown() && value != prior.get(name)
        })
        .map(|(name, _)| name.to_string())
        .collect();

    let action = if !replace_paths.is_empty() {
        PlanAction::Replace
    } else if planned == *prior {
        PlanAction::NoOp
    } else {
        PlanAction::Update
    };

    PlannedChange {
        action,
        planned,
        replace_paths,
    }
}

fn apply_modifiers(schema: &Schema, config: &State, prior: Option<&State>, mut planned: State) -> State {
    for (name, attribute) in &schema.attributes {
        for modifier in &attribute.plan_modifiers {
            match modifier {
                PlanModifier::UseStateForUnknown => {
                    let Some(prior_value) = prior.map(|p| p.get(name)) else {
                        continue;
                    };
                    if planned.get(name).is_unknown() && !prior_value.is_null() {
                        planned.set(*name, prior_value.clone());
                    }
                }
                PlanModifier::NullableString => {
                    if config.get(name).is_null() {
                        planned.set(*name, StringValue::Null);
                    }
                }
                PlanModifier::RequiresReplace => {}
            }
        }
    }
    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::schema::Attribute;

    fn schema() -> Schema {
        Schema::new("Test.")
            .attribute(
                "id",
                Attribute::computed("Id.").modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute("name", Attribute::required("Name."))
            .attribute(
                "description",
                Attribute::optional("Description.")
                    .and_computed()
                    .modifier(PlanModifier::NullableString),
            )
            .attribute(
                "color",
                Attribute::optional("Color.")
                    .and_computed()
                    .modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute(
                "team_id",
                Attribute::required("Team.").modifier(PlanModifier::RequiresReplace),
            )
    }

    fn prior() -> State {
        State::new()
            .with("id", StringValue::known("lbl-1"))
            .with("name", StringValue::known("Bug"))
            .with("description", StringValue::Null)
            .with("color", StringValue::known("#bec2c8"))
            .with("team_id", StringValue::known("team-1"))
    }

    fn config(name: &str, team: &str) -> State {
        State::new()
            .with("name", StringValue::known(name))
            .with("team_id", StringValue::known(team))
    }

    #[test]
    fn test_create_plans_unknown_computed() {
        let change = plan_resource_change(&schema(), &config("Bug", "team-1"), None);

        assert_eq!(change.action, PlanAction::Create);
        assert!(change.planned.get("id").is_unknown());
        assert!(change.planned.get("color").is_unknown());
        // NullableString keeps an omitted description null
        assert!(change.planned.get("description").is_null());
    }

    #[test]
    fn test_create_keeps_configured_color() {
        let cfg = config("Bug", "team-1").with("color", StringValue::known("#000000"));
        let change = plan_resource_change(&schema(), &cfg, None);
        assert_eq!(change.planned.get("color").value(), "#000000");
    }

    #[test]
    fn test_unchanged_config_is_noop() {
        let change = plan_resource_change(&schema(), &config("Bug", "team-1"), Some(&prior()));
        assert_eq!(change.action, PlanAction::NoOp);
        assert_eq!(change.planned, prior());
    }

    #[test]
    fn test_rename_is_update_and_preserves_id() {
        let change = plan_resource_change(&schema(), &config("Defect", "team-1"), Some(&prior()));

        assert_eq!(change.action, PlanAction::Update);
        assert_eq!(change.planned.get("id").value(), "lbl-1");
        assert_eq!(change.planned.get("color").value(), "#bec2c8");
        assert_eq!(change.planned.get("name").value(), "Defect");
    }

    #[test]
    fn test_removing_description_plans_null() {
        let prior = prior().with("description", StringValue::known("old"));
        let change = plan_resource_change(&schema(), &config("Bug", "team-1"), Some(&prior));

        assert_eq!(change.action, PlanAction::Update);
        assert!(change.planned.get("description").is_null());
    }

    #[test]
    fn test_team_change_requires_replace() {
        let change = plan_resource_change(&schema(), &config("Bug", "team-2"), Some(&prior()));

        assert_eq!(change.action, PlanAction::Replace);
        assert_eq!(change.replace_paths, vec!["team_id".to_string()]);
    }
}
