//! Declarative resource schema: attributes, validators and plan modifiers

use std::collections::BTreeMap;

use regex::Regex;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::value::{State, StringValue};

/// Rule that adjusts a planned attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanModifier {
    /// Keep the prior state value instead of planning an unknown
    UseStateForUnknown,
    /// A change to this attribute destroys and recreates the resource
    RequiresReplace,
    /// Plan null, not unknown, when the config omits an optional+computed value
    NullableString,
}

impl PlanModifier {
    pub fn description(&self) -> &'static str {
        match self {
            PlanModifier::UseStateForUnknown => "use state for unknown",
            PlanModifier::RequiresReplace => "requires replace",
            PlanModifier::NullableString => "nullable",
        }
    }
}

/// Config-time check on a known attribute value
#[derive(Debug, Clone)]
pub enum Validator {
    /// Minimum length in characters
    MinLength(usize),
    /// Value must match the pattern; `description` names the expected form
    Match {
        pattern: &'static Regex,
        description: &'static str,
    },
}

impl Validator {
    pub fn description(&self) -> String {
        match self {
            Validator::MinLength(min) => format!("at least {} characters", min),
            Validator::Match { description, .. } => (*description).to_string(),
        }
    }

    /// Validate one value; null and unknown values always pass
    pub fn validate(&self, attribute: &str, value: &StringValue) -> Option<Diagnostic> {
        let value = value.as_known()?;

        let valid = match self {
            Validator::MinLength(min) => value.chars().count() >= *min,
            Validator::Match { pattern, .. } => pattern.is_match(value),
        };

        if valid {
            return None;
        }

        Some(
            Diagnostic::error(
                "Invalid Attribute Value",
                format!(
                    "Attribute {} must be {}, got: {:?}",
                    attribute,
                    self.description(),
                    value
                ),
            )
            .at(attribute),
        )
    }
}

/// One attribute of a resource schema
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    pub markdown_description: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub plan_modifiers: Vec<PlanModifier>,
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn required(description: &'static str) -> Self {
        Self {
            markdown_description: description,
            required: true,
            ..Default::default()
        }
    }

    pub fn optional(description: &'static str) -> Self {
        Self {
            markdown_description: description,
            optional: true,
            ..Default::default()
        }
    }

    pub fn computed(description: &'static str) -> Self {
        Self {
            markdown_description: description,
            computed: true,
            ..Default::default()
        }
    }

    /// Mark an optional attribute as also computed by the remote side
    pub fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn has_modifier(&self, modifier: PlanModifier) -> bool {
        self.plan_modifiers.contains(&modifier)
    }

    /// Computed and not settable from config
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    /// Short kind label, e.g. `optional, computed`
    pub fn kind(&self) -> String {
        let mut parts = Vec::new();
        if self.required {
            parts.push("required");
        }
        if self.optional {
            parts.push("optional");
        }
        if self.computed {
            parts.push("computed");
        }
        if self.sensitive {
            parts.push("sensitive");
        }
        parts.join(", ")
    }
}

/// Schema of a resource or provider configuration
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub markdown_description: &'static str,
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    pub fn new(description: &'static str) -> Self {
        Self {
            markdown_description: description,
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    /// A state with every attribute set to null
    pub fn null_state(&self) -> State {
        self.attributes
            .keys()
            .map(|name| (name.to_string(), StringValue::Null))
            .collect()
    }

    /// Check a config against this schema before any remote call.
    ///
    /// Reports unknown attribute names, values for read-only attributes,
    /// missing required attributes and failed validators.
    pub fn validate_config(&self, config: &State) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for (name, value) in config.iter() {
            if !self.attributes.contains_key(name) && !value.is_null() {
                diags.push(
                    Diagnostic::error(
                        "Unsupported Argument",
                        format!("An argument named {:?} is not expected here.", name),
                    )
                    .at(name),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = config.get(name);

            if attribute.is_read_only() && !value.is_null() {
                diags.push(
                    Diagnostic::error(
                        "Invalid Configuration for Read-Only Attribute",
                        format!(
                            "Cannot set value for attribute {:?} because it is read-only.",
                            name
                        ),
                    )
                    .at(*name),
                );
                continue;
            }

            if attribute.required && value.is_null() {
                diags.push(
                    Diagnostic::error(
                        "Missing Required Argument",
                        format!("The argument {:?} is required, but no value was set.", name),
                    )
                    .at(*name),
                );
                continue;
            }

            for validator in &attribute.validators {
                if let Some(diag) = validator.validate(name, value) {
                    diags.push(diag);
                }
            }
        }

        diags
    }
}
