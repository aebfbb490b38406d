//! Schema attribute display model

use serde::Serialize;
use tabled::Tabled;

use super::common::EMPTY;
use crate::provider::{Attribute, Schema};

/// One schema attribute for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AttributeDisplay {
    /// Attribute name
    #[tabled(rename = "ATTRIBUTE")]
    pub name: String,

    /// required / optional / computed flags
    #[tabled(rename = "KIND")]
    pub kind: String,

    /// Plan modifiers and validators
    #[tabled(rename = "RULES")]
    pub rules: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl AttributeDisplay {
    fn new(name: &str, attribute: &Attribute) -> Self {
        let rules: Vec<String> = attribute
            .plan_modifiers
            .iter()
            .map(|m| m.description().to_string())
            .chain(attribute.validators.iter().map(|v| v.description()))
            .collect();

        Self {
            name: name.to_string(),
            kind: attribute.kind(),
            rules: if rules.is_empty() {
                EMPTY.to_string()
            } else {
                rules.join("; ")
            },
            description: attribute.markdown_description.to_string(),
        }
    }

    /// One row per attribute, in name order
    pub fn from_schema(schema: &Schema) -> Vec<Self> {
        schema
            .attributes
            .iter()
            .map(|(name, attribute)| Self::new(name, attribute))
            .collect()
    }
}
