//! Attribute values and object state

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// A string attribute value as seen by the host.
///
/// `Unknown` only appears in plans, for values that are decided by the
/// remote side during apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StringValue {
    #[default]
    Null,
    Unknown,
    Known(String),
}

impl StringValue {
    pub fn known(value: impl Into<String>) -> Self {
        StringValue::Known(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StringValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StringValue::Unknown)
    }

    /// The known value, or `None` for null and unknown
    pub fn as_known(&self) -> Option<&str> {
        match self {
            StringValue::Known(v) => Some(v),
            _ => None,
        }
    }

    /// The known value, or an empty string for null and unknown
    pub fn value(&self) -> &str {
        self.as_known().unwrap_or_default()
    }
}

impl From<Option<String>> for StringValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(StringValue::Null, StringValue::Known)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringValue::Null => write!(f, "null"),
            StringValue::Unknown => write!(f, "(known after apply)"),
            StringValue::Known(v) => write!(f, "{:?}", v),
        }
    }
}

impl Serialize for StringValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StringValue::Known(v) => serializer.serialize_str(v),
            _ => serializer.serialize_none(),
        }
    }
}

/// Attribute values of one resource instance.
///
/// Used for config, plan and state alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct State {
    attributes: BTreeMap<String, StringValue>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an attribute; absent attributes read as null
    pub fn get(&self, name: &str) -> &StringValue {
        static NULL: StringValue = StringValue::Null;
        self.attributes.get(name).unwrap_or(&NULL)
    }

    pub fn set(&mut self, name: impl Into<String>, value: StringValue) {
        self.attributes.insert(name.into(), value);
    }

    /// Builder-style `set`
    pub fn with(mut self, name: impl Into<String>, value: StringValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_unknowns(&self) -> bool {
        self.attributes.values().any(StringValue::is_unknown)
    }
}

impl FromIterator<(String, StringValue)> for State {
    fn from_iter<I: IntoIterator<Item = (String, StringValue)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}
