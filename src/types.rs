//! Typed views over loosely-shaped catalog values.
//!
//! The catalog is validated as raw JSON so every field can be reported on
//! independently, but the few fields whose shape varies get a proper type
//! here.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Which modifiers a drink supports.
///
/// Schema revisions disagree on the shape: older ones store a list of
/// modifier names, newer ones a plain boolean. Both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModifiersSupported {
    /// Field not present on the entry.
    #[default]
    Absent,
    /// Boolean form: all modifiers or none.
    All(bool),
    /// List form: exactly these modifiers.
    Only(Vec<String>),
}

impl ModifiersSupported {
    /// Read the field from an entry value.
    ///
    /// Returns `None` when the value is present but neither a boolean nor an
    /// array of strings.
    pub fn from_field(value: Option<&Value>) -> Option<Self> {
        match value {
            None => Some(Self::Absent),
            Some(Value::Bool(b)) => Some(Self::All(*b)),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::Only),
            Some(_) => None,
        }
    }

    /// Names the list form repeats, each reported once in order of its
    /// second appearance. Empty for the other forms.
    pub fn repeated_names(&self) -> Vec<&str> {
        let Self::Only(names) = self else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for name in names {
            if !seen.insert(name.as_str()) && !repeated.contains(&name.as_str()) {
                repeated.push(name.as_str());
            }
        }
        repeated
    }
}

/// The recognized keys of `flags.json`.
///
/// Unknown keys are ignored. A recognized key with the wrong type is left as
/// `None` here and reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_text_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
}

impl CatalogFlags {
    pub const FORCE_TEXT_ONLY: &'static str = "forceTextOnly";
    pub const CATALOG_VERSION: &'static str = "catalogVersion";

    /// Pick the recognized keys out of a flags object.
    pub fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        Self {
            force_text_only: object.get(Self::FORCE_TEXT_ONLY).and_then(Value::as_bool),
            catalog_version: object
                .get(Self::CATALOG_VERSION)
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}
