//! Field-shape helpers and the rule table for uniform optional fields.

use serde_json::Value;

/// JSON type name used in messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The string content if the value is a non-empty string.
pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Finite number that is zero or greater.
pub fn is_non_negative_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n.is_finite() && n >= 0.0)
}

/// Integral JSON number (no fractional part in the source text).
pub fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

/// Shape rule for an optional field. An absent field always passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    StringOrNull,
    NonNegativeNumber,
    StringArray,
    Boolean,
}

impl FieldRule {
    fn expectation(self) -> &'static str {
        match self {
            Self::StringOrNull => "a string or null",
            Self::NonNegativeNumber => "a non-negative number",
            Self::StringArray => "an array of strings",
            Self::Boolean => "a boolean",
        }
    }

    /// Check a present value; returns the message for the first violation.
    ///
    /// For arrays the message points at the first offending element.
    pub fn check(self, key: &str, value: &Value) -> Option<String> {
        let ok = match (self, value) {
            (Self::StringOrNull, Value::String(_) | Value::Null) => true,
            (Self::NonNegativeNumber, v) => is_non_negative_number(v),
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::StringArray, Value::Array(items)) => {
                return items
                    .iter()
                    .position(|item| !item.is_string())
                    .map(|i| {
                        format!(
                            "{key}[{i}] must be a string, got {}",
                            type_name(&items[i])
                        )
                    });
            }
            _ => false,
        };
        if ok {
            return None;
        }
        match (self, value) {
            (Self::NonNegativeNumber, Value::Number(n)) => {
                Some(format!("{key} must be {}, got {n}", self.expectation()))
            }
            _ => Some(format!(
                "{key} must be {}, got {}",
                self.expectation(),
                type_name(value)
            )),
        }
    }
}

/// Optional top-level fields that carry a single shape rule each.
pub const OPTIONAL_FIELDS: &[(&str, FieldRule)] = &[
    ("steps", FieldRule::StringArray),
    ("tags", FieldRule::StringArray),
    ("sources", FieldRule::StringArray),
    ("relatedDrinkIds", FieldRule::StringArray),
    ("dominantColors", FieldRule::StringArray),
    ("totalVolumeMl", FieldRule::NonNegativeNumber),
    ("estimatedAbvPercent", FieldRule::NonNegativeNumber),
    ("calories", FieldRule::NonNegativeNumber),
    ("prepTimeSec", FieldRule::NonNegativeNumber),
    ("technique", FieldRule::StringOrNull),
    ("glass", FieldRule::StringOrNull),
    ("ice", FieldRule::StringOrNull),
    ("rim", FieldRule::StringOrNull),
    ("strength", FieldRule::StringOrNull),
    ("difficulty", FieldRule::StringOrNull),
    ("themeColor", FieldRule::StringOrNull),
    ("accentColor", FieldRule::StringOrNull),
    ("isIBAOfficial", FieldRule::Boolean),
    ("isMocktail", FieldRule::Boolean),
];

/// Optional keys of one `ingredients` element (`name` is checked separately).
pub const INGREDIENT_FIELDS: &[(&str, FieldRule)] = &[
    ("amount", FieldRule::NonNegativeNumber),
    ("unit", FieldRule::StringOrNull),
    ("notes", FieldRule::StringOrNull),
    ("optional", FieldRule::Boolean),
];

/// String keys of `origin` (`year` is checked separately).
pub const ORIGIN_FIELDS: &[(&str, FieldRule)] = &[
    ("country", FieldRule::StringOrNull),
    ("region", FieldRule::StringOrNull),
    ("creator", FieldRule::StringOrNull),
    ("story", FieldRule::StringOrNull),
];
