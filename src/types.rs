//! Core types shared by the registry, parser and validator.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A leaf type predicate. Must be total and free of side effects.
pub type Predicate = fn(&Value) -> bool;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Category a registered type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Number,
    Integer,
    String,
    Object,
    Array,
    Boolean,
    Other,
}

impl TypeCategory {
    /// All categories, in catalogue order.
    pub const ALL: &'static [TypeCategory] = &[
        TypeCategory::Number,
        TypeCategory::Integer,
        TypeCategory::String,
        TypeCategory::Object,
        TypeCategory::Array,
        TypeCategory::Boolean,
        TypeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Number => "number",
            TypeCategory::Integer => "integer",
            TypeCategory::String => "string",
            TypeCategory::Object => "object",
            TypeCategory::Array => "array",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Other => "other",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered leaf type: its schema name, human-readable name, category
/// and predicate.
#[derive(Clone, Copy)]
pub struct TypeEntry {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: TypeCategory,
    pub predicate: Predicate,
}

impl TypeEntry {
    pub const fn new(
        name: &'static str,
        display_name: &'static str,
        category: TypeCategory,
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            display_name,
            category,
            predicate,
        }
    }

    /// Run the predicate against a value.
    pub fn test(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("a")), "string");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TypeCategory::Integer).unwrap(),
            json!("integer")
        );
        assert_eq!(TypeCategory::Boolean.to_string(), "boolean");
    }

    #[test]
    fn entry_runs_predicate() {
        let entry = TypeEntry::new("string", "String", TypeCategory::String, Value::is_string);
        assert!(entry.test(&json!("x")));
        assert!(!entry.test(&json!(1)));
    }
}
