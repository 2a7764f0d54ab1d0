//! Compiled schema representation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// A parsed schema.
///
/// Produced by [`parse_schema`](crate::parse_schema). A union is always the
/// top-level node and its members are `Basic` or `Array` nodes in the order
/// they were written.
///
/// Serializes as the compiled form, e.g.
/// `{"schemaType":"array","elementType":"string","schemaName":"Array of String"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schemaType", rename_all = "lowercase")]
pub enum Schema {
    Basic {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(rename = "schemaName")]
        display_name: String,
    },
    Array {
        #[serde(rename = "elementType")]
        element_type: String,
        #[serde(rename = "schemaName")]
        display_name: String,
    },
    Union {
        #[serde(rename = "subSchemas")]
        sub_schemas: Vec<Schema>,
        #[serde(rename = "schemaName")]
        display_name: String,
    },
}

impl Schema {
    /// Human-readable name used in generated error messages.
    pub fn display_name(&self) -> &str {
        match self {
            Schema::Basic { display_name, .. }
            | Schema::Array { display_name, .. }
            | Schema::Union { display_name, .. } => display_name,
        }
    }

    /// The `schemaType` tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Basic { .. } => "basic",
            Schema::Array { .. } => "array",
            Schema::Union { .. } => "union",
        }
    }

    /// Load a compiled schema from its JSON form.
    ///
    /// Type names are not checked against a registry here; the validator
    /// reports unknown names when the schema is used.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InternalInvalidSchemaType` for a missing or
    /// unknown `schemaType` tag, and `SchemaError::InvalidSchema` when the
    /// node is otherwise malformed.
    pub fn from_json(value: &Value) -> Result<Schema, SchemaError> {
        check_tags(value)?;
        serde_json::from_value(value.clone()).map_err(|e| SchemaError::InvalidSchema {
            message: format!("malformed compiled schema: {}", e),
        })
    }
}

fn check_tags(value: &Value) -> Result<(), SchemaError> {
    let tag = value.get("schemaType").and_then(Value::as_str);
    match tag {
        Some("basic") | Some("array") => Ok(()),
        Some("union") => match value.get("subSchemas") {
            Some(Value::Array(members)) => members.iter().try_for_each(check_tags),
            _ => Ok(()),
        },
        Some(other) => Err(SchemaError::InternalInvalidSchemaType {
            detail: format!("unknown schema type \"{}\"", other),
        }),
        None => Err(SchemaError::InternalInvalidSchemaType {
            detail: "missing schemaType".to_string(),
        }),
    }
}
