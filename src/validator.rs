//! Schema-wise validation of values.

use serde_json::Value;

use crate::error::SchemaError;
use crate::registry::Registry;
use crate::schema::Schema;
use crate::types::TypeEntry;

/// Check a value against a parsed schema.
///
/// - `Basic`: the registered predicate.
/// - `Array`: the value is an array and every element satisfies the element
///   type. An empty array always conforms.
/// - `Union`: at least one member conforms; members are tried in order and
///   evaluation stops at the first match.
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns `SchemaError::InternalInvalidSchemaType` if the schema names a
/// type missing from `registry`. Schemas produced by the parser with the
/// same registry never do.
pub fn validate(registry: &Registry, schema: &Schema, value: &Value) -> Result<bool, SchemaError> {
    match schema {
        Schema::Basic { type_name, .. } => Ok(entry(registry, type_name)?.test(value)),
        Schema::Array { element_type, .. } => {
            let element = entry(registry, element_type)?;
            match value {
                Value::Array(items) => Ok(items.iter().all(|item| element.test(item))),
                _ => Ok(false),
            }
        }
        Schema::Union { sub_schemas, .. } => {
            for sub_schema in sub_schemas {
                if validate(registry, sub_schema, value)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn entry<'r>(registry: &'r Registry, name: &str) -> Result<&'r TypeEntry, SchemaError> {
    registry
        .get(name)
        .ok_or_else(|| SchemaError::InternalInvalidSchemaType {
            detail: format!("type \"{}\" is not registered", name),
        })
}
