//! Schema text parsing.
//!
//! Grammar:
//!
//! ```text
//! schema := term ( "|" term )*
//! term   := name "[]" | name
//! ```
//!
//! Whitespace around `|` and around the whole schema is ignored. A name must
//! match a registered type exactly; there is no nesting of `[]` and no
//! parentheses.

use crate::error::SchemaError;
use crate::registry::Registry;
use crate::schema::Schema;

const ARRAY_SUFFIX: &str = "[]";
const UNION_SEPARATOR: char = '|';

/// Parse a schema against the built-in type catalogue.
///
/// # Errors
///
/// Returns `SchemaError` if the text is empty, names an unregistered type,
/// or has a malformed union member.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
    parse_schema_with(Registry::handy(), text)
}

/// Parse a schema against a specific registry.
///
/// # Errors
///
/// See [`parse_schema`].
pub fn parse_schema_with(registry: &Registry, text: &str) -> Result<Schema, SchemaError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::InvalidSchema {
            message: "schema must be a non-empty string".to_string(),
        });
    }

    if !trimmed.contains(UNION_SEPARATOR) {
        return parse_term(registry, trimmed);
    }

    let sub_schemas = trimmed
        .split(UNION_SEPARATOR)
        .map(str::trim)
        .enumerate()
        .map(|(index, part)| {
            parse_term(registry, part).map_err(|e| SchemaError::InvalidUnionSchema {
                position: index + 1,
                sub_schema: part.to_string(),
                schema: trimmed.to_string(),
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let display_name = sub_schemas
        .iter()
        .map(Schema::display_name)
        .collect::<Vec<_>>()
        .join(" or ");

    Ok(Schema::Union {
        sub_schemas,
        display_name,
    })
}

/// Parse a single union member or a whole non-union schema. `text` is
/// already trimmed and contains no `|`.
fn parse_term(registry: &Registry, text: &str) -> Result<Schema, SchemaError> {
    if let Some(element) = text.strip_suffix(ARRAY_SUFFIX) {
        let element = element.trim();
        let element_display = lookup(registry, element)?;
        return Ok(Schema::Array {
            element_type: element.to_string(),
            display_name: format!("Array of {}", element_display),
        });
    }

    let display_name = lookup(registry, text)?;
    Ok(Schema::Basic {
        type_name: text.to_string(),
        display_name: display_name.to_string(),
    })
}

fn lookup(registry: &Registry, name: &str) -> Result<&'static str, SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidSchema {
            message: "empty type name".to_string(),
        });
    }
    registry
        .display_name(name)
        .ok_or_else(|| SchemaError::InvalidHandyType {
            name: name.to_string(),
        })
}
