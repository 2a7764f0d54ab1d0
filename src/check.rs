//! `is` / `assert`: parse a schema and validate a value in one call.
//!
//! These functions parse the schema on every call. Use
//! [`SchemaCache`](crate::SchemaCache) to reuse parsed schemas.

use serde_json::Value;

use crate::error::{AssertError, ErrorInfo, SchemaError, ValidationError};
use crate::parser::parse_schema_with;
use crate::registry::Registry;
use crate::schema::Schema;
use crate::validator::validate;

/// Whether `value` conforms to `schema`, using the built-in catalogue.
///
/// # Errors
///
/// An invalid schema is an error, never `Ok(false)`.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// assert!(handy_types::is("integer | integer[]", &json!(23)).unwrap());
/// assert!(!handy_types::is("integer | integer[]", &json!(["x"])).unwrap());
/// assert!(handy_types::is("duck", &json!(1)).is_err());
/// ```
pub fn is(schema: &str, value: &Value) -> Result<bool, SchemaError> {
    is_with(Registry::handy(), schema, value)
}

/// [`is`] against a specific registry.
pub fn is_with(registry: &Registry, schema: &str, value: &Value) -> Result<bool, SchemaError> {
    let schema = parse_schema_with(registry, schema)?;
    validate(registry, &schema, value)
}

/// Fail with a [`ValidationError`] unless `value` conforms to `schema`.
///
/// # Errors
///
/// `AssertError::Schema` for an invalid schema, `AssertError::Invalid` when
/// the value does not conform.
///
/// # Example
///
/// ```
/// use handy_types::{assert, AssertError, ErrorInfo};
/// use serde_json::json;
///
/// let err = assert("positive_integer", &json!(-1), &ErrorInfo::new().name("Age")).unwrap_err();
/// match err {
///     AssertError::Invalid(e) => assert_eq!(e.message, "Age must be of type: Positive Integer"),
///     other => panic!("unexpected {other}"),
/// }
/// ```
pub fn assert(schema: &str, value: &Value, info: &ErrorInfo) -> Result<(), AssertError> {
    assert_with(Registry::handy(), schema, value, info)
}

/// [`assert`] against a specific registry.
pub fn assert_with(
    registry: &Registry,
    schema: &str,
    value: &Value,
    info: &ErrorInfo,
) -> Result<(), AssertError> {
    let schema = parse_schema_with(registry, schema)?;
    assert_schema(registry, &schema, value, info)
}

/// [`assert`] against an already parsed schema.
pub fn assert_schema(
    registry: &Registry,
    schema: &Schema,
    value: &Value,
    info: &ErrorInfo,
) -> Result<(), AssertError> {
    if validate(registry, schema, value)? {
        Ok(())
    } else {
        Err(ValidationError::new(schema.display_name(), info).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn is_matches_validation() {
        assert!(is("string", &json!("a string")).unwrap());
        assert!(!is("string ", &json!(23)).unwrap());
        assert!(!is("  string[]   ", &json!("not a string array")).unwrap());
        assert!(is("string | number", &json!(231)).unwrap());
        assert!(is("integer[]", &json!([])).unwrap());
    }

    #[test]
    fn is_rejects_invalid_schemas() {
        for schema in ["not_valid_handy_type", "not_valid_handy_type[]", "not_valid_handy_type[] | integer", ""] {
            assert!(is(schema, &json!("value")).is_err(), "{schema:?} should fail");
        }
    }

    #[test]
    fn assert_passes_valid_value() {
        assert!(assert("string", &json!("a string"), &ErrorInfo::new()).is_ok());
    }

    #[test]
    fn assert_names_schema_in_message() {
        let err = assert("number", &json!("not a number"), &ErrorInfo::new()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Number"));
    }

    #[test]
    fn assert_uses_explicit_message() {
        let err = assert("number", &json!("x"), &ErrorInfo::new().message("_em_")).unwrap_err();
        assert_eq!(err.to_string(), "_em_");
    }

    #[test]
    fn assert_propagates_schema_errors() {
        let err = assert("duck", &json!(1), &ErrorInfo::new()).unwrap_err();
        assert!(matches!(err, AssertError::Schema(SchemaError::InvalidHandyType { .. })));
    }
}
