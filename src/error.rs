//! Error types for schema parsing and value validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while parsing or evaluating a schema.
///
/// These always indicate a problem with the schema, never with the value
/// being validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("invalid handy type: \"{name}\"")]
    InvalidHandyType { name: String },

    #[error("invalid sub schema (\"{sub_schema}\") at position {position} in union schema \"{schema}\": {source}")]
    InvalidUnionSchema {
        /// 1-based index of the member.
        position: usize,
        sub_schema: String,
        schema: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("invalid schema type: {detail}")]
    InternalInvalidSchemaType { detail: String },
}

impl SchemaError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::InvalidSchema { .. } => "INVALID_SCHEMA",
            SchemaError::InvalidHandyType { .. } => "INVALID_HANDY_TYPE",
            SchemaError::InvalidUnionSchema { .. } => "INVALID_UNION_SCHEMA",
            SchemaError::InternalInvalidSchemaType { .. } => "INTERNAL_ERROR_INVALID_SCHEMA",
        }
    }

    /// The innermost error, looking through union wrappers.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            SchemaError::InvalidUnionSchema { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// User-supplied error code. Either text or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{}", n),
            ErrorCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::Text(code.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::Text(code)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        ErrorCode::Number(code)
    }
}

/// Options controlling the error produced by a failed `assert`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Label for the value in the generated message (defaults to "Value").
    pub name: Option<String>,
    /// Replaces the generated message entirely.
    pub message: Option<String>,
    pub code: Option<ErrorCode>,
    /// Extra fields attached to the error. `message` and `code` keys are
    /// dropped.
    pub other_info: Option<Map<String, Value>>,
}

impl ErrorInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn other_info(mut self, other_info: Map<String, Value>) -> Self {
        self.other_info = Some(other_info);
        self
    }
}

/// A value did not conform to its schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Display name of the schema the value failed.
    #[serde(rename = "schemaName")]
    pub schema_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationError {
    /// Build the error for a value that failed the schema named
    /// `schema_name`.
    ///
    /// An explicit `message` or `code` in `info` always wins over keys of
    /// the same name in `other_info`.
    pub fn new(schema_name: &str, info: &ErrorInfo) -> Self {
        let message = match &info.message {
            Some(message) => message.clone(),
            None => default_message(info.name.as_deref(), schema_name),
        };

        let mut extra = info.other_info.clone().unwrap_or_default();
        extra.remove("message");
        extra.remove("code");
        // Reserved by the error itself.
        extra.remove("schemaName");

        Self {
            message,
            code: info.code.clone(),
            schema_name: schema_name.to_string(),
            extra,
        }
    }

    /// The user-supplied code, or `VALIDATION_ERROR`.
    pub fn kind_code(&self) -> String {
        match &self.code {
            Some(code) => code.to_string(),
            None => "VALIDATION_ERROR".to_string(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Generated message for a failed assertion.
pub fn default_message(value_name: Option<&str>, schema_name: &str) -> String {
    let value_name = match value_name {
        Some(name) if !name.is_empty() => name,
        _ => "Value",
    };
    format!("{} must be of type: {}", value_name, schema_name)
}

/// Errors from `assert`.
#[derive(Debug, Error)]
pub enum AssertError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl AssertError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AssertError::Schema(e) => e.exit_code(),
            AssertError::Invalid(_) => 1,
        }
    }

    pub fn code(&self) -> String {
        match self {
            AssertError::Schema(e) => e.code().to_string(),
            AssertError::Invalid(e) => e.kind_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn schema_error_codes() {
        let err = SchemaError::InvalidSchema {
            message: "empty".into(),
        };
        assert_eq!(err.code(), "INVALID_SCHEMA");
        assert_eq!(err.exit_code(), 2);

        let err = SchemaError::InvalidHandyType {
            name: "duck".into(),
        };
        assert_eq!(err.code(), "INVALID_HANDY_TYPE");
        assert_eq!(err.to_string(), "invalid handy type: \"duck\"");
    }

    #[test]
    fn union_error_root_cause() {
        let err = SchemaError::InvalidUnionSchema {
            position: 2,
            sub_schema: "duck".into(),
            schema: "string | duck".into(),
            source: Box::new(SchemaError::InvalidHandyType {
                name: "duck".into(),
            }),
        };
        assert_eq!(err.code(), "INVALID_UNION_SCHEMA");
        assert_eq!(err.root_cause().code(), "INVALID_HANDY_TYPE");
        assert!(err.to_string().contains("at position 2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn uses_user_message() {
        let err = ValidationError::new("Number", &ErrorInfo::new().message("_em_"));
        assert_eq!(err.message, "_em_");
        assert_eq!(err.to_string(), "_em_");
    }

    #[test]
    fn generates_message() {
        let err = ValidationError::new("Number", &ErrorInfo::new());
        assert_eq!(err.message, "Value must be of type: Number");

        let err = ValidationError::new("Number", &ErrorInfo::new().name("Age"));
        assert_eq!(err.message, "Age must be of type: Number");
    }

    #[test]
    fn uses_user_code() {
        let err = ValidationError::new("Number", &ErrorInfo::new().message("_em_").code("ec"));
        assert_eq!(err.code, Some(ErrorCode::Text("ec".into())));
        assert_eq!(err.kind_code(), "ec");

        let err = ValidationError::new("Number", &ErrorInfo::new().code(42));
        assert_eq!(err.kind_code(), "42");

        let err = ValidationError::new("Number", &ErrorInfo::new());
        assert_eq!(err.kind_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn merges_other_info() {
        let info = ErrorInfo::new()
            .message("_em_")
            .other_info(map(json!({ "name": "duck" })));
        let err = ValidationError::new("Number", &info);
        assert_eq!(err.message, "_em_");
        assert_eq!(err.get("name"), Some(&json!("duck")));
    }

    #[test]
    fn other_info_cannot_override_message_or_code() {
        let info = ErrorInfo::new().message("_em_").other_info(map(json!({
            "name": "duck",
            "message": "_new_message_",
            "code": "_code_"
        })));
        let err = ValidationError::new("Number", &info);
        assert_eq!(err.message, "_em_");
        assert_eq!(err.code, None);
        assert_eq!(err.get("name"), Some(&json!("duck")));
        assert!(err.get("message").is_none());
        assert!(err.get("code").is_none());
    }

    #[test]
    fn validation_error_serializes_flat() {
        let info = ErrorInfo::new()
            .code("E_AGE")
            .other_info(map(json!({ "field": "age" })));
        let err = ValidationError::new("Integer", &info);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "message": "Value must be of type: Integer",
                "code": "E_AGE",
                "schemaName": "Integer",
                "field": "age"
            })
        );
    }

    #[test]
    fn error_info_deserializes_camel_case() {
        let info: ErrorInfo = serde_json::from_value(json!({
            "name": "Age",
            "code": 7,
            "otherInfo": { "hint": "years" }
        }))
        .unwrap();
        assert_eq!(info.name.as_deref(), Some("Age"));
        assert_eq!(info.code, Some(ErrorCode::Number(7)));
        assert_eq!(info.other_info.unwrap()["hint"], json!("years"));
    }

    #[test]
    fn assert_error_exit_codes() {
        let err = AssertError::from(SchemaError::InvalidHandyType {
            name: "duck".into(),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.code(), "INVALID_HANDY_TYPE");

        let err = AssertError::from(ValidationError::new("Number", &ErrorInfo::new()));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
