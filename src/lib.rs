//! Handy Types
//!
//! Runtime validation of JSON values against short textual type schemas.
//!
//! A schema names a registered type (`"positive_integer"`), an array of one
//! (`"string[]"`), or a union of either (`"number | string[]"`). [`is`]
//! answers whether a value conforms; [`assert`] turns a mismatch into a
//! [`ValidationError`] with a readable message.
//!
//! # Example
//!
//! ```
//! use handy_types::{assert, is, ErrorInfo, SchemaCache};
//! use serde_json::json;
//!
//! assert!(is("integer | integer[]", &json!(23)).unwrap());
//! assert!(is("integer[]", &json!([])).unwrap());
//! assert!(!is("integer | integer[]", &json!(["x"])).unwrap());
//!
//! let err = assert("number", &json!("x"), &ErrorInfo::new()).unwrap_err();
//! assert_eq!(err.to_string(), "Value must be of type: Number");
//!
//! // Reuse parsed schemas across calls.
//! let cache = SchemaCache::new();
//! assert!(cache.is("string[]", &json!(["a", "b"])).unwrap());
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! # Schema Syntax
//!
//! | Form | Example | Matches |
//! |------|---------|---------|
//! | basic | `integer` | the registered predicate |
//! | array | `integer[]` | an array whose elements all match (`[]` always matches) |
//! | union | `integer \| string[]` | any member, tried left to right |
//!
//! Whitespace around `|` and around the whole schema is ignored. Arrays of
//! arrays and parentheses are not supported.
//!
//! # Errors
//!
//! An invalid schema is always an error ([`SchemaError`]), never a `false`
//! result. Each error has a stable [`code`](SchemaError::code):
//! `INVALID_SCHEMA`, `INVALID_HANDY_TYPE`, `INVALID_UNION_SCHEMA` or
//! `INTERNAL_ERROR_INVALID_SCHEMA`.

mod cache;
mod check;
mod error;
mod parser;
mod registry;
mod schema;
mod types;
mod validator;

pub use cache::SchemaCache;
pub use check::{assert, assert_schema, assert_with, is, is_with};
pub use error::{default_message, AssertError, ErrorCode, ErrorInfo, SchemaError, ValidationError};
pub use parser::{parse_schema, parse_schema_with};
pub use registry::{Registry, HANDY_TYPES, MAX_SAFE_INTEGER};
pub use schema::Schema;
pub use types::{json_type_name, Predicate, TypeCategory, TypeEntry};
pub use validator::validate;
