//! Leaf type registry.
//!
//! A [`Registry`] maps a type name (as written in a schema) to a
//! [`TypeEntry`]: the predicate, a display name used in error messages and a
//! category. The parser only accepts names present in the registry it is
//! given, and the validator only looks names up; nothing mutates a registry
//! after it has been built.
//!
//! [`Registry::handy`] returns the built-in catalogue:
//!
//! | Category | Types |
//! |----------|-------|
//! | number | `number`, `non_negative_number`, `positive_number`, `negative_number`, `non_positive_number`, `finite_number` |
//! | integer | `integer`, `positive_integer`, `non_negative_integer`, `negative_integer`, `non_positive_integer`, `8bit_integer`, `8bit_unsigned_integer`, `16bit_integer`, `16bit_unsigned_integer`, `32bit_integer`, `32bit_unsigned_integer`, `safe_integer` |
//! | string | `string`, `non_empty_string` |
//! | object | `object`, `plain_object`, `non_null_object` |
//! | array | `array`, `non_empty_array` |
//! | boolean | `boolean` |
//! | other | `null`, `nullish`, `non_nullish`, `any` |

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::types::{TypeCategory, TypeEntry};

/// Largest integer magnitude an IEEE-754 double represents exactly.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Closed mapping from type name to [`TypeEntry`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, TypeEntry>,
}

impl Registry {
    /// Build a registry from entries. A later entry replaces an earlier one
    /// with the same name.
    pub fn new(entries: impl IntoIterator<Item = TypeEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.name, e)).collect(),
        }
    }

    /// The built-in catalogue, built on first use.
    pub fn handy() -> &'static Registry {
        static HANDY: OnceLock<Registry> = OnceLock::new();
        HANDY.get_or_init(|| Registry::new(HANDY_TYPES.iter().copied()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.get(name)
    }

    pub fn display_name(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(|e| e.display_name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Name to display name mapping.
    pub fn type_names(&self) -> BTreeMap<&'static str, &'static str> {
        self.entries
            .values()
            .map(|e| (e.name, e.display_name))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in catalogue, in declaration order.
pub const HANDY_TYPES: &[TypeEntry] = &[
    // Numbers
    TypeEntry::new("number", "Number", TypeCategory::Number, Value::is_number),
    TypeEntry::new(
        "non_negative_number",
        "Non-Negative Number",
        TypeCategory::Number,
        |v| number(v).map_or(false, |n| n >= 0.0),
    ),
    TypeEntry::new(
        "positive_number",
        "Positive Number",
        TypeCategory::Number,
        |v| number(v).map_or(false, |n| n > 0.0),
    ),
    TypeEntry::new(
        "negative_number",
        "Negative Number",
        TypeCategory::Number,
        |v| number(v).map_or(false, |n| n < 0.0),
    ),
    TypeEntry::new(
        "non_positive_number",
        "Non-Positive Number",
        TypeCategory::Number,
        |v| number(v).map_or(false, |n| n <= 0.0),
    ),
    TypeEntry::new(
        "finite_number",
        "Finite Number",
        TypeCategory::Number,
        |v| number(v).map_or(false, f64::is_finite),
    ),
    // Integers
    TypeEntry::new("integer", "Integer", TypeCategory::Integer, |v| {
        integer(v).is_some()
    }),
    TypeEntry::new(
        "positive_integer",
        "Positive Integer",
        TypeCategory::Integer,
        |v| integer(v).map_or(false, |n| n > 0.0),
    ),
    TypeEntry::new(
        "non_negative_integer",
        "Non-Negative Integer",
        TypeCategory::Integer,
        |v| integer(v).map_or(false, |n| n >= 0.0),
    ),
    TypeEntry::new(
        "negative_integer",
        "Negative Integer",
        TypeCategory::Integer,
        |v| integer(v).map_or(false, |n| n < 0.0),
    ),
    TypeEntry::new(
        "non_positive_integer",
        "Non-Positive Integer",
        TypeCategory::Integer,
        |v| integer(v).map_or(false, |n| n <= 0.0),
    ),
    TypeEntry::new("8bit_integer", "8-bit Integer", TypeCategory::Integer, |v| {
        integer_in(v, i8::MIN as f64, i8::MAX as f64)
    }),
    TypeEntry::new(
        "8bit_unsigned_integer",
        "8-bit Unsigned Integer",
        TypeCategory::Integer,
        |v| integer_in(v, 0.0, u8::MAX as f64),
    ),
    TypeEntry::new(
        "16bit_integer",
        "16-bit Integer",
        TypeCategory::Integer,
        |v| integer_in(v, i16::MIN as f64, i16::MAX as f64),
    ),
    TypeEntry::new(
        "16bit_unsigned_integer",
        "16-bit Unsigned Integer",
        TypeCategory::Integer,
        |v| integer_in(v, 0.0, u16::MAX as f64),
    ),
    TypeEntry::new(
        "32bit_integer",
        "32-bit Integer",
        TypeCategory::Integer,
        |v| integer_in(v, i32::MIN as f64, i32::MAX as f64),
    ),
    TypeEntry::new(
        "32bit_unsigned_integer",
        "32-bit Unsigned Integer",
        TypeCategory::Integer,
        |v| integer_in(v, 0.0, u32::MAX as f64),
    ),
    TypeEntry::new("safe_integer", "Safe Integer", TypeCategory::Integer, |v| {
        integer_in(v, -MAX_SAFE_INTEGER, MAX_SAFE_INTEGER)
    }),
    // Strings
    TypeEntry::new("string", "String", TypeCategory::String, Value::is_string),
    TypeEntry::new(
        "non_empty_string",
        "Non-Empty String",
        TypeCategory::String,
        |v| v.as_str().map_or(false, |s| !s.is_empty()),
    ),
    // Objects
    TypeEntry::new("object", "Object", TypeCategory::Object, |v| {
        matches!(v, Value::Object(_) | Value::Array(_) | Value::Null)
    }),
    TypeEntry::new(
        "plain_object",
        "Plain Object",
        TypeCategory::Object,
        Value::is_object,
    ),
    TypeEntry::new(
        "non_null_object",
        "Non-Null Object",
        TypeCategory::Object,
        |v| matches!(v, Value::Object(_) | Value::Array(_)),
    ),
    // Arrays
    TypeEntry::new("array", "Array", TypeCategory::Array, Value::is_array),
    TypeEntry::new(
        "non_empty_array",
        "Non-Empty Array",
        TypeCategory::Array,
        |v| v.as_array().map_or(false, |a| !a.is_empty()),
    ),
    // Booleans
    TypeEntry::new("boolean", "Boolean", TypeCategory::Boolean, Value::is_boolean),
    // Other
    TypeEntry::new("null", "Null", TypeCategory::Other, Value::is_null),
    TypeEntry::new("nullish", "Nullish", TypeCategory::Other, Value::is_null),
    TypeEntry::new("non_nullish", "Non-Nullish", TypeCategory::Other, |v| {
        !v.is_null()
    }),
    TypeEntry::new("any", "Any", TypeCategory::Other, |_| true),
];

fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Numeric value of `value` if it is a number without a fractional part.
/// `2.0` counts as an integer.
fn integer(value: &Value) -> Option<f64> {
    let n = value.as_f64()?;
    (n.is_finite() && n.fract() == 0.0).then_some(n)
}

fn integer_in(value: &Value, min: f64, max: f64) -> bool {
    integer(value).map_or(false, |n| (min..=max).contains(&n))
}
