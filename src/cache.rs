//! Memoized schema parsing.
//!
//! A [`SchemaCache`] maps the exact schema text a caller passed to the schema
//! parsed from it. Entries are added on first use and stay until removed;
//! there is no size bound or expiry. Keys are not normalized, so
//! `"string"` and `" string"` are separate entries.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::check::assert_schema;
use crate::error::{AssertError, ErrorInfo, SchemaError};
use crate::parser::parse_schema_with;
use crate::registry::Registry;
use crate::schema::Schema;
use crate::validator::validate;

/// Cache of parsed schemas, safe to share between threads.
///
/// # Example
///
/// ```
/// use handy_types::SchemaCache;
/// use serde_json::json;
///
/// let cache = SchemaCache::new();
/// assert!(cache.is("integer | integer[]", &json!([23])).unwrap());
/// assert_eq!(cache.len(), 1);
/// assert!(cache.contains("integer | integer[]"));
///
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug)]
pub struct SchemaCache<'r> {
    registry: &'r Registry,
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}

impl SchemaCache<'static> {
    /// Empty cache over the built-in catalogue.
    pub fn new() -> Self {
        Self::with_registry(Registry::handy())
    }
}

impl<'r> SchemaCache<'r> {
    /// Empty cache over a specific registry.
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Cached schema for `text`, parsing and storing it on a miss. Parse
    /// failures are not stored.
    ///
    /// # Errors
    ///
    /// Returns the parser's `SchemaError` on a miss with invalid text.
    pub fn get_or_parse(&self, text: &str) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.read().get(text) {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(parse_schema_with(self.registry, text)?);
        self.write().insert(text.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Cached [`is`](crate::is).
    pub fn is(&self, schema: &str, value: &Value) -> Result<bool, SchemaError> {
        let schema = self.get_or_parse(schema)?;
        validate(self.registry, &schema, value)
    }

    /// Cached [`assert`](crate::assert).
    pub fn assert(&self, schema: &str, value: &Value, info: &ErrorInfo) -> Result<(), AssertError> {
        let schema = self.get_or_parse(schema)?;
        assert_schema(self.registry, &schema, value, info)
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.read().contains_key(text)
    }

    /// Remove one entry. Returns whether it was present.
    pub fn remove(&self, text: &str) -> bool {
        self.write().remove(text).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    // The map only ever holds complete, immutable entries, so a panic while
    // the lock was held cannot leave it inconsistent.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Schema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Schema>>> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SchemaCache<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;
    use serde_json::json;

    #[test]
    fn stores_parsed_schema() {
        let cache = SchemaCache::new();
        let schema = cache.get_or_parse("integer[]").unwrap();
        assert!(cache.contains("integer[]"));
        assert_eq!(*schema, parse_schema("integer[]").unwrap());

        let again = cache.get_or_parse("integer[]").unwrap();
        assert!(Arc::ptr_eq(&schema, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_deletes_one_entry() {
        let cache = SchemaCache::new();
        assert_eq!(cache.len(), 0);
        cache.get_or_parse("integer[]").unwrap();
        cache.get_or_parse("string").unwrap();
        assert_eq!(cache.len(), 2);

        assert!(cache.remove("integer[]"));
        assert!(!cache.remove("integer[]"));
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains("integer[]"));
    }

    #[test]
    fn clear_removes_everything() {
        let cache = SchemaCache::new();
        cache.get_or_parse("integer[]").unwrap();
        cache.get_or_parse("integer[]_").unwrap_err();
        cache.get_or_parse("integer").unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_not_normalized() {
        let cache = SchemaCache::new();
        cache.get_or_parse("string").unwrap();
        cache.get_or_parse("  string ").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_parses_are_not_cached() {
        let cache = SchemaCache::new();
        let err = cache.is("duck", &json!(1)).unwrap_err();
        assert_eq!(err.code(), "INVALID_HANDY_TYPE");
        assert!(cache.is_empty());
    }

    #[test]
    fn cached_assert() {
        let cache = SchemaCache::new();
        assert!(cache.assert("integer | integer[]", &json!([23]), &ErrorInfo::new()).is_ok());
        assert!(cache.contains("integer | integer[]"));

        let err = cache
            .assert("integer | integer[]", &json!("a string"), &ErrorInfo::new())
            .unwrap_err();
        assert!(err.to_string().contains("Integer"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn uses_given_registry() {
        use crate::types::{TypeCategory, TypeEntry};

        let registry = Registry::new([TypeEntry::new(
            "even",
            "Even Integer",
            TypeCategory::Integer,
            |v| v.as_i64().map_or(false, |n| n % 2 == 0),
        )]);
        let cache = SchemaCache::with_registry(&registry);
        assert!(cache.is("even[]", &json!([2, 4])).unwrap());
        assert!(!cache.is("even[]", &json!([2, 3])).unwrap());
        assert_eq!(cache.is("integer", &json!(1)).unwrap_err().code(), "INVALID_HANDY_TYPE");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn shared_between_threads() {
        let cache = Arc::new(SchemaCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.is("integer[]", &json!([i])).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.len(), 1);
    }
}
