//! The resolution rule applied to every value entering a record.
//!
//! Plain maps become [`Record`]s and lists have their map elements converted,
//! recursively. Everything else passes through untouched. Conversion is
//! eager: it runs once at insertion, never on read.

use tracing::trace;

use crate::{Value, record::Record};

/// Construction-time switches for the resolution rule.
///
/// Both switches are on by default. Turning them off trades dot-access depth
/// for construction speed:
///
/// - `check_types == false` stores every value exactly as given, so nested
///   maps stay plain maps.
/// - `check_lists == false` leaves lists untouched, so maps inside lists stay
///   plain while maps directly under a key are still converted.
///
/// ```
/// # use dotwiz::{Record, ResolveOptions, Value, Map};
/// let mut inner = Map::new();
/// inner.insert("b".to_string(), Value::from(1));
/// let mut source = Map::new();
/// source.insert("a".to_string(), Value::Map(inner));
///
/// let shallow = Record::from_map_with(source, ResolveOptions::shallow());
/// assert!(shallow.attr("a").unwrap().as_map().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Convert map elements of lists
    pub check_lists: bool,
    /// Convert values at all
    pub check_types: bool,
}

impl ResolveOptions {
    /// Full recursive conversion
    pub const fn new() -> Self {
        Self {
            check_lists: true,
            check_types: true,
        }
    }

    /// No conversion: values are stored exactly as given
    pub const fn shallow() -> Self {
        Self {
            check_lists: false,
            check_types: false,
        }
    }

    /// Builder method to toggle list conversion
    pub const fn check_lists(mut self, enabled: bool) -> Self {
        self.check_lists = enabled;
        self
    }

    /// Builder method to toggle conversion of nested values
    pub const fn check_types(mut self, enabled: bool) -> Self {
        self.check_types = enabled;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the resolution rule to `value`.
///
/// Maps are converted with the same options, so a record built without list
/// conversion keeps that behavior at every nesting level.
pub fn resolve(value: Value, options: ResolveOptions) -> Value {
    if !options.check_types {
        return value;
    }
    match value {
        Value::Map(map) => {
            trace!(entries = map.len(), "converting nested map");
            Value::Record(Record::from_map_with(map, options))
        }
        Value::List(list) if options.check_lists => Value::List(
            list.into_iter()
                .map(|element| resolve(element, options))
                .collect(),
        ),
        other => other,
    }
}

/// Returns true if `value` already satisfies the resolution rule for `options`.
///
/// Used by tests and debug assertions to check the transitive invariant.
pub fn is_resolved(value: &Value, options: ResolveOptions) -> bool {
    if !options.check_types {
        return true;
    }
    match value {
        Value::Map(_) => false,
        Value::List(list) if options.check_lists => {
            list.iter().all(|element| is_resolved(element, options))
        }
        Value::Record(record) => record.values().all(|v| is_resolved(v, options)),
        _ => true,
    }
}
