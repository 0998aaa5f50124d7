use tracing::trace;

use super::Record;
use crate::{
    resolve::ResolveOptions,
    value::{Map, Value},
};

/// Builder for records that combine a source map, named fields and
/// resolution switches.
///
/// Named fields override source entries with the same key; an overridden key
/// keeps the position it had in the source.
///
/// ```
/// # use dotwiz::{Map, Record, Value};
/// let mut source = Map::new();
/// source.insert("x".to_string(), Value::from(1));
/// source.insert("y".to_string(), Value::from(2));
///
/// let rec = Record::builder()
///     .source(source)
///     .field("x", 10)
///     .check_lists(false)
///     .build();
///
/// assert_eq!(rec.keys().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(*rec.attr("x").unwrap(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    source: Map,
    fields: Map,
    options: ResolveOptions,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source map
    pub fn source(mut self, source: Map) -> Self {
        self.source = source;
        self
    }

    /// Adds a named field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Adds several named fields
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replaces both resolution switches
    pub fn options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Toggles conversion of maps inside lists
    pub fn check_lists(mut self, enabled: bool) -> Self {
        self.options = self.options.check_lists(enabled);
        self
    }

    /// Toggles conversion of nested values altogether
    pub fn check_types(mut self, enabled: bool) -> Self {
        self.options = self.options.check_types(enabled);
        self
    }

    /// Builds the record, resolving every value once
    pub fn build(self) -> Record {
        let Self {
            mut source,
            fields,
            options,
        } = self;
        source.extend(fields);
        trace!(
            entries = source.len(),
            check_lists = options.check_lists,
            check_types = options.check_types,
            "building record"
        );
        Record::from_map_with(source, options)
    }
}
