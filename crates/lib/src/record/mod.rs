//! The [`Record`] type: an ordered mapping with an attribute view.
//!
//! A record keeps its entries in one insertion-ordered map. The attribute
//! facade (`attr`, `set_attr`, `del_attr`, `dot`) and the item facade
//! (`get_item`, `set_item`, `del_item`, indexing) are two entry points over
//! that same map, so a write through one is immediately visible through the
//! other.
//!
//! # Usage
//!
//! ```
//! use dotwiz::{Record, Value, record};
//!
//! let mut rec = record! {
//!     "key_1" => vec![record! { "k" => "v" }],
//!     "keyTwo" => "5",
//!     "key-3" => 3.21,
//! };
//!
//! assert_eq!(rec.dot("key_1.0.k")?, "v");
//! assert_eq!(rec.attr("keyTwo")?, "5");
//! assert_eq!(rec["key-3"], 3.21);
//!
//! rec.set_attr("extra", record! { "deep" => true });
//! assert_eq!(*rec.get_item("extra")?.attr("deep")?, true);
//!
//! rec.del_item("extra")?;
//! assert!(rec.attr("extra").unwrap_err().is_not_found());
//! # Ok::<(), dotwiz::Error>(())
//! ```
//!
//! # Concurrency
//!
//! Records have no interior mutability and no locking. Sharing one between
//! threads for mutation needs an external `Mutex` or `RwLock`.

use std::{fmt, ops::Index};

use tracing::debug;

use crate::{
    RecordError,
    path::{PathBuf, Step},
    resolve::{ResolveOptions, resolve},
    value::{Map, Value, strip_snakes},
};

mod builder;
mod merge;

pub use builder::RecordBuilder;

/// Prefix used when rendering a record.
pub const PRINT_CHAR: char = '☣';

/// An ordered mapping whose keys are also readable as attributes.
///
/// Every value stored in a record has passed through the resolution rule, so
/// nested maps are records too and dot-access works at every level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map,
}

impl Record {
    /// Creates a new empty record
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Creates an empty record with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Map::with_capacity(capacity),
        }
    }

    /// Builds a record from a plain map, converting nested values
    pub fn from_map(map: Map) -> Self {
        Self::from_map_with(map, ResolveOptions::default())
    }

    /// Builds a record from a plain map with explicit resolution switches.
    ///
    /// With `check_types` off the map is adopted as the backing store as-is.
    pub fn from_map_with(map: Map, options: ResolveOptions) -> Self {
        if !options.check_types {
            return Self { fields: map };
        }
        let fields = map
            .into_iter()
            .map(|(key, value)| (key, resolve(value, options)))
            .collect();
        Self { fields }
    }

    /// Builds a record from named fields.
    ///
    /// ```
    /// # use dotwiz::Record;
    /// let rec = Record::from_fields([("name", "Alice"), ("city", "Paris")]);
    /// assert_eq!(rec.attr("city").unwrap(), "Paris");
    /// ```
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Self::new();
        record.extend(fields);
        record
    }

    /// Starts a [`RecordBuilder`] for construction with a source map,
    /// overriding fields and resolution switches.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    /// Builds a record with every key in `keys` mapped to a copy of `value`
    pub fn from_keys<I, K>(keys: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let value = resolve(value.into(), ResolveOptions::default());
        let fields = keys
            .into_iter()
            .map(|key| (key.into(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Borrows the backing store
    pub fn as_map(&self) -> &Map {
        &self.fields
    }

    /// Consumes the record, returning the backing store.
    ///
    /// Nested records stay records; use [`Record::to_map`] for a fully plain
    /// structure.
    pub fn into_inner(self) -> Map {
        self.fields
    }

    fn lookup(&self, key: &str) -> Result<&Value, RecordError> {
        self.fields
            .get(key)
            .ok_or_else(|| RecordError::not_found(key))
    }

    fn store(&mut self, key: String, value: Value, options: ResolveOptions) -> Option<Value> {
        self.fields.insert(key, resolve(value, options))
    }

    fn evict(&mut self, key: &str) -> Result<Value, RecordError> {
        self.fields
            .shift_remove(key)
            .ok_or_else(|| RecordError::not_found(key))
    }
}

// Attribute facade
impl Record {
    /// Reads attribute `name`.
    pub fn attr(&self, name: &str) -> Result<&Value, RecordError> {
        self.lookup(name)
    }

    /// Borrows the nested record stored under attribute `name` for in-place
    /// mutation.
    pub fn attr_record_mut(&mut self, name: &str) -> Result<&mut Record, RecordError> {
        match self.fields.get_mut(name) {
            Some(Value::Record(record)) => Ok(record),
            Some(other) => Err(RecordError::mismatch("record", other.type_name())),
            None => Err(RecordError::not_found(name)),
        }
    }

    /// Sets attribute `name`, returning the previous value if present.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.store(name.into(), value.into(), ResolveOptions::default())
    }

    /// Deletes attribute `name`, returning its value.
    pub fn del_attr(&mut self, name: &str) -> Result<Value, RecordError> {
        self.evict(name)
    }

    /// Returns true if attribute `name` exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Reads a value through a dotted path such as `"a.b.0.c"`.
    ///
    /// Records are entered by attribute name, lists by position. Plain maps
    /// (left unconverted by disabled resolution) have no attributes and stop
    /// the walk with a not-found error.
    pub fn dot(&self, path: impl AsRef<str>) -> Result<&Value, RecordError> {
        let path = PathBuf::normalize(path.as_ref());
        let steps: Vec<_> = path.steps().collect();
        let (first, rest) = steps
            .split_first()
            .ok_or_else(|| RecordError::not_found(path.to_string()))?;

        let mut current = self
            .fields
            .get(first.as_key())
            .ok_or_else(|| RecordError::not_found(path.as_str()))?;
        for step in rest {
            current = match (current, step) {
                (Value::Record(record), step) => record
                    .fields
                    .get(step.as_key())
                    .ok_or_else(|| RecordError::not_found(path.as_str()))?,
                (Value::List(list), Step::Index(index, _)) => {
                    list.get(*index).ok_or(RecordError::IndexOutOfRange {
                        index: *index,
                        len: list.len(),
                    })?
                }
                _ => return Err(RecordError::not_found(path.as_str())),
            };
        }
        Ok(current)
    }

    /// Assigns through a dotted path.
    ///
    /// Every component but the last must already exist. The last component
    /// names an attribute of a record, or a position of a list when the
    /// parent is a list. Returns the replaced value, if any.
    pub fn set_dot(
        &mut self,
        path: impl AsRef<str>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, RecordError> {
        let path = PathBuf::normalize(path.as_ref());
        let steps: Vec<_> = path.steps().collect();
        let (last, parents) = steps
            .split_last()
            .ok_or_else(|| RecordError::not_found(path.to_string()))?;
        let value = value.into();

        if parents.is_empty() {
            return Ok(self.set_attr(last.as_key(), value));
        }

        match (self.value_at_mut(parents, path.as_str())?, last) {
            (Value::Record(record), last) => Ok(record.set_attr(last.as_key(), value)),
            (Value::List(list), Step::Index(index, _)) => {
                let len = list.len();
                let slot = list.get_mut(*index).ok_or(RecordError::IndexOutOfRange {
                    index: *index,
                    len,
                })?;
                let resolved = resolve(value, ResolveOptions::default());
                Ok(Some(std::mem::replace(slot, resolved)))
            }
            (other, _) => Err(RecordError::mismatch("record", other.type_name())),
        }
    }

    /// Deletes the attribute addressed by a dotted path, returning its value.
    pub fn del_dot(&mut self, path: impl AsRef<str>) -> Result<Value, RecordError> {
        let path = PathBuf::normalize(path.as_ref());
        let steps: Vec<_> = path.steps().collect();
        let (last, parents) = steps
            .split_last()
            .ok_or_else(|| RecordError::not_found(path.to_string()))?;

        if parents.is_empty() {
            return self.del_attr(last.as_key());
        }

        match self.value_at_mut(parents, path.as_str())? {
            Value::Record(record) => record
                .fields
                .shift_remove(last.as_key())
                .ok_or_else(|| RecordError::not_found(path.as_str())),
            _ => Err(RecordError::not_found(path.as_str())),
        }
    }

    fn value_at_mut(&mut self, steps: &[Step<'_>], full: &str) -> Result<&mut Value, RecordError> {
        let (first, rest) = steps
            .split_first()
            .ok_or_else(|| RecordError::not_found(full))?;

        let mut current = self
            .fields
            .get_mut(first.as_key())
            .ok_or_else(|| RecordError::not_found(full))?;
        for step in rest {
            current = match (current, step) {
                (Value::Record(record), step) => record
                    .fields
                    .get_mut(step.as_key())
                    .ok_or_else(|| RecordError::not_found(full))?,
                (Value::List(list), Step::Index(index, _)) => {
                    let len = list.len();
                    list.get_mut(*index)
                        .ok_or(RecordError::IndexOutOfRange { index: *index, len })?
                }
                _ => return Err(RecordError::not_found(full)),
            };
        }
        Ok(current)
    }
}

// Item facade
impl Record {
    /// Reads the value stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<&Value, RecordError> {
        self.lookup(key)
    }

    /// Stores `value` under `key`, returning the previous value if present.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.store(key.into(), value.into(), ResolveOptions::default())
    }

    /// Removes `key`, returning its value.
    pub fn del_item(&mut self, key: &str) -> Result<Value, RecordError> {
        self.evict(key)
    }

    /// Returns true if the record contains `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

// Mapping API
impl Record {
    /// Returns the value under `key`, if any
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns a copy of the value under `key`, or `default` when absent
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.fields.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Gets a value by key with automatic type conversion using TryFrom.
    ///
    /// Returns `None` if the key doesn't exist or the conversion fails.
    ///
    /// ```
    /// # use dotwiz::record;
    /// let rec = record! { "name" => "Alice", "age" => 30 };
    /// assert_eq!(rec.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(rec.get_as::<i64>("age"), Some(30));
    /// assert_eq!(rec.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: &str) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = RecordError>,
    {
        T::try_from(self.fields.get(key)?).ok()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no entries
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over the keys in insertion order
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &String> + ExactSizeIterator {
        self.fields.keys()
    }

    /// Returns an iterator over the values in insertion order
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.fields.values()
    }

    /// Returns an iterator over the entries in insertion order.
    ///
    /// The iterator is double ended; `.rev()` walks the entries newest first.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Removes `key` and returns its value
    pub fn pop(&mut self, key: &str) -> Result<Value, RecordError> {
        self.evict(key)
    }

    /// Removes `key` and returns its value, or `default` when absent
    pub fn pop_or(&mut self, key: &str, default: impl Into<Value>) -> Value {
        self.fields
            .shift_remove(key)
            .unwrap_or_else(|| default.into())
    }

    /// Removes and returns the most recently inserted entry
    pub fn pop_item(&mut self) -> Result<(String, Value), RecordError> {
        self.fields.pop().ok_or_else(|| RecordError::Empty {
            operation: "pop_item".to_string(),
        })
    }

    /// Returns the value under `key`, storing `default` first when the key is
    /// absent or holds null.
    ///
    /// ```
    /// # use dotwiz::Record;
    /// let mut rec = Record::new();
    /// assert_eq!(*rec.set_default("count", 0), 0);
    /// rec.set_item("count", 5);
    /// assert_eq!(*rec.set_default("count", 100), 5);
    /// ```
    pub fn set_default(&mut self, key: impl Into<String>, default: impl Into<Value>) -> &Value {
        let slot = self.fields.entry(key.into()).or_insert(Value::Null);
        if slot.is_null() {
            *slot = resolve(default.into(), ResolveOptions::default());
        }
        slot
    }

    /// Merges entries into the record, resolving each incoming value.
    /// Incoming values overwrite existing ones.
    pub fn update<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.update_from(other, ResolveOptions::default());
    }

    /// Merges `other`, then `more`, so entries of `more` win over both the
    /// existing entries and `other`.
    ///
    /// ```
    /// # use dotwiz::Record;
    /// let mut rec = Record::new();
    /// rec.update_with([("x", 1)], [("x", 2)]);
    /// assert_eq!(*rec.attr("x").unwrap(), 2);
    /// ```
    pub fn update_with<I, J, K, V, L, W>(&mut self, other: I, more: J)
    where
        I: IntoIterator<Item = (K, V)>,
        J: IntoIterator<Item = (L, W)>,
        K: Into<String>,
        V: Into<Value>,
        L: Into<String>,
        W: Into<Value>,
    {
        self.update(other);
        self.update(more);
    }

    /// Merges entries into the record with explicit resolution switches
    pub fn update_from<I, K, V>(&mut self, other: I, options: ResolveOptions)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let before = self.fields.len();
        for (key, value) in other {
            self.store(key.into(), value.into(), options);
        }
        debug!(
            added = self.fields.len() - before,
            total = self.fields.len(),
            "updated record"
        );
    }

    /// Converts to a plain nested map: every nested record becomes a map.
    pub fn to_map(&self) -> Map {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_plain()))
            .collect()
    }

    /// Converts to a plain nested map, stripping leading and trailing
    /// underscores from every key at every level.
    pub fn to_map_stripped(&self) -> Map {
        self.fields
            .iter()
            .map(|(key, value)| (strip_snakes(key), value.to_plain_stripped()))
            .collect()
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// Panics when `key` is absent, like indexing a map.
    fn index(&self, key: &str) -> &Value {
        match self.fields.get(key) {
            Some(value) => value,
            None => panic!("key not found: {key}"),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Record {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.store(key.into(), value.into(), ResolveOptions::default());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_fields(iter)
    }
}

impl From<Map> for Record {
    fn from(map: Map) -> Self {
        Self::from_map(map)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl PartialEq<Map> for Record {
    fn eq(&self, other: &Map) -> bool {
        &self.fields == other
    }
}

/// Renders as `☣ (key=value, ...)`, for logs and debugging only.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PRINT_CHAR} (")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, ")")
    }
}

/// Builds a [`Record`] from `key => value` pairs.
///
/// ```
/// # use dotwiz::record;
/// let rec = record! {
///     "name" => "Alice",
///     "address" => record! { "city" => "Paris" },
/// };
/// assert_eq!(rec.dot("address.city").unwrap(), "Paris");
/// assert!(record! {}.is_empty());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Record::from_fields([
            $((::std::string::String::from($key), $crate::Value::from($value))),+
        ])
    };
}
