//! Value types stored in records.
//!
//! [`Value`] is the dynamic value model of the crate. Leaf values (null,
//! booleans, numbers, text and opaque bytes) are stored untouched. Branch
//! values are lists, plain maps and records; the resolution rule turns plain
//! maps into records when they enter a [`Record`].

use std::fmt;

use indexmap::IndexMap;

use crate::{RecordError, record::Record};

/// Insertion-ordered plain mapping, the unconverted counterpart of [`Record`].
pub type Map = IndexMap<String, Value>;

/// Values that can be stored in a [`Record`].
///
/// # Value Types
///
/// ## Leaf Values
/// - [`Value::Null`] - absent/empty value
/// - [`Value::Bool`] - booleans
/// - [`Value::Int`] - 64-bit signed integers
/// - [`Value::Float`] - 64-bit floats
/// - [`Value::Text`] - UTF-8 strings
/// - [`Value::Bytes`] - opaque binary payloads
///
/// ## Branch Values
/// - [`Value::List`] - ordered sequences
/// - [`Value::Map`] - plain mappings without dot-access
/// - [`Value::Record`] - mappings with dot-access
///
/// # Comparisons
///
/// A plain map and a record are equal when they hold equal entries, the same
/// way two mappings compare regardless of their wrapper. Values also compare
/// directly with primitives:
///
/// ```
/// # use dotwiz::Value;
/// assert!(Value::from(42) == 42);
/// assert!(Value::from("hello") == "hello");
/// assert!(Value::from(true) == true);
/// assert!(!(Value::from(42) == "42"));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null/empty value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Opaque bytes, never inspected by the resolution rule
    Bytes(Vec<u8>),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Plain mapping, left as-is when conversion is disabled
    Map(Map),
    /// Mapping with attribute access
    Record(Record),
}

impl Value {
    /// Returns true if this is a leaf value
    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }

    /// Returns true if this value can contain other values
    pub fn is_branch(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_) | Value::Record(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for plain maps and records
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Record(_))
    }

    /// Returns true if this value is a record
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Reads attribute `name` when this value is a record.
    ///
    /// Any other value has no attributes, so the lookup reports the name as
    /// not found.
    pub fn attr(&self, name: &str) -> Result<&Value, RecordError> {
        match self {
            Value::Record(record) => record.attr(name),
            _ => Err(RecordError::not_found(name)),
        }
    }

    /// Reads element `index` when this value is a list.
    pub fn at(&self, index: usize) -> Result<&Value, RecordError> {
        match self {
            Value::List(list) => list.get(index).ok_or(RecordError::IndexOutOfRange {
                index,
                len: list.len(),
            }),
            other => Err(RecordError::mismatch("list", other.type_name())),
        }
    }

    /// Converts every nested record back into a plain map.
    pub fn to_plain(&self) -> Value {
        match self {
            Value::Record(record) => Value::Map(record.to_map()),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_plain()))
                    .collect(),
            ),
            Value::List(list) => Value::List(list.iter().map(Value::to_plain).collect()),
            leaf => leaf.clone(),
        }
    }

    /// Same as [`Value::to_plain`], also stripping leading and trailing
    /// underscores from every key.
    pub fn to_plain_stripped(&self) -> Value {
        match self {
            Value::Record(record) => Value::Map(record.to_map_stripped()),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (strip_snakes(k), v.to_plain_stripped()))
                    .collect(),
            ),
            Value::List(list) => {
                Value::List(list.iter().map(Value::to_plain_stripped).collect())
            }
            leaf => leaf.clone(),
        }
    }

    /// Borrows the entries of a plain map or a record.
    pub(crate) fn entries(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::Record(record) => Some(record.as_map()),
            _ => None,
        }
    }
}

/// Removes leading and trailing underscores from a key.
pub(crate) fn strip_snakes(key: &str) -> String {
    key.trim_matches('_').to_string()
}

/// Writes a text value quoted, escaping embedded quotes and backslashes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => match (self.entries(), other.entries()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// Human-readable rendering. Text is quoted so that `1` and `"1"` stay
/// distinguishable; records use the record rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Text(s) => write_quoted(f, s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {value}")?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// TryFrom implementations for typed extraction
impl TryFrom<&Value> for i64 {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_int()
            .ok_or_else(|| RecordError::mismatch("int", value.type_name()))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| RecordError::mismatch("float", value.type_name()))
    }
}

impl TryFrom<&Value> for bool {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_bool()
            .ok_or_else(|| RecordError::mismatch("bool", value.type_name()))
    }
}

impl TryFrom<&Value> for String {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| RecordError::mismatch("text", value.type_name()))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = RecordError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .ok_or_else(|| RecordError::mismatch("text", value.type_name()))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Record {
    type Error = RecordError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value
            .as_record()
            .ok_or_else(|| RecordError::mismatch("record", value.type_name()))
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(n) if n == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
