//! JSON encoding and decoding for records.
//!
//! Decoding converts every JSON object into a [`Record`] as it is read, so a
//! decoded record needs no separate resolution pass. Encoding writes records
//! and plain maps as JSON objects in insertion order.
//!
//! ```
//! use dotwiz::Record;
//!
//! let rec = Record::from_json(r#"{"key_1": [{"k": "v"}], "keyTwo": "5", "key-3": 3.21}"#)?;
//! assert_eq!(rec.dot("key_1.0.k")?, "v");
//! assert_eq!(
//!     rec.to_json_string(true)?,
//!     r#"{"key_1":[{"k":"v"}],"keyTwo":"5","key-3":3.21}"#
//! );
//! # Ok::<(), dotwiz::Error>(())
//! ```

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};
use tracing::debug;

use crate::{
    RecordError, Result,
    record::Record,
    resolve::ResolveOptions,
    value::{Map, Value},
};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::List(list) => serializer.collect_seq(list),
            Value::Map(map) => serializer.collect_map(map),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.as_map())
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Value, E> {
        Ok(Value::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            list.push(element);
        }
        Ok(Value::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        // children were converted on the way up
        Ok(Value::Record(Record::from_map_with(
            map,
            ResolveOptions::shallow(),
        )))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(d)? {
            Value::Record(record) => Ok(record),
            other => Err(de::Error::custom(format!(
                "expected an object, found {}",
                other.type_name()
            ))),
        }
    }
}

impl From<serde_json::Value> for Value {
    /// Objects become plain maps; they turn into records once stored in one.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    /// Non-finite floats have no JSON form and become null.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(bytes) => serde_json::Value::Array(
                bytes.iter().map(|b| serde_json::Value::from(*b)).collect(),
            ),
            Value::List(list) => {
                serde_json::Value::Array(list.iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => json_object(map),
            Value::Record(record) => json_object(record.as_map()),
        }
    }
}

fn json_object(map: &Map) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
            .collect(),
    )
}

impl Value {
    /// Decodes any JSON document; objects become records.
    pub fn from_json(json: &str) -> Result<Value> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Record {
    /// Decodes a JSON object into a record.
    ///
    /// Fails with a type mismatch when the document is valid JSON but not an
    /// object.
    pub fn from_json(json: &str) -> Result<Record> {
        into_record(Value::from_json(json)?)
    }

    /// Decodes the JSON object stored in the file at `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Record> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let value: Value = serde_json::from_reader(reader)?;
        debug!(path = %path.display(), "loaded record from JSON file");
        into_record(value)
    }

    /// Decodes one JSON object per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_jsonl(reader: impl BufRead) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            records.push(Record::from_json(line)?);
        }
        Ok(records)
    }

    /// Decodes a JSON Lines file, see [`Record::from_jsonl`].
    pub fn from_jsonl_file(path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let records = Self::from_jsonl(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), count = records.len(), "loaded records from JSON Lines file");
        Ok(records)
    }

    /// Encodes the record as a JSON string.
    ///
    /// With `keep_snakes` off, leading and trailing underscores are stripped
    /// from every key first.
    pub fn to_json_string(&self, keep_snakes: bool) -> Result<String> {
        let json = if keep_snakes {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string(&self.to_map_stripped())?
        };
        Ok(json)
    }

    /// Writes the record as JSON to the file at `path`, replacing its contents.
    pub fn to_json_file(&self, path: impl AsRef<Path>, keep_snakes: bool) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if keep_snakes {
            serde_json::to_writer(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, &self.to_map_stripped())?;
        }
        writer.flush()?;
        debug!(path = %path.display(), entries = self.len(), "wrote record to JSON file");
        Ok(())
    }
}

fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Record(record) => Ok(record),
        other => Err(RecordError::mismatch("object", other.type_name()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn objects_decode_as_records_at_every_level() {
        let rec = Record::from_json(r#"{"a": {"b": [{"c": 1}, 2.5, null]}}"#).unwrap();
        assert!(rec.attr("a").unwrap().is_record());
        assert_eq!(*rec.dot("a.b.0.c").unwrap(), 1);
        assert_eq!(*rec.dot("a.b.1").unwrap(), 2.5);
        assert!(rec.dot("a.b.2").unwrap().is_null());
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = Record::from_json("[1, 2]").unwrap_err();
        assert!(err.is_type_error());
        let err = Record::from_json("{not json").unwrap_err();
        assert!(err.is_json_error());
    }

    #[test]
    fn large_unsigned_numbers_fall_back_to_float() {
        let value = Value::from_json("18446744073709551615").unwrap();
        assert!(matches!(value, Value::Float(_)));
    }

    #[test]
    fn stripped_keys_in_json_output() {
        let rec = record! { "_id_" => 1, "inner" => record! { "__x" => true } };
        assert_eq!(
            rec.to_json_string(false).unwrap(),
            r#"{"id":1,"inner":{"x":true}}"#
        );
        assert_eq!(
            rec.to_json_string(true).unwrap(),
            r#"{"_id_":1,"inner":{"__x":true}}"#
        );
    }

    #[test]
    fn serde_json_value_conversions() {
        let json = serde_json::json!({"a": {"b": [1, 2.5, "x"]}});
        let value = Value::from(json.clone());
        assert!(value.as_map().is_some());
        let rec = Record::from_map(value.as_map().unwrap().clone());
        assert!(rec.attr("a").unwrap().is_record());
        assert_eq!(serde_json::Value::from(&Value::Record(rec)), json);

        assert_eq!(
            serde_json::Value::from(&Value::Float(f64::NAN)),
            serde_json::Value::Null
        );
    }

    #[test]
    fn jsonl_skips_blank_and_comment_lines() {
        let input = "# header\n{\"a\": 1}\n\n  {\"a\": 2}\n";
        let records = Record::from_jsonl(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(*records[1].attr("a").unwrap(), 2);
    }
}
