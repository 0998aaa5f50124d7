//! JSON strings, files and JSON Lines.

use std::io::Write;

use dotwiz::{Record, Value, record};
use tempfile::NamedTempFile;

use crate::helpers::profile_source;

#[test]
fn test_json_string_round_trip() {
    let rec = Record::from_map(profile_source());
    let json = rec.to_json_string(true).unwrap();
    let decoded = Record::from_json(&json).unwrap();

    assert_eq!(decoded, rec);
    assert_eq!(decoded.dot("roles.0.name").unwrap(), "admin");
    assert_eq!(
        decoded.keys().collect::<Vec<_>>(),
        ["name", "address", "roles"]
    );
}

#[test]
fn test_json_file_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let rec = record! { "_meta_" => record! { "version" => 2 }, "items" => vec![1, 2, 3] };

    rec.to_json_file(file.path(), true).unwrap();
    let loaded = Record::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, rec);

    rec.to_json_file(file.path(), false).unwrap();
    let stripped = Record::from_json_file(file.path()).unwrap();
    assert_eq!(*stripped.dot("meta.version").unwrap(), 2);
    assert!(!stripped.contains_key("_meta_"));
}

#[test]
fn test_jsonl_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# exported users").unwrap();
    writeln!(file, r#"{{"name": "Alice", "tags": [{{"k": "v"}}]}}"#).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"{{"name": "Bob"}}"#).unwrap();
    file.flush().unwrap();

    let records = Record::from_jsonl_file(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].dot("tags.0.k").unwrap(), "v");
    assert_eq!(records[1].attr("name").unwrap(), "Bob");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Record::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_io_error());
    assert_eq!(err.module(), "io");
}

#[test]
fn test_top_level_array_is_not_a_record() {
    let value = Value::from_json(r#"[{"a": 1}]"#).unwrap();
    assert!(value.at(0).unwrap().is_record());
    assert!(Record::from_json(r#"[{"a": 1}]"#).unwrap_err().is_type_error());
}
