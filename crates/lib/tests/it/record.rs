//! Attribute/item duality and the resolution rule at every insertion point.

use dotwiz::{Map, Record, RecordError, Value, record};

use crate::helpers::{assert_fully_resolved, map, profile_source};

#[test]
fn test_set_item_visible_through_attribute() {
    let mut rec = Record::new();
    rec.set_item("profile", profile_source());

    let via_attr = rec.attr("profile").unwrap();
    assert!(via_attr.is_record());
    assert_eq!(via_attr, rec.get_item("profile").unwrap());
    assert_eq!(rec.dot("profile.address.city").unwrap(), "Paris");
}

#[test]
fn test_set_attr_visible_through_item() {
    let mut rec = Record::new();
    rec.set_attr("roles", vec![Value::Map(map([("name", Value::from("ops"))]))]);

    let roles = rec.get_item("roles").unwrap();
    assert_eq!(roles.at(0).unwrap().attr("name").unwrap(), "ops");
    assert_fully_resolved(roles);
}

#[test]
fn test_nested_mapping_dot_access() {
    let rec = Record::from_map(map([("a", Value::Map(map([("b", Value::from(1))])))]));
    assert_eq!(*rec.attr("a").unwrap().attr("b").unwrap(), 1);
    assert_eq!(*rec.dot("a.b").unwrap(), 1);
}

#[test]
fn test_sequence_of_mappings() {
    let rec = Record::from_map(map([(
        "a",
        Value::List(vec![Value::Map(map([("b", Value::from(1))])), Value::from(2)]),
    )]));

    let a = rec.attr("a").unwrap();
    assert_eq!(*a.at(0).unwrap().attr("b").unwrap(), 1);
    assert_eq!(*a.at(1).unwrap(), 2);
    assert_eq!(a.as_list().unwrap().len(), 2);
}

#[test]
fn test_every_reachable_mapping_is_a_record() {
    let rec = Record::from_map(profile_source());
    assert_fully_resolved(&Value::Record(rec.clone()));
    assert_eq!(*rec.dot("roles.2.0.deep").unwrap(), true);
    assert_eq!(*rec.dot("address.geo.lat").unwrap(), 48.85);
}

#[test]
fn test_delete_attribute_removes_item() {
    let mut rec = Record::from_map(profile_source());
    let removed = rec.del_attr("address").unwrap();
    assert!(removed.is_record());

    let err = rec.get_item("address").unwrap_err();
    assert_eq!(
        err,
        RecordError::KeyNotFound {
            key: "address".to_string()
        }
    );
    assert!(!rec.contains_key("address"));
}

#[test]
fn test_delete_item_removes_attribute() {
    let mut rec = Record::from_map(profile_source());
    rec.del_item("name").unwrap();
    assert!(rec.attr("name").unwrap_err().is_not_found());
    assert!(rec.del_attr("name").unwrap_err().is_not_found());
}

#[test]
fn test_update_keyword_overrides_win() {
    let mut rec = Record::new();
    rec.update_with(map([("x", Value::from(1))]), [("x", 2)]);
    assert_eq!(*rec.attr("x").unwrap(), 2);
}

#[test]
fn test_update_resolves_incoming_values() {
    let mut rec = record! { "name" => "Bob" };
    rec.update(profile_source());
    assert_eq!(rec.attr("name").unwrap(), "Alice");
    assert_fully_resolved(&Value::Record(rec));
}

#[test]
fn test_update_preserves_existing_position() {
    let mut rec = record! { "a" => 1, "b" => 2 };
    rec.update([("a", 10), ("c", 3)]);
    assert_eq!(rec.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn test_round_trip_through_plain_map() {
    let rec = Record::from_map(profile_source());
    let plain: Map = rec.to_map();

    match &plain["address"] {
        Value::Map(address) => assert!(address["geo"].as_map().is_some()),
        other => panic!("expected a plain map, got {other:?}"),
    }

    let rebuilt = Record::from_map(plain);
    assert_eq!(rebuilt, rec);
    assert_eq!(rebuilt.to_string(), rec.to_string());
}

#[test]
fn test_named_field_construction() {
    let rec = record! {
        "user" => profile_source(),
        "count" => 3,
        "ratio" => 0.5,
        "missing" => Option::<i64>::None,
    };
    assert_eq!(rec.dot("user.roles.0.name").unwrap(), "admin");
    assert_eq!(rec.get_as::<i64>("count"), Some(3));
    assert_eq!(rec.get_as::<f64>("ratio"), Some(0.5));
    assert!(rec.attr("missing").unwrap().is_null());
}

#[test]
fn test_collect_into_record() {
    let rec: Record = (0..3).map(|i| (format!("k{i}"), Value::from(i))).collect();
    assert_eq!(rec.len(), 3);
    assert_eq!(*rec.attr("k2").unwrap(), 2);
}

#[test]
fn test_render_is_readable() {
    let rec = record! { "a" => 1, "b" => record! { "c" => "d" } };
    let rendered = rec.to_string();
    assert!(rendered.starts_with('☣'));
    assert!(rendered.contains("a=1"));
    assert!(rendered.contains(r#"b=☣ (c="d")"#));
}

#[test]
fn test_nested_mutation_in_place() {
    let mut rec = Record::from_map(profile_source());
    rec.attr_record_mut("address")
        .unwrap()
        .set_item("zip", map([("code", Value::from("75001"))]));
    assert_eq!(rec.dot("address.zip.code").unwrap(), "75001");

    rec.set_dot("roles.0.name", "root").unwrap();
    assert_eq!(rec.dot("roles.0.name").unwrap(), "root");
}
