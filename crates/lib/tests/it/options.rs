//! Construction flags that trade dot-access depth for construction speed.

use dotwiz::{Record, ResolveOptions, Value};

use crate::helpers::profile_source;

#[test]
fn test_check_types_off_keeps_nested_maps_plain() {
    let rec = Record::from_map_with(profile_source(), ResolveOptions::new().check_types(false));

    // top-level access still works
    assert_eq!(rec.attr("name").unwrap(), "Alice");
    assert_eq!(rec["name"], "Alice");

    // but there is no dot-access below it
    let address = rec.attr("address").unwrap();
    assert!(address.as_map().is_some());
    assert!(address.attr("city").unwrap_err().is_not_found());
    assert!(rec.dot("address.city").unwrap_err().is_not_found());
}

#[test]
fn test_check_lists_off_converts_maps_but_not_lists() {
    let rec = Record::builder()
        .source(profile_source())
        .check_lists(false)
        .build();

    assert_eq!(rec.dot("address.geo.lat").unwrap(), &Value::from(48.85));

    let roles = rec.attr("roles").unwrap().as_list().unwrap();
    assert!(roles[0].as_map().is_some());
    assert!(rec.dot("roles.0.name").is_err());
}

#[test]
fn test_shallow_records_convert_on_later_assignment() {
    let mut rec = Record::from_map_with(profile_source(), ResolveOptions::shallow());
    assert!(rec.attr("address").unwrap().as_map().is_some());

    // the flags apply to construction only
    let address = rec.attr("address").unwrap().clone();
    rec.set_attr("address", address);
    assert_eq!(rec.dot("address.city").unwrap(), "Paris");
}

#[test]
fn test_shallow_and_full_records_compare_equal() {
    let shallow = Record::from_map_with(profile_source(), ResolveOptions::shallow());
    let full = Record::from_map(profile_source());
    assert_eq!(shallow, full);
}

#[test]
fn test_default_options_convert_everything() {
    assert_eq!(ResolveOptions::default(), ResolveOptions::new());
    let options = ResolveOptions::default();
    assert!(options.check_lists && options.check_types);
}
