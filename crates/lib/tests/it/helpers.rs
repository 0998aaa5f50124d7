use dotwiz::{Map, Value};

/// Builds a plain map from `(key, value)` pairs
pub fn map<const N: usize>(pairs: [(&str, Value); N]) -> Map {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// A nested source resembling a user profile: maps under keys, maps inside
/// lists and scalars mixed in.
pub fn profile_source() -> Map {
    map([
        ("name", Value::from("Alice")),
        (
            "address",
            Value::Map(map([
                ("city", Value::from("Paris")),
                ("geo", Value::Map(map([("lat", Value::from(48.85))]))),
            ])),
        ),
        (
            "roles",
            Value::List(vec![
                Value::Map(map([("name", Value::from("admin"))])),
                Value::from("guest"),
                Value::List(vec![Value::Map(map([("deep", Value::from(true))]))]),
            ]),
        ),
    ])
}

/// Asserts that no plain map is reachable from `value`
pub fn assert_fully_resolved(value: &Value) {
    match value {
        Value::Map(map) => panic!("plain map left unconverted: {map:?}"),
        Value::List(list) => list.iter().for_each(assert_fully_resolved),
        Value::Record(record) => record.values().for_each(assert_fully_resolved),
        _ => {}
    }
}
