use dotwiz::{Map, Value};

fn entry(pairs: Vec<(&str, Value)>) -> Map {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Heavily nested items: each carries a list of ten nested maps
pub fn nested_dataset(size: usize) -> Vec<Map> {
    (0..size)
        .map(|_| {
            let nested = (0..10)
                .map(|i| {
                    Value::Map(entry(vec![
                        ("nested_key1", Value::from("nested_value1")),
                        ("nested_key2", Value::from(i)),
                    ]))
                })
                .collect::<Vec<_>>();
            entry(vec![
                ("key1", Value::from("value1")),
                ("key2", Value::List(nested)),
                ("key3", Value::from(3.21)),
            ])
        })
        .collect()
}

/// Flat items with scalar values only
pub fn flat_dataset(size: usize) -> Vec<Map> {
    (0..size)
        .map(|i| {
            entry(vec![
                ("key1", Value::from("value1")),
                ("key2", Value::from(i)),
                ("key3", Value::from(3.21)),
            ])
        })
        .collect()
}
