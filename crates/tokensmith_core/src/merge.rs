//! Deep merge of layer documents

use serde_json::{Map, Value};

/// Merge `source` into `target`.
///
/// Objects merge key by key so a later layer can override one nested field
/// without dropping its siblings. Anything else (scalars, arrays, or a type
/// change between layers) is replaced wholesale by the later value.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                let nested = value.is_object() && target.get(key).is_some_and(Value::is_object);
                match target.get_mut(key) {
                    Some(existing) if nested => deep_merge(existing, value),
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Merge documents in order; later documents win.
pub fn merge_layers<'a, I>(documents: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut merged = Value::Object(Map::new());
    for doc in documents {
        deep_merge(&mut merged, doc);
    }
    merged
}
