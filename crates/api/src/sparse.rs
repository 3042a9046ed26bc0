//! Sparse JSON: object members whose value is `null` are dropped, never sent.

use serde::Serialize;
use serde_json::Value;

pub fn to_sparse_value<T: Serialize + ?Sized>(payload: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(payload)?;
    strip_nulls(&mut value);
    Ok(value)
}

/// Removes `null` members from every object, recursing into arrays.
/// Array elements that are `null` are kept so positions don't shift.
pub fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                strip_nulls(item);
            }
        }
        _ => {}
    }
}
