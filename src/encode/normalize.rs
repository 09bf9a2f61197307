use crate::{Map, Value};

const I64_MIN_AS_F64: f64 = i64::MIN as f64;
// i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
const I64_MAX_AS_F64: f64 = i64::MAX as f64;

// Canonical form: finite numbers only, negative zero and integer-valued
// floats collapsed to integers, object keys in lexicographic order.
#[must_use]
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Float(number) => normalize_number(number),
        Value::List(items) => Value::List(items.into_iter().map(normalize_value).collect()),
        Value::Obj(entries) => {
            let mut normalized: Map = entries
                .into_iter()
                .map(|(key, value)| (key, normalize_value(value)))
                .collect();
            normalized.sort_keys();
            Value::Obj(normalized)
        }
        other => other,
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_number(value: f64) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    if value == 0.0 {
        // Catches -0.0 as well.
        return Value::Int(0);
    }
    if value.fract() == 0.0 && value >= I64_MIN_AS_F64 && value < I64_MAX_AS_F64 {
        return Value::Int(value as i64);
    }
    Value::Float(value)
}

#[must_use]
pub fn is_list_of_scalars(items: &[Value]) -> bool {
    items.iter().all(Value::is_scalar)
}

#[must_use]
pub fn is_list_of_lists(items: &[Value]) -> bool {
    items.iter().all(|item| matches!(item, Value::List(_)))
}

#[must_use]
pub fn is_list_of_objects(items: &[Value]) -> bool {
    items.iter().all(|item| matches!(item, Value::Obj(_)))
}
