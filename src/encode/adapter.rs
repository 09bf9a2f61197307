use crate::encode::normalize::normalize_value;
use crate::options::{EncodeAdapter, PathSegment};
use crate::{Map, Value};

pub fn apply_adapter(root: &Value, adapter: &EncodeAdapter) -> Value {
    if let Some(replacement) = adapter("", root, &[]) {
        let normalized = normalize_value(replacement);
        return visit_children(normalized, adapter, &[]);
    }

    visit_children(root.clone(), adapter, &[])
}

fn visit_children(value: Value, adapter: &EncodeAdapter, path: &[PathSegment]) -> Value {
    match value {
        Value::Obj(entries) => Value::Obj(visit_object(entries, adapter, path)),
        Value::List(items) => Value::List(visit_list(items, adapter, path)),
        scalar => scalar,
    }
}

fn visit_object(entries: Map, adapter: &EncodeAdapter, path: &[PathSegment]) -> Map {
    let mut out = Map::with_capacity(entries.len());

    for (key, value) in entries {
        let mut entry_path = path.to_vec();
        entry_path.push(PathSegment::Key(key.clone()));

        if let Some(replacement) = adapter(&key, &value, &entry_path) {
            let normalized = normalize_value(replacement);
            let visited = visit_children(normalized, adapter, &entry_path);
            out.insert(key, visited);
        }
    }

    out
}

fn visit_list(items: Vec<Value>, adapter: &EncodeAdapter, path: &[PathSegment]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());

    for (idx, value) in items.into_iter().enumerate() {
        let mut element_path = path.to_vec();
        element_path.push(PathSegment::Index(idx));

        if let Some(replacement) = adapter(&idx.to_string(), &value, &element_path) {
            let normalized = normalize_value(replacement);
            out.push(visit_children(normalized, adapter, &element_path));
        }
    }

    out
}
