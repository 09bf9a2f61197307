use std::collections::HashSet;

use crate::{Map, Value};

/// Intermediate decode tree. Objects remember which keys were quoted in
/// the source so that path expansion can leave quoted dotted keys alone.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Scalar(Value),
    Array(Vec<NodeValue>),
    Object(ObjectNode),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    pub entries: Vec<(String, NodeValue)>,
    pub quoted_keys: HashSet<String>,
}

impl ObjectNode {
    pub fn push(&mut self, key: String, value: NodeValue, was_quoted: bool) {
        if was_quoted {
            self.quoted_keys.insert(key.clone());
        }
        self.entries.push((key, value));
    }
}

impl NodeValue {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "primitive",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Collapse the decode tree into the public value tree. Duplicate keys in
/// the source resolve to the last value, keeping the first position.
#[must_use]
pub fn node_to_value(node: NodeValue) -> Value {
    match node {
        NodeValue::Scalar(value) => value,
        NodeValue::Array(items) => Value::List(items.into_iter().map(node_to_value).collect()),
        NodeValue::Object(obj) => {
            let mut map = Map::with_capacity(obj.entries.len());
            for (key, value) in obj.entries {
                map.insert(key, node_to_value(value));
            }
            Value::Obj(map)
        }
    }
}
