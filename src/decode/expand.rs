use crate::decode::node::{NodeValue, ObjectNode};
use crate::error::{DecodeError, DecodeResult};
use crate::shared::constants::DOT;
use crate::shared::validation::is_identifier_segment;

/// Expand unquoted dotted keys into nested objects (safe mode).
///
/// A key participates when it has two or more segments and every segment
/// is identifier-safe; quoted keys stay literal. Document order of the
/// surviving top-level keys is preserved.
///
/// # Errors
///
/// In strict mode, returns [`DecodeError::PathConflict`] when expansion
/// meets an incompatible existing value; lax mode deep-merges objects and
/// lets the last write win otherwise.
pub fn expand_paths_safe(value: NodeValue, strict: bool) -> DecodeResult<NodeValue> {
    match value {
        NodeValue::Array(items) => {
            let mut expanded = Vec::with_capacity(items.len());
            for item in items {
                expanded.push(expand_paths_safe(item, strict)?);
            }
            Ok(NodeValue::Array(expanded))
        }
        NodeValue::Object(obj) => Ok(NodeValue::Object(expand_object(obj, strict)?)),
        scalar => Ok(scalar),
    }
}

fn expand_object(obj: ObjectNode, strict: bool) -> DecodeResult<ObjectNode> {
    let quoted_keys = obj.quoted_keys;
    let mut expanded = ObjectNode::default();

    for (key, value) in obj.entries {
        let value = expand_paths_safe(value, strict)?;

        if key.contains(DOT) && !quoted_keys.contains(&key) {
            let segments: Vec<&str> = key.split(DOT).collect();
            if segments.iter().all(|segment| is_identifier_segment(segment)) {
                insert_path(&mut expanded.entries, &segments, value, strict)?;
                continue;
            }
        }

        insert_literal(&mut expanded.entries, key, value, strict)?;
    }

    Ok(expanded)
}

fn insert_path(
    entries: &mut Vec<(String, NodeValue)>,
    segments: &[&str],
    value: NodeValue,
    strict: bool,
) -> DecodeResult<()> {
    let [head, tail @ ..] = segments else {
        return Ok(());
    };

    if tail.is_empty() {
        return insert_literal(entries, (*head).to_string(), value, strict);
    }

    let index = match entries.iter().position(|(key, _)| key == head) {
        Some(index) => {
            if !matches!(entries[index].1, NodeValue::Object(_)) {
                if strict {
                    return Err(DecodeError::path_conflict(
                        *head,
                        format!(
                            "expected object but found {}",
                            entries[index].1.type_name()
                        ),
                    ));
                }
                entries[index].1 = NodeValue::Object(ObjectNode::default());
            }
            index
        }
        None => {
            entries.push(((*head).to_string(), NodeValue::Object(ObjectNode::default())));
            entries.len() - 1
        }
    };

    let NodeValue::Object(obj) = &mut entries[index].1 else {
        return Ok(());
    };
    insert_path(&mut obj.entries, tail, value, strict)
}

fn insert_literal(
    entries: &mut Vec<(String, NodeValue)>,
    key: String,
    value: NodeValue,
    strict: bool,
) -> DecodeResult<()> {
    let Some(index) = entries.iter().position(|(existing, _)| *existing == key) else {
        entries.push((key, value));
        return Ok(());
    };

    match (&mut entries[index].1, value) {
        (NodeValue::Object(target), NodeValue::Object(source)) => {
            merge_objects(target, source, strict)
        }
        (existing, value) => {
            if strict {
                return Err(DecodeError::path_conflict(
                    key,
                    format!(
                        "cannot merge {} with {}",
                        existing.type_name(),
                        value.type_name()
                    ),
                ));
            }
            *existing = value;
            Ok(())
        }
    }
}

fn merge_objects(target: &mut ObjectNode, source: ObjectNode, strict: bool) -> DecodeResult<()> {
    for (key, value) in source.entries {
        insert_literal(&mut target.entries, key, value, strict)?;
    }
    Ok(())
}
