use std::collections::HashSet;

use crate::options::{KeyFolding, ResolvedEncodeOptions};
use crate::shared::constants::DOT;
use crate::shared::validation::is_identifier_segment;
use crate::{Map, Value};

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub folded_key: String,
    // The multi-key object the chain stopped at, if any; emitted nested
    // under the folded key with a reduced depth budget.
    pub remainder: Option<Map>,
    pub leaf: Value,
    pub segment_count: usize,
}

// Folding requires safe mode, a chain of at least two identifier-safe
// segments within the depth budget, no sibling carrying the folded name,
// and no literal dotted root key equal to the folded absolute path.
#[must_use]
pub fn try_fold_chain(
    key: &str,
    value: &Value,
    siblings: &Map,
    options: &ResolvedEncodeOptions,
    root_literal_keys: Option<&HashSet<String>>,
    path: &[String],
    flatten_depth: usize,
) -> Option<FoldResult> {
    if options.key_folding != KeyFolding::Safe {
        return None;
    }

    if !matches!(value, Value::Obj(_)) {
        return None;
    }

    if flatten_depth < 2 {
        return None;
    }

    let (segments, remainder, leaf) = collect_single_key_chain(key, value, flatten_depth);

    if segments.len() < 2 {
        return None;
    }

    if !segments.iter().all(|segment| is_identifier_segment(segment)) {
        return None;
    }

    let folded_key = segments.join(&DOT.to_string());

    if siblings.contains_key(&folded_key) {
        return None;
    }

    if let Some(root_keys) = root_literal_keys {
        let absolute = if path.is_empty() {
            folded_key.clone()
        } else {
            format!("{}{DOT}{folded_key}", path.join(&DOT.to_string()))
        };
        if root_keys.contains(&absolute) {
            return None;
        }
    }

    Some(FoldResult {
        folded_key,
        remainder,
        leaf,
        segment_count: segments.len(),
    })
}

fn collect_single_key_chain(
    start_key: &str,
    start_value: &Value,
    max_depth: usize,
) -> (Vec<String>, Option<Map>, Value) {
    let mut segments = vec![start_key.to_string()];
    let mut current = start_value.clone();

    while segments.len() < max_depth {
        let (next_key, next_value) = {
            let Value::Obj(entries) = &current else {
                break;
            };
            let Some((key, value)) = entries.first() else {
                break;
            };
            if entries.len() != 1 {
                break;
            }
            (key.clone(), value.clone())
        };
        segments.push(next_key);
        current = next_value;
    }

    if let Value::Obj(ref entries) = current {
        if entries.is_empty() {
            return (segments, None, current.clone());
        }
        return (segments, Some(entries.clone()), current.clone());
    }

    (segments, None, current)
}
