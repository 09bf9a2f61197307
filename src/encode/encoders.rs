use std::collections::HashSet;

use crate::encode::folding::try_fold_chain;
use crate::encode::normalize::{is_list_of_lists, is_list_of_objects, is_list_of_scalars};
use crate::encode::primitives::{format_header, join_scalars, render_key, render_scalar};
use crate::options::{KeyOrder, ResolvedEncodeOptions};
use crate::shared::constants::{DOT, LIST_ITEM_MARKER, LIST_ITEM_PREFIX};
use crate::{Map, Value};

// `path` is the object-key chain from the document root, used for explicit
// key ordering; entering a list item leaves path scope (`None`), where only
// canonical order applies.
#[must_use]
pub fn encode_value(value: &Value, options: &ResolvedEncodeOptions) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        Value::List(items) => {
            encode_array(None, items, 0, options, Some(&[]), &mut out);
        }
        Value::Obj(entries) => {
            encode_object_entries(entries, 0, options, None, Some(&[]), None, &mut out);
        }
        scalar => {
            out.push(render_scalar(scalar, options.delimiter));
        }
    }
    out
}

fn encode_object_entries(
    entries: &Map,
    depth: usize,
    options: &ResolvedEncodeOptions,
    root_literal_keys: Option<&HashSet<String>>,
    path: Option<&[String]>,
    fold_budget: Option<usize>,
    out: &mut Vec<String>,
) {
    // Literal dotted keys at the document root suppress colliding folds.
    let mut root_literal_set = HashSet::new();
    let root_literal_keys = if depth == 0 && root_literal_keys.is_none() {
        for key in entries.keys() {
            if key.contains(DOT) {
                root_literal_set.insert(key.clone());
            }
        }
        Some(&root_literal_set)
    } else {
        root_literal_keys
    };

    let fold_budget = fold_budget.unwrap_or(options.flatten_depth);

    for key in ordered_keys(entries, path, options) {
        let value = &entries[key.as_str()];
        encode_entry(
            &key,
            value,
            depth,
            options,
            entries,
            root_literal_keys,
            path,
            fold_budget,
            out,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn encode_entry(
    key: &str,
    value: &Value,
    depth: usize,
    options: &ResolvedEncodeOptions,
    siblings: &Map,
    root_literal_keys: Option<&HashSet<String>>,
    path: Option<&[String]>,
    fold_budget: usize,
    out: &mut Vec<String>,
) {
    if let Some(folded) = try_fold_chain(
        key,
        value,
        siblings,
        options,
        root_literal_keys,
        path.unwrap_or(&[]),
        fold_budget,
    ) {
        let folded_path: Option<Vec<String>> = path.map(|prefix| {
            prefix
                .iter()
                .cloned()
                .chain(folded.folded_key.split(DOT).map(str::to_string))
                .collect()
        });
        let encoded_key = render_key(&folded.folded_key);

        if let Some(remainder) = folded.remainder {
            out.push(indented(depth, &format!("{encoded_key}:"), options.indent));
            let remaining_budget = fold_budget.saturating_sub(folded.segment_count);
            encode_object_entries(
                &remainder,
                depth + 1,
                options,
                root_literal_keys,
                folded_path.as_deref(),
                Some(remaining_budget),
                out,
            );
            return;
        }

        match &folded.leaf {
            Value::List(items) => {
                encode_array(
                    Some(&folded.folded_key),
                    items,
                    depth,
                    options,
                    folded_path.as_deref(),
                    out,
                );
            }
            Value::Obj(_) => {
                // Chain ended on an empty object.
                out.push(indented(depth, &format!("{encoded_key}:"), options.indent));
            }
            scalar => {
                let rendered = render_scalar(scalar, options.delimiter);
                out.push(indented(
                    depth,
                    &format!("{encoded_key}: {rendered}"),
                    options.indent,
                ));
            }
        }
        return;
    }

    let encoded_key = render_key(key);
    let entry_path: Option<Vec<String>> =
        path.map(|prefix| prefix.iter().cloned().chain([key.to_string()]).collect());

    match value {
        Value::List(items) => {
            encode_array(Some(key), items, depth, options, entry_path.as_deref(), out);
        }
        Value::Obj(entries) => {
            out.push(indented(depth, &format!("{encoded_key}:"), options.indent));
            if !entries.is_empty() {
                encode_object_entries(
                    entries,
                    depth + 1,
                    options,
                    root_literal_keys,
                    entry_path.as_deref(),
                    Some(fold_budget),
                    out,
                );
            }
        }
        scalar => {
            let rendered = render_scalar(scalar, options.delimiter);
            out.push(indented(
                depth,
                &format!("{encoded_key}: {rendered}"),
                options.indent,
            ));
        }
    }
}

fn encode_array(
    key: Option<&str>,
    items: &[Value],
    depth: usize,
    options: &ResolvedEncodeOptions,
    path: Option<&[String]>,
    out: &mut Vec<String>,
) {
    if items.is_empty() {
        let header = format_header(0, key, None, options.delimiter, options.length_marker);
        out.push(indented(depth, &header, options.indent));
        return;
    }

    if is_list_of_scalars(items) {
        out.push(indented(
            depth,
            &inline_array_line(items, key, options),
            options.indent,
        ));
        return;
    }

    if is_list_of_lists(items) {
        let all_scalar_rows = items.iter().all(|item| match item {
            Value::List(inner) => is_list_of_scalars(inner),
            _ => false,
        });
        if all_scalar_rows {
            encode_nested_inline_lists(key, items, depth, options, out);
            return;
        }
    }

    if is_list_of_objects(items) {
        if let Some(fields) = tabular_fields(items, path, options) {
            encode_tabular(key, items, &fields, depth, options, out);
            return;
        }
    }

    encode_list_items(key, items, depth, options, out);
}

fn inline_array_line(items: &[Value], key: Option<&str>, options: &ResolvedEncodeOptions) -> String {
    let header = format_header(
        items.len(),
        key,
        None,
        options.delimiter,
        options.length_marker,
    );
    if items.is_empty() {
        return header;
    }
    let joined = join_scalars(items, options.delimiter);
    format!("{header} {joined}")
}

// A list of all-scalar sub-lists renders each sub-list inline on its own
// list-item line.
fn encode_nested_inline_lists(
    key: Option<&str>,
    items: &[Value],
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    let header = format_header(
        items.len(),
        key,
        None,
        options.delimiter,
        options.length_marker,
    );
    out.push(indented(depth, &header, options.indent));

    for item in items {
        if let Value::List(inner) = item {
            let line = inline_array_line(inner, None, options);
            out.push(indented_item(depth + 1, &line, options.indent));
        }
    }
}

// Every row must be an object over the same keys with scalar values.
// Field order is the canonical first-row order unless an explicit key
// order covering the set exactly applies at this path.
fn tabular_fields(
    rows: &[Value],
    path: Option<&[String]>,
    options: &ResolvedEncodeOptions,
) -> Option<Vec<String>> {
    let Some(Value::Obj(first)) = rows.first() else {
        return None;
    };
    if first.is_empty() {
        return None;
    }

    let fields: Vec<String> = first.keys().cloned().collect();

    for row in rows {
        let Value::Obj(entries) = row else {
            return None;
        };
        if entries.len() != fields.len() {
            return None;
        }
        for field in &fields {
            match entries.get(field) {
                Some(value) if value.is_scalar() => {}
                _ => return None,
            }
        }
    }

    let explicit = match (&options.key_order, path) {
        (Some(KeyOrder::Root(order)), Some(prefix)) if prefix.is_empty() => Some(order),
        (Some(KeyOrder::ByPath(orders)), Some(prefix)) => orders.get(prefix),
        _ => None,
    };
    match explicit {
        Some(order) if covers_exactly(order, &fields) => Some(order.clone()),
        _ => Some(fields),
    }
}

fn encode_tabular(
    key: Option<&str>,
    rows: &[Value],
    fields: &[String],
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    let header = format_header(
        rows.len(),
        key,
        Some(fields),
        options.delimiter,
        options.length_marker,
    );
    out.push(indented(depth, &header, options.indent));
    write_tabular_rows(rows, fields, depth + 1, options, out);
}

fn write_tabular_rows(
    rows: &[Value],
    fields: &[String],
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    for row in rows {
        if let Value::Obj(entries) = row {
            let joined = join_scalars(
                fields.iter().map(|field| &entries[field.as_str()]),
                options.delimiter,
            );
            out.push(indented(depth, &joined, options.indent));
        }
    }
}

fn encode_list_items(
    key: Option<&str>,
    items: &[Value],
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    let header = format_header(
        items.len(),
        key,
        None,
        options.delimiter,
        options.length_marker,
    );
    out.push(indented(depth, &header, options.indent));

    for item in items {
        encode_list_item(item, depth + 1, options, out);
    }
}

fn encode_list_item(
    value: &Value,
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    match value {
        Value::List(items) => {
            if is_list_of_scalars(items) {
                let line = inline_array_line(items, None, options);
                out.push(indented_item(depth, &line, options.indent));
            } else {
                let header = format_header(
                    items.len(),
                    None,
                    None,
                    options.delimiter,
                    options.length_marker,
                );
                out.push(indented_item(depth, &header, options.indent));
                for item in items {
                    encode_list_item(item, depth + 1, options, out);
                }
            }
        }
        Value::Obj(entries) => {
            encode_object_as_list_item(entries, depth, options, out);
        }
        scalar => {
            let rendered = render_scalar(scalar, options.delimiter);
            out.push(indented_item(depth, &rendered, options.indent));
        }
    }
}

// An object in list position carries its first field on the `- ` line;
// the remaining fields follow one step deeper without a marker.
fn encode_object_as_list_item(
    entries: &Map,
    depth: usize,
    options: &ResolvedEncodeOptions,
    out: &mut Vec<String>,
) {
    if entries.is_empty() {
        out.push(indented(depth, LIST_ITEM_MARKER, options.indent));
        return;
    }

    let Some((first_key, first_value)) = entries.first() else {
        return;
    };
    let rest: Map = entries
        .iter()
        .skip(1)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if let Value::List(items) = first_value {
        if is_list_of_objects(items) {
            if let Some(fields) = tabular_fields(items, None, options) {
                let header = format_header(
                    items.len(),
                    Some(first_key),
                    Some(&fields),
                    options.delimiter,
                    options.length_marker,
                );
                out.push(indented_item(depth, &header, options.indent));
                write_tabular_rows(items, &fields, depth + 2, options, out);
                if !rest.is_empty() {
                    encode_object_entries(&rest, depth + 1, options, None, None, None, out);
                }
                return;
            }
        }
    }

    let encoded_key = render_key(first_key);

    match first_value {
        Value::List(items) => {
            if is_list_of_scalars(items) {
                let line = inline_array_line(items, None, options);
                out.push(indented_item(
                    depth,
                    &format!("{encoded_key}{line}"),
                    options.indent,
                ));
            } else {
                let header = format_header(
                    items.len(),
                    None,
                    None,
                    options.delimiter,
                    options.length_marker,
                );
                out.push(indented_item(
                    depth,
                    &format!("{encoded_key}{header}"),
                    options.indent,
                ));
                for item in items {
                    encode_list_item(item, depth + 2, options, out);
                }
            }
        }
        Value::Obj(nested) => {
            out.push(indented_item(
                depth,
                &format!("{encoded_key}:"),
                options.indent,
            ));
            if !nested.is_empty() {
                encode_object_entries(nested, depth + 2, options, None, None, None, out);
            }
        }
        scalar => {
            let rendered = render_scalar(scalar, options.delimiter);
            out.push(indented_item(
                depth,
                &format!("{encoded_key}: {rendered}"),
                options.indent,
            ));
        }
    }

    if !rest.is_empty() {
        encode_object_entries(&rest, depth + 1, options, None, None, None, out);
    }
}

fn ordered_keys(
    entries: &Map,
    path: Option<&[String]>,
    options: &ResolvedEncodeOptions,
) -> Vec<String> {
    let keys: Vec<String> = entries.keys().cloned().collect();
    match (&options.key_order, path) {
        (Some(KeyOrder::Root(order)), Some(prefix)) if prefix.is_empty() => {
            if covers_exactly(order, &keys) {
                order.clone()
            } else {
                keys
            }
        }
        (Some(KeyOrder::ByPath(orders)), Some(prefix)) => match orders.get(prefix) {
            Some(order) => apply_partial_order(order, keys),
            None => keys,
        },
        _ => keys,
    }
}

fn covers_exactly(order: &[String], keys: &[String]) -> bool {
    order.len() == keys.len() && keys.iter().all(|key| order.contains(key))
}

fn apply_partial_order(order: &[String], keys: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = order
        .iter()
        .filter(|key| keys.contains(key))
        .cloned()
        .collect();
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

fn indented(depth: usize, content: &str, indent_size: usize) -> String {
    let indentation = " ".repeat(indent_size * depth);
    format!("{indentation}{content}")
}

fn indented_item(depth: usize, content: &str, indent_size: usize) -> String {
    indented(depth, &format!("{LIST_ITEM_PREFIX}{content}"), indent_size)
}
