use std::collections::HashMap;

use serde_json::json;
use toon_codec::{
    Delimiter, EncodeError, EncodeOptions, KeyFolding, KeyOrder, Map, Value, encode, try_encode,
};

fn encode_with(input: serde_json::Value, options: EncodeOptions) -> String {
    encode(input, Some(options))
}

#[test]
fn object_keys_are_sorted() {
    let toon = encode(json!({"name": "Alice", "age": 30}), None);
    assert_eq!(toon, "age: 30\nname: Alice");
}

#[test]
fn primitive_array_is_inline() {
    let toon = encode(json!({"tags": ["elixir", "toon"]}), None);
    assert_eq!(toon, "tags[2]: elixir,toon");
}

#[test]
fn uniform_objects_are_tabular() {
    let toon = encode(
        json!({"users": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}),
        None,
    );
    assert_eq!(toon, "users[2]{id,name}:\n  1,A\n  2,B");
}

#[test]
fn arrays_of_primitive_arrays_use_inline_list_items() {
    let toon = encode(json!({"items": [[], [42], []]}), None);
    assert_eq!(toon, "items[3]:\n  - [0]:\n  - [1]: 42\n  - [0]:");
}

#[test]
fn mixed_array_uses_list_items() {
    let toon = encode(json!({"items": [1, {"a": 1, "b": 2}, [2, 3]]}), None);
    assert_eq!(
        toon,
        "items[3]:\n  - 1\n  - a: 1\n    b: 2\n  - [2]: 2,3"
    );
}

#[test]
fn empty_containers() {
    assert_eq!(encode(json!({}), None), "");
    assert_eq!(encode(json!({"items": []}), None), "items[0]:");
    assert_eq!(encode(json!({"nested": {}}), None), "nested:");
}

#[test]
fn empty_object_in_list_is_bare_marker() {
    let toon = encode(json!({"items": [{}]}), None);
    assert_eq!(toon, "items[1]:\n  -");
}

#[test]
fn root_primitives() {
    assert_eq!(encode(json!(null), None), "null");
    assert_eq!(encode(json!(true), None), "true");
    assert_eq!(encode(json!(42), None), "42");
    assert_eq!(encode(json!(3.5), None), "3.5");
    assert_eq!(encode(json!("hello"), None), "hello");
    assert_eq!(encode(json!(""), None), "\"\"");
}

#[test]
fn root_array_and_root_tabular() {
    assert_eq!(encode(json!([1, 2, 3]), None), "[3]: 1,2,3");
    assert_eq!(
        encode(json!([{"a": 1}, {"a": 2}]), None),
        "[2]{a}:\n  1\n  2"
    );
}

#[test]
fn number_normalization() {
    assert_eq!(encode(json!({"x": 3.0}), None), "x: 3");
    assert_eq!(encode(json!({"x": -0.0}), None), "x: 0");
    assert_eq!(encode(json!({"x": 3e2}), None), "x: 300");

    let mut map = Map::new();
    map.insert("x".to_string(), Value::Float(f64::NAN));
    assert_eq!(encode(Value::Obj(map), None), "x: null");
}

#[test]
fn strings_that_collide_with_literals_are_quoted() {
    assert_eq!(encode(json!({"s": "true"}), None), "s: \"true\"");
    assert_eq!(encode(json!({"s": "null"}), None), "s: \"null\"");
    assert_eq!(encode(json!({"s": "007"}), None), "s: \"007\"");
    assert_eq!(encode(json!({"s": "-5"}), None), "s: \"-5\"");
    assert_eq!(encode(json!({"s": "3e2"}), None), "s: \"3e2\"");
}

#[test]
fn strings_with_structure_are_quoted_and_escaped() {
    assert_eq!(encode(json!({"s": "a,b"}), None), "s: \"a,b\"");
    assert_eq!(encode(json!({"s": "a|b"}), None), "s: \"a|b\"");
    assert_eq!(encode(json!({"s": "say \"hi\""}), None), "s: \"say \\\"hi\\\"\"");
    assert_eq!(encode(json!({"s": "line1\nline2"}), None), "s: \"line1\\nline2\"");
    assert_eq!(encode(json!({"s": " padded "}), None), "s: \" padded \"");
    assert_eq!(encode(json!({"s": "- item"}), None), "s: \"- item\"");
    assert_eq!(encode(json!({"s": "back\\slash"}), None), "s: back\\slash");
}

#[test]
fn keys_are_quoted_when_needed() {
    assert_eq!(encode(json!({"my key": 1}), None), "\"my key\": 1");
    assert_eq!(encode(json!({"0": 1}), None), "\"0\": 1");
    assert_eq!(encode(json!({"dotted.path": 1}), None), "dotted.path: 1");
}

#[test]
fn nested_objects_indent_by_steps() {
    let toon = encode(json!({"a": {"b": {"c": 1}, "d": 2}}), None);
    assert_eq!(toon, "a:\n  b:\n    c: 1\n  d: 2");
}

#[test]
fn indent_option_changes_step() {
    let toon = encode_with(
        json!({"a": {"b": 1}}),
        EncodeOptions {
            indent: Some(4),
            ..EncodeOptions::default()
        },
    );
    assert_eq!(toon, "a:\n    b: 1");
}

#[test]
fn tab_and_pipe_delimiters_mark_headers() {
    let toon = encode_with(
        json!({"tags": ["a", "b", "c"]}),
        EncodeOptions {
            delimiter: Some(Delimiter::Pipe),
            ..EncodeOptions::default()
        },
    );
    assert_eq!(toon, "tags[3|]: a|b|c");

    let toon = encode_with(
        json!({"tags": ["a", "b"]}),
        EncodeOptions {
            delimiter: Some(Delimiter::Tab),
            ..EncodeOptions::default()
        },
    );
    assert_eq!(toon, "tags[2\t]: a\tb");
}

#[test]
fn delimiter_applies_to_tabular_fields_and_rows() {
    let toon = encode_with(
        json!({"users": [{"id": 1, "name": "A"}]}),
        EncodeOptions {
            delimiter: Some(Delimiter::Pipe),
            ..EncodeOptions::default()
        },
    );
    assert_eq!(toon, "users[1|]{id|name}:\n  1|A");
}

#[test]
fn length_marker_prefixes_counts() {
    let options = EncodeOptions {
        length_marker: Some('#'),
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(json!({"tags": ["a", "b"]}), options.clone()),
        "tags[#2]: a,b"
    );
    assert_eq!(
        encode_with(json!({"items": []}), options.clone()),
        "items[#0]:"
    );
    assert_eq!(
        encode_with(json!({"users": [{"id": 1}]}), options),
        "users[#1]{id}:\n  1"
    );
}

#[test]
fn key_folding_collapses_single_key_chains() {
    let options = EncodeOptions {
        key_folding: Some(KeyFolding::Safe),
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(json!({"a": {"b": {"c": 1}}}), options.clone()),
        "a.b.c: 1"
    );
    assert_eq!(
        encode_with(json!({"a": {"b": [1, 2]}}), options.clone()),
        "a.b[2]: 1,2"
    );
    assert_eq!(
        encode_with(json!({"a": {"b": {}}}), options),
        "a.b:"
    );
}

#[test]
fn key_folding_stops_at_multi_key_objects() {
    let options = EncodeOptions {
        key_folding: Some(KeyFolding::Safe),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"a": {"b": {"x": 1, "y": 2}}}), options);
    assert_eq!(toon, "a.b:\n  x: 1\n  y: 2");
}

#[test]
fn key_folding_respects_flatten_depth() {
    let options = EncodeOptions {
        key_folding: Some(KeyFolding::Safe),
        flatten_depth: Some(2),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"a": {"b": {"c": 1}}}), options);
    assert_eq!(toon, "a.b:\n  c: 1");
}

#[test]
fn key_folding_skips_non_identifier_segments() {
    let options = EncodeOptions {
        key_folding: Some(KeyFolding::Safe),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"a": {"odd key": 1}}), options);
    assert_eq!(toon, "a:\n  \"odd key\": 1");
}

#[test]
fn key_folding_suppressed_by_literal_dotted_key() {
    let options = EncodeOptions {
        key_folding: Some(KeyFolding::Safe),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"a": {"b": 1}, "a.b": 2}), options);
    assert_eq!(toon, "a:\n  b: 1\na.b: 2");
}

#[test]
fn root_key_order_applies_when_exact() {
    let options = EncodeOptions {
        key_order: Some(KeyOrder::Root(vec!["b".to_string(), "a".to_string()])),
        ..EncodeOptions::default()
    };
    assert_eq!(encode_with(json!({"a": 1, "b": 2}), options), "b: 2\na: 1");

    // Incomplete cover falls back to the canonical order.
    let options = EncodeOptions {
        key_order: Some(KeyOrder::Root(vec!["b".to_string()])),
        ..EncodeOptions::default()
    };
    assert_eq!(encode_with(json!({"a": 1, "b": 2}), options), "a: 1\nb: 2");
}

#[test]
fn per_path_key_order_reorders_listed_keys_first() {
    let mut orders = HashMap::new();
    orders.insert(
        vec!["outer".to_string()],
        vec!["c".to_string(), "b".to_string()],
    );
    let options = EncodeOptions {
        key_order: Some(KeyOrder::ByPath(orders)),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"outer": {"a": 1, "b": 2, "c": 3}}), options);
    assert_eq!(toon, "outer:\n  c: 3\n  b: 2\n  a: 1");
}

#[test]
fn per_path_key_order_drives_tabular_fields() {
    let mut orders = HashMap::new();
    orders.insert(
        vec!["users".to_string()],
        vec!["name".to_string(), "id".to_string()],
    );
    let options = EncodeOptions {
        key_order: Some(KeyOrder::ByPath(orders)),
        ..EncodeOptions::default()
    };
    let toon = encode_with(
        json!({"users": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}),
        options,
    );
    assert_eq!(toon, "users[2]{name,id}:\n  A,1\n  B,2");
}

#[test]
fn tabular_field_order_ignores_partial_cover() {
    let mut orders = HashMap::new();
    orders.insert(vec!["users".to_string()], vec!["name".to_string()]);
    let options = EncodeOptions {
        key_order: Some(KeyOrder::ByPath(orders)),
        ..EncodeOptions::default()
    };
    let toon = encode_with(json!({"users": [{"id": 1, "name": "A"}]}), options);
    assert_eq!(toon, "users[1]{id,name}:\n  1,A");
}

#[test]
fn list_item_object_with_tabular_first_field() {
    let toon = encode(
        json!({"groups": [{"members": [{"id": 1}, {"id": 2}], "name": "x"}]}),
        None,
    );
    assert_eq!(
        toon,
        "groups[1]:\n  - members[2]{id}:\n      1\n      2\n    name: x"
    );
}

#[test]
fn non_uniform_objects_fall_back_to_list_items() {
    let toon = encode(json!({"rows": [{"a": 1}, {"b": 2}]}), None);
    assert_eq!(toon, "rows[2]:\n  - a: 1\n  - b: 2");
}

#[test]
fn objects_with_container_values_are_not_tabular() {
    let toon = encode(json!({"rows": [{"a": [1]}, {"a": [2]}]}), None);
    assert_eq!(toon, "rows[2]:\n  - a[1]: 1\n  - a[1]: 2");
}

#[test]
fn zero_indent_is_rejected() {
    let result = try_encode(
        json!({"a": 1}),
        Some(EncodeOptions {
            indent: Some(0),
            ..EncodeOptions::default()
        }),
    );
    assert!(matches!(result, Err(EncodeError::InvalidOptions { .. })));
}

#[test]
fn duplicate_key_order_is_rejected() {
    let result = try_encode(
        json!({"a": 1}),
        Some(EncodeOptions {
            key_order: Some(KeyOrder::Root(vec!["a".to_string(), "a".to_string()])),
            ..EncodeOptions::default()
        }),
    );
    assert!(matches!(result, Err(EncodeError::InvalidOptions { .. })));
}

#[test]
fn ambiguous_length_marker_is_rejected() {
    let result = try_encode(
        json!({"a": [1]}),
        Some(EncodeOptions {
            length_marker: Some('7'),
            ..EncodeOptions::default()
        }),
    );
    assert!(matches!(result, Err(EncodeError::InvalidOptions { .. })));
}
