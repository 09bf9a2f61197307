use proptest::prelude::*;
use serde_json::json;
use toon_codec::encode::normalize::normalize_value;
use toon_codec::{
    DecodeOptions, Delimiter, EncodeOptions, ExpandPaths, KeyFolding, Value, try_decode,
    try_encode,
};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12f64..1.0e12).prop_map(Value::from),
        any::<String>().prop_map(Value::Str),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((any::<String>(), inner), 0..4)
                .prop_map(|entries| Value::Obj(entries.into_iter().collect())),
        ]
    })
}

/// Values whose object keys are dot-free identifiers, for the folding /
/// expansion inverse property.
fn arb_foldable_value() -> impl Strategy<Value = Value> {
    let key = "[a-z][a-z0-9_]{0,6}";
    arb_scalar().prop_recursive(3, 32, 4, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((key, inner), 0..4)
                .prop_map(|entries| Value::Obj(entries.into_iter().collect())),
        ]
    })
}

fn encode_options(delimiter: Delimiter) -> EncodeOptions {
    EncodeOptions {
        delimiter: Some(delimiter),
        ..EncodeOptions::default()
    }
}

proptest! {
    #[test]
    fn roundtrip_with_default_options(value in arb_value()) {
        let normalized = normalize_value(value);
        let encoded = try_encode(normalized.clone(), None).unwrap();
        let decoded = try_decode(&encoded, None).unwrap();
        prop_assert_eq!(decoded, normalized);
    }

    #[test]
    fn roundtrip_with_tab_delimiter(value in arb_value()) {
        let normalized = normalize_value(value);
        let encoded = try_encode(normalized.clone(), Some(encode_options(Delimiter::Tab))).unwrap();
        let decoded = try_decode(&encoded, None).unwrap();
        prop_assert_eq!(decoded, normalized);
    }

    #[test]
    fn roundtrip_with_pipe_delimiter(value in arb_value()) {
        let normalized = normalize_value(value);
        let encoded = try_encode(normalized.clone(), Some(encode_options(Delimiter::Pipe))).unwrap();
        let decoded = try_decode(&encoded, None).unwrap();
        prop_assert_eq!(decoded, normalized);
    }

    #[test]
    fn normalization_is_idempotent(value in arb_value()) {
        let once = normalize_value(value);
        prop_assert_eq!(normalize_value(once.clone()), once);
    }

    #[test]
    fn encoding_is_deterministic(value in arb_value()) {
        let normalized = normalize_value(value);
        let first = try_encode(normalized.clone(), None).unwrap();
        let second = try_encode(normalized, None).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn quoted_strings_survive_byte_identically(text in any::<String>()) {
        let value = normalize_value(Value::Str(text));
        let encoded = try_encode(value.clone(), None).unwrap();
        let decoded = try_decode(&encoded, None).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn folding_and_expansion_are_inverse(value in arb_foldable_value()) {
        let normalized = normalize_value(value);
        let encoded = try_encode(
            normalized.clone(),
            Some(EncodeOptions {
                key_folding: Some(KeyFolding::Safe),
                ..EncodeOptions::default()
            }),
        )
        .unwrap();
        let decoded = try_decode(
            &encoded,
            Some(DecodeOptions {
                expand_paths: Some(ExpandPaths::Safe),
                ..DecodeOptions::default()
            }),
        )
        .unwrap();
        prop_assert_eq!(decoded, normalized);
    }
}

#[test]
fn scenario_roundtrips() {
    for input in [
        json!({"name": "Alice", "age": 30}),
        json!({"tags": ["elixir", "toon"]}),
        json!({"users": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}),
        json!({"items": [[], [42], []]}),
        json!({"deep": {"a": {"b": {"c": [1, {"d": null}]}}}}),
        json!([{"mixed": [1, "two", false]}, {}, "tail"]),
    ] {
        let value = normalize_value(Value::from(input));
        let encoded = try_encode(value.clone(), None).unwrap();
        let decoded = try_decode(&encoded, None).unwrap();
        assert_eq!(decoded, value, "failed for {encoded:?}");
    }
}

#[test]
fn length_headers_match_element_counts() {
    let toon = try_encode(json!({"a": [1, 2, 3], "b": [], "c": [{"x": 1}]}), None).unwrap();
    assert_eq!(toon, "a[3]: 1,2,3\nb[0]:\nc[1]{x}:\n  1");
}
