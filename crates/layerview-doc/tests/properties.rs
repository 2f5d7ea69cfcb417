//! Property tests for the composite views over generated JSON documents.

use layerview::{
    ErrorKind, MultiSource, Segment, Source, SourceRef, path, with_offset, with_prefix,
};
use layerview_doc::JsonDocument;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

// =============================================================================
// Generators and helpers
// =============================================================================

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Every path that resolves in `value`, plus a missing probe under each.
fn probe_paths(value: &Value) -> Vec<Vec<Segment>> {
    fn walk(value: &Value, prefix: &mut Vec<Segment>, out: &mut Vec<Vec<Segment>>) {
        out.push(prefix.clone());
        let mut missing = prefix.clone();
        missing.push("zz-missing".into());
        out.push(missing);
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    prefix.push(Segment::Index(i));
                    walk(item, prefix, out);
                    prefix.pop();
                }
                let mut past_end = prefix.clone();
                past_end.push(Segment::Index(items.len()));
                out.push(past_end);
            }
            Value::Object(map) => {
                for (key, item) in map {
                    prefix.push(Segment::Key(key.clone()));
                    walk(item, prefix, out);
                    prefix.pop();
                }
            }
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut out);
    out
}

fn assert_same(
    actual: &dyn Source,
    expected: &dyn Source,
    path: &[Segment],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(actual.exists(path), expected.exists(path), "exists {:?}", path);
    prop_assert_eq!(actual.kind(path), expected.kind(path), "kind {:?}", path);
    prop_assert_eq!(actual.get_bool(path), expected.get_bool(path));
    prop_assert_eq!(actual.get_int(path), expected.get_int(path));
    prop_assert_eq!(actual.get_float(path), expected.get_float(path));
    prop_assert_eq!(actual.get_string(path), expected.get_string(path));
    prop_assert_eq!(actual.keys(path), expected.keys(path));
    prop_assert_eq!(actual.len(path), expected.len(path));
    prop_assert_eq!(
        actual.recurse(path).is_some(),
        expected.recurse(path).is_some()
    );
    Ok(())
}

fn doc(value: Value) -> SourceRef {
    Arc::new(JsonDocument::new(value))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_zero_offset_is_transparent(value in arb_value(), depth in 0usize..4) {
        let source = doc(value.clone());
        let shifted = with_offset(source.clone(), vec![0; depth]);
        for path in probe_paths(&value) {
            assert_same(&*shifted, &*source, &path)?;
        }
    }

    #[test]
    fn prop_prefix_round_trip(value in arb_value()) {
        let source = doc(value.clone());
        let prefixed = with_prefix(source.clone(), path!["a", "b"]);
        let back = prefixed.recurse(&path!["a", "b"]).unwrap();
        for path in probe_paths(&value) {
            assert_same(&*back, &*source, &path)?;

            let mut full = path!["a", "b"];
            full.extend(path.iter().cloned());
            prop_assert_eq!(prefixed.exists(&full), source.exists(&path));
            prop_assert_eq!(prefixed.kind(&full), source.kind(&path));
            prop_assert_eq!(prefixed.get_string(&full), source.get_string(&path));
            prop_assert_eq!(prefixed.keys(&full), source.keys(&path));
        }
    }

    #[test]
    fn prop_missing_paths_are_absent(value in arb_value()) {
        let source = doc(value.clone());
        let views: Vec<SourceRef> = vec![
            source.clone(),
            with_offset(source.clone(), vec![0, 0]),
            with_prefix(source.clone(), path!["p"]).recurse(&path!["p"]).unwrap(),
            Arc::new(MultiSource::new([source.clone()])),
        ];
        for path in probe_paths(&value) {
            for view in &views {
                if view.exists(&path) {
                    continue;
                }
                prop_assert!(view.recurse(&path).is_none());
                prop_assert_eq!(view.get_bool(&path).unwrap_err().kind(), ErrorKind::Absence);
                prop_assert_eq!(view.get_int(&path).unwrap_err().kind(), ErrorKind::Absence);
                prop_assert_eq!(view.get_float(&path).unwrap_err().kind(), ErrorKind::Absence);
                prop_assert_eq!(view.get_string(&path).unwrap_err().kind(), ErrorKind::Absence);
            }
        }
    }

    #[test]
    fn prop_sequences_concatenate(
        xs in prop::collection::vec("[a-z]{1,4}", 0..5),
        ys in prop::collection::vec("[a-z]{1,4}", 0..5),
    ) {
        let merged = MultiSource::new([
            doc(json!({ "items": xs.clone() })),
            doc(json!({ "items": ys.clone() })),
        ]);
        let expected: Vec<String> = xs.iter().chain(&ys).cloned().collect();

        prop_assert_eq!(merged.len(&path!["items"]), Ok(expected.len()));
        let items = merged.recurse(&path!["items"]).unwrap();
        prop_assert_eq!(items.len(&[]), Ok(expected.len()));
        for (i, item) in expected.iter().enumerate() {
            let merged_item = merged.get_string(&path!["items", i]);
            prop_assert_eq!(merged_item.as_ref(), Ok(item));
            let items_item = items.get_string(&path![i]);
            prop_assert_eq!(items_item.as_ref(), Ok(item));
        }
        prop_assert!(!merged.exists(&path!["items", expected.len()]));
    }

    #[test]
    fn prop_keys_union_without_duplicates(
        left in prop::collection::vec("[a-e]", 0..5),
        right in prop::collection::vec("[a-e]", 0..5),
    ) {
        let to_map = |keys: &[String]| -> Value {
            Value::Object(keys.iter().map(|k| (k.clone(), json!(1))).collect())
        };
        let a = doc(to_map(&left));
        let b = doc(to_map(&right));
        let left_keys = a.keys(&[]).unwrap();
        let right_keys = b.keys(&[]).unwrap();

        let mut union = left_keys.clone();
        for key in right_keys {
            if !union.contains(&key) {
                union.push(key);
            }
        }

        let merged = MultiSource::new([a, b]);
        prop_assert_eq!(merged.keys(&[]), Ok(union));
        prop_assert_eq!(merged.with_combine(false).keys(&[]), Ok(left_keys));
    }

    #[test]
    fn prop_precedence(x in any::<i64>(), y in any::<i64>()) {
        let merged = MultiSource::new([doc(json!({ "v": x })), doc(json!({ "v": y }))]);
        prop_assert_eq!(merged.get_int(&path!["v"]), Ok(x));
        prop_assert_eq!(merged.with_first(false).get_int(&path!["v"]), Ok(y));
    }
}
