//! Option algebra and dictionary form properties

use std::cell::Cell;

use keel_core::{from_dict, HostError, OptionExt};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn some_unwraps_to_its_value(v in any::<i64>()) {
        prop_assert_eq!(Some(v).fatal_unwrap(), v);
        prop_assert!(Some(v).is_some());
    }

    #[test]
    fn map_applies_function(v in -1_000_000i64..1_000_000) {
        let f = |x: i64| x * 3 - 1;
        prop_assert_eq!(Some(v).map(f).fatal_unwrap(), f(v));
    }

    #[test]
    fn dict_form_roundtrips_integers(v in any::<i64>()) {
        let encoded = Some(v).to_dict().unwrap();
        let decoded: Option<i64> = from_dict(&encoded).unwrap();
        prop_assert_eq!(decoded.fatal_unwrap(), v);
    }

    #[test]
    fn dict_form_roundtrips_strings(s in ".{0,32}") {
        let encoded = Some(s.clone()).to_dict().unwrap();
        let decoded: Option<String> = from_dict(&encoded).unwrap();
        prop_assert_eq!(decoded, Some(s));
    }

    #[test]
    fn extraneous_keys_are_rejected(key in "[a-z]{1,8}") {
        prop_assume!(key != "Some" && key != "None");
        let mut bad = json!({"Some": 1});
        bad[key.as_str()] = json!(true);
        prop_assert!(from_dict::<i64>(&bad).is_err());
    }
}

#[test]
fn none_is_never_some() {
    assert!(!None::<i64>.is_some());
    assert!(None::<i64>.is_none());
}

#[test]
fn map_on_none_never_calls_function() {
    let calls = Cell::new(0);
    let mapped = None::<i64>.map(|v| {
        calls.set(calls.get() + 1);
        v
    });
    assert!(mapped.is_none());
    assert_eq!(calls.get(), 0);
}

#[test]
fn both_tags_is_an_error() {
    let err = from_dict::<i64>(&json!({"Some": 1, "None": true})).unwrap_err();
    assert_eq!(err.kind(), HostError::InvalidData);
}
