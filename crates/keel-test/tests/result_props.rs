//! Result algebra properties

use std::cell::Cell;

use keel_core::{HostError, Report, ResultExt};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ok_map_applies_function(v in -1_000_000i64..1_000_000) {
        let f = |x: i64| x + 7;
        let result: Result<i64, String> = Ok(v);
        prop_assert_eq!(result.map(f).fatal_unwrap(), f(v));
    }

    #[test]
    fn err_map_leaves_payload(e in any::<i64>()) {
        let result: Result<i64, i64> = Err(e);
        let mapped = result.map(|x| x * 2);
        prop_assert!(mapped.matches_err(&e));
        prop_assert_eq!(mapped, Err(e));
    }

    #[test]
    fn ok_and_then_equals_function_result(v in any::<i32>()) {
        let g = |x: i32| if x % 2 == 0 { Ok(x / 2) } else { Err(x) };
        let result: Result<i32, i32> = Ok(v);
        prop_assert_eq!(result.and_then(g), g(v));
    }

    #[test]
    fn raw_codes_upgrade_by_range(code in 0i64..200) {
        let result: Result<(), i64> = Err(code);
        let report = result.into_report().unwrap_err();
        prop_assert_eq!(report.kind().code(), code);
        prop_assert_eq!(report.is_host_error(), code < 49);
    }
}

#[test]
fn err_and_then_never_calls_function() {
    let calls = Cell::new(0);
    let result: Result<i32, &str> = Err("stale");
    let chained = result.and_then(|v| {
        calls.set(calls.get() + 1);
        Ok(v)
    });
    assert_eq!(chained, Err("stale"));
    assert_eq!(calls.get(), 0);
}

#[test]
fn ok_and_err_projections() {
    let ok: Result<i32, Report> = Ok(4);
    assert_eq!(ok.clone().ok(), Some(4));
    assert!(ok.err().is_none());

    let err: Result<i32, Report> = Err(Report::new(HostError::Timeout));
    assert!(err.clone().ok().is_none());
    assert!(err.matches_err(&HostError::Timeout));
}
