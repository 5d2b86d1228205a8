//! Combinator and report benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keel_core::{from_dict, HostError, OptionExt, Report, ResultExt};
use serde_json::json;

fn bench_option_chain(c: &mut Criterion) {
    c.bench_function("option_chain", |b| {
        b.iter(|| {
            black_box(Some(black_box(21_i64)))
                .map(|v| v * 2)
                .filter(|v| *v > 10)
                .and_then(|v| v.checked_add(1))
                .unwrap_or(0)
        })
    });
}

fn bench_dict_form(c: &mut Criterion) {
    let encoded = Some(json!({"hp": 10, "mp": 3})).to_dict().unwrap();
    c.bench_function("dict_form_decode", |b| {
        b.iter(|| from_dict::<serde_json::Value>(black_box(&encoded)))
    });
}

fn bench_report_upgrade(c: &mut Criterion) {
    c.bench_function("report_upgrade", |b| {
        b.iter(|| {
            let result: Result<(), i64> = Err(black_box(12));
            result.into_report().matches_err(&HostError::FileCantOpen)
        })
    });

    let report = Report::builder(HostError::ScriptFailed)
        .msg("combo table")
        .info("line", 12)
        .cause(Report::new(HostError::ParseError))
        .build();
    c.bench_function("report_display", |b| b.iter(|| black_box(&report).to_string()));
}

criterion_group!(benches, bench_option_chain, bench_dict_form, bench_report_upgrade);
criterion_main!(benches);
