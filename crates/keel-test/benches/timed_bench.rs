//! TimedVar benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keel_enum::EnumStruct;
use keel_test::ComboBuffer;
use keel_time::{ManualClock, MonotonicClock, TimedVar};
use serde_json::json;

fn bench_get_value(c: &mut Criterion) {
    let mut var = TimedVar::with_clock(7_u32, MonotonicClock::new()).lifespan(60_000);
    c.bench_function("timed_get_value", |b| b.iter(|| black_box(var.get_value().copied())));
}

fn bench_set_take(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut var = TimedVar::with_clock(0_u32, clock.clone()).lifespan(100);
    c.bench_function("timed_set_take", |b| {
        b.iter(|| {
            clock.advance(1);
            var.set_value(black_box(1));
            var.take()
        })
    });
}

fn bench_combo_buffer(c: &mut Criterion) {
    let combos = EnumStruct::builder("Combo")
        .variant("Hadouken", json!({"sequence": ["down", "forward", "punch"]}))
        .variant("Jab", json!({"sequence": ["punch"]}))
        .build()
        .unwrap();
    let clock = ManualClock::new();
    let mut buffer = ComboBuffer::new(combos, 300, clock.clone());

    c.bench_function("combo_resolve", |b| {
        b.iter(|| {
            buffer.press("down");
            buffer.press("forward");
            buffer.press("punch");
            clock.advance(10);
            buffer.resolve()
        })
    });
}

criterion_group!(benches, bench_get_value, bench_set_take, bench_combo_buffer);
criterion_main!(benches);
