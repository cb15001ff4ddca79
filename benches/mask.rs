// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for mask policies

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use mask_rust::mask::{factory, ConfigCodec, GroupPolicy, MaskHandler, MaskPolicy};

fn email_policy() -> MaskPolicy {
    let right = GroupPolicy::new(".").add_handlers([factory::mask_all().with_mask("^_^", 1)]);
    factory::group("@")
        .add_handlers([MaskPolicy::from(factory::reserve_left(1)), right.into()])
        .into()
}

fn name_policy() -> MaskPolicy {
    factory::size_selector()
        .add_handler(factory::reserve_left(1), [2, 3])
        .add_handler(factory::reserve_left(2), [4])
        .into()
}

fn bench_phone(c: &mut Criterion) {
    let policy = factory::reserve_outer(3, 4);

    c.bench_function("mask_phone", |b| {
        b.iter(|| policy.handle(black_box("13755556666")))
    });
}

fn bench_email(c: &mut Criterion) {
    let policy = email_policy();

    c.bench_function("mask_email_nested", |b| {
        b.iter(|| policy.handle(black_box("abcdefddddddd@sina.com")))
    });
}

fn bench_name(c: &mut Criterion) {
    let policy = name_policy();

    c.bench_function("mask_name_size_select", |b| {
        b.iter(|| policy.handle(black_box("司马相如弟弟")))
    });
}

fn bench_char_classes(c: &mut Criterion) {
    let number = factory::mask_number();
    let letter = factory::mask_letter().with_mask_length(3);
    let text = "Order 4411 shipped to John at 221B Baker Street, call 555-0199";

    c.bench_function("mask_number", |b| b.iter(|| number.handle(black_box(text))));
    c.bench_function("mask_letter_runs", |b| {
        b.iter(|| letter.handle(black_box(text)))
    });
}

fn bench_large_token_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_tokens");

    let policy = factory::group(",")
        .add_handlers([factory::reserve_left(1)])
        .with_default_handler(factory::mask_margin(1));

    for size in [10, 100, 1000].iter() {
        let text = (0..*size)
            .map(|i| format!("token{}", i))
            .collect::<Vec<_>>()
            .join(",");

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| policy.handle(black_box(text)))
        });
    }

    group.finish();
}

fn bench_config_codec(c: &mut Criterion) {
    let codec = ConfigCodec::new();
    let policy = email_policy();
    let json = codec.encode(&policy).unwrap();

    c.bench_function("config_encode", |b| {
        b.iter(|| codec.encode(black_box(&policy)))
    });
    c.bench_function("config_decode", |b| b.iter(|| codec.decode(black_box(&json))));
}

criterion_group!(
    benches,
    bench_phone,
    bench_email,
    bench_name,
    bench_char_classes,
    bench_large_token_lists,
    bench_config_codec,
);
criterion_main!(benches);
