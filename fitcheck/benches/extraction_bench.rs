use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitcheck::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

fn bench_extract(c: &mut Criterion) {
    let core = FitCheckCore::new(RuleStore::builtin()).expect("core should build");
    let listing = read_fixture("panel_homeline_listing.txt");

    c.bench_function("extract_listing", |b| {
        b.iter(|| core.extract(black_box(&listing)));
    });
}

fn bench_check_pair(c: &mut Criterion) {
    let core = FitCheckCore::new(RuleStore::builtin()).expect("core should build");
    let panel = core.extract(&read_fixture("panel_qo.txt"));
    let breaker = core.extract(&read_fixture("breaker_qo120.txt"));

    c.bench_function("check_panel_breaker", |b| {
        b.iter(|| core.check_pair(black_box(&panel), black_box(&breaker)));
    });
}

fn bench_core_setup(c: &mut Criterion) {
    c.bench_function("core_from_builtin", |b| {
        b.iter(|| FitCheckCore::new(RuleStore::builtin()));
    });
}

criterion_group!(benches, bench_extract, bench_check_pair, bench_core_setup);
criterion_main!(benches);
