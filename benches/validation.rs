//! Benchmarking the complete evaluation of a configuration,
//! which runs on every user interaction
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use signalsim_config::prelude::*;

fn benchmark(c: &mut Criterion) {
    let mut registry = EphemerisRegistry::default();
    registry
        .add("test_resources/NAV/V3/MIXD0010.24P")
        .unwrap();
    let _ = registry.add("test_resources/NAV/INVALID/garbage.rnx");

    let settings = ValidationSettings::default();
    let mut doc = Template::Maritime.document();
    doc.time_mut()
        .set_start(Epoch::from_gregorian_utc_hms(2024, 1, 1, 12, 0, 0));

    let mut grp = c.benchmark_group("validation");

    grp.bench_function("evaluate", |b| {
        b.iter(|| {
            let _ = evaluate(black_box(&doc), black_box(&registry), &settings);
        })
    });

    grp.bench_function("serialization", |b| {
        b.iter(|| {
            let content = doc.to_json_string().unwrap();
            let _ = ConfigurationDocument::from_json_str(black_box(&content)).unwrap();
        })
    });

    grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
