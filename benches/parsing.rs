//! Benchmarking navigation file parsing
//! using the most common revisions
extern crate criterion;
use criterion::{criterion_group, criterion_main, Criterion};

use signalsim_config::prelude::{EphemerisFile, EphemerisRegistry};

fn nav_parsing(path: &str) {
    let _ = EphemerisFile::parse(path).unwrap();
}

fn benchmark(c: &mut Criterion) {
    let mut parsing_grp = c.benchmark_group("parsing");

    // Legacy GPS navigation (V2)
    parsing_grp.bench_function("NAV/V2", |b| {
        b.iter(|| {
            nav_parsing("test_resources/NAV/V2/brdc0010.24n");
        })
    });

    // Mixed navigation (V3)
    parsing_grp.bench_function("NAV/V3", |b| {
        b.iter(|| {
            nav_parsing("test_resources/NAV/V3/MIXD0010.24P");
        })
    });

    // Framed navigation (V4)
    parsing_grp.bench_function("NAV/V4", |b| {
        b.iter(|| {
            nav_parsing("test_resources/NAV/V4/BRD400DLR_S_20240010000_01D_MN.rnx");
        })
    });

    parsing_grp.bench_function("registry", |b| {
        b.iter(|| {
            let mut registry = EphemerisRegistry::default();
            for path in [
                "test_resources/NAV/V2/brdc0010.24n",
                "test_resources/NAV/V2/brdc0010.24g",
                "test_resources/NAV/V3/MIXD0010.24P",
            ] {
                let _ = registry.add(path);
            }
            registry.consolidated_window()
        })
    });

    parsing_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
