// benches/normalize.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use follow_benford::{analysis, model::RawValue, normalize};

fn sample_cells() -> Vec<RawValue> {
    let base = [
        "1,234", "12.3K", "2.5M", "987", "", "PRIVADA", "NO_ENCONTRADO", "4.567.890",
        "0", "abc", "1.2k", "7", "TIMEOUT", "15", "152", "9", "23", "1",
    ];
    base.iter().cycle().take(10_000).map(|c| RawValue::from_cell(c)).collect()
}

fn bench_normalize(c: &mut Criterion) {
    let cells = sample_cells();

    c.bench_function("normalize_mixed_10k", |b| {
        b.iter(|| {
            let counts = normalize::normalize_all(black_box(&cells));
            black_box(counts.len())
        })
    });

    let counts = normalize::normalize_all(&cells);
    c.bench_function("analyze_10k", |b| {
        b.iter(|| black_box(analysis::analyze(black_box(&counts))))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
