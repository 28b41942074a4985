//! Benchmarks for district summary aggregation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use territory_summary::core::{build_summary, Table};
use territory_summary::report::summary_table;

const STATUSES: [&str; 5] = ["Closed", "Open", "off-plan", "In Progress", "Off Plan"];

fn source_table(rows: usize, districts: usize) -> Table {
    let mut table = vec![vec!["District".to_string(), "Status".to_string()]];
    for i in 0..rows {
        table.push(vec![
            format!("District {:03}", i % districts),
            STATUSES[i % STATUSES.len()].to_string(),
        ]);
    }
    table
}

fn totals_table(districts: usize) -> Table {
    let mut table = vec![vec!["name".to_string(), "total".to_string()]];
    for i in (0..districts).step_by(2) {
        table.push(vec![format!("District {:03}", i), "500".to_string()]);
    }
    table
}

fn bench_build_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_summary");

    for size in [100, 1_000, 10_000, 100_000] {
        let source = source_table(size, 50);
        let totals = totals_table(50);

        group.bench_with_input(BenchmarkId::new("rows_only", size), &source, |b, source| {
            b.iter(|| black_box(build_summary(source, None)))
        });

        group.bench_with_input(
            BenchmarkId::new("with_overrides", size),
            &source,
            |b, source| b.iter(|| black_box(build_summary(source, Some(&totals)))),
        );
    }

    group.finish();
}

fn bench_summary_table(c: &mut Criterion) {
    let rows = build_summary(&source_table(10_000, 500), None).unwrap();
    c.bench_function("summary_table_500_districts", |b| {
        b.iter(|| black_box(summary_table(&rows, true)))
    });
}

criterion_group!(benches, bench_build_summary, bench_summary_table);
criterion_main!(benches);
