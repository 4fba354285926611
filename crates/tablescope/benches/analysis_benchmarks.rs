//! Ingest and column analysis performance benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tablescope::Tablescope;

/// Generate a mixed-type CSV with some missing cells.
fn generate_data(rows: usize) -> String {
    let mut data = String::from("id,age,bmi,site,smoker\n");
    let sites = ["north", "south", "east", "west"];

    for row in 0..rows {
        let age = if row % 37 == 0 {
            String::new()
        } else {
            (20 + row % 60).to_string()
        };
        data.push_str(&format!(
            "{},{},{:.1},{},{}\n",
            row + 1,
            age,
            18.5 + (row % 20) as f64 * 0.5,
            sites[row % sites.len()],
            if row % 3 == 0 { "true" } else { "false" }
        ));
    }

    data
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for rows in [100, 1_000, 10_000] {
        let data = generate_data(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| {
                let scope = Tablescope::new();
                black_box(scope.ingest(data.as_bytes()).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_column_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_analysis");

    for rows in [1_000, 10_000, 100_000] {
        let scope = Tablescope::new();
        let id = scope
            .ingest(generate_data(rows).as_bytes())
            .unwrap()
            .dataset_id;

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("stats_numeric", rows), &id, |b, id| {
            b.iter(|| black_box(scope.column_stats(id, "age").unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("stats_text", rows), &id, |b, id| {
            b.iter(|| black_box(scope.column_stats(id, "site").unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("histogram", rows), &id, |b, id| {
            b.iter(|| black_box(scope.column_histogram(id, "bmi", Some(30)).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingest, bench_column_analysis);
criterion_main!(benches);
