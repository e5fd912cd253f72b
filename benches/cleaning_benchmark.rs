//! Benchmark of the cleaning pipeline and the correlation matrix
//!
//! Run with: cargo bench --bench cleaning_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use titanic_prep::charts::data::correlation_matrix;
use titanic_prep::pipeline::prepare_passengers;

const PORTS: [&str; 3] = ["C", "Q", "S"];

/// Generate a synthetic passenger manifest with roughly 20% missing ages,
/// 2% missing ports and 1% missing fares
fn generate_passengers(n_rows: usize, first_id: i64, with_outcome: bool, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let ids: Vec<i64> = (0..n_rows as i64).map(|i| first_id + i).collect();
    let pclass: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(1..=3)).collect();
    let sex: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<bool>() { "male" } else { "female" })
        .collect();
    let age: Vec<Option<f64>> = (0..n_rows)
        .map(|_| (rng.gen::<f64>() > 0.2).then(|| (rng.gen::<f64>() * 80.0).round()))
        .collect();
    let sibsp: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(0..4)).collect();
    let parch: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(0..3)).collect();
    let fare: Vec<Option<f64>> = (0..n_rows)
        .map(|_| (rng.gen::<f64>() > 0.01).then(|| rng.gen::<f64>() * 250.0))
        .collect();
    let embarked: Vec<Option<&str>> = (0..n_rows)
        .map(|_| (rng.gen::<f64>() > 0.02).then(|| PORTS[rng.gen_range(0..PORTS.len())]))
        .collect();
    let names: Vec<String> = ids.iter().map(|id| format!("Passenger {}", id)).collect();
    let tickets: Vec<String> = ids.iter().map(|id| format!("T{}", id)).collect();
    let cabins: Vec<Option<&str>> = vec![None; n_rows];

    let mut columns = vec![
        Column::new("PassengerId".into(), ids),
        Column::new("Pclass".into(), pclass),
        Column::new("Name".into(), names),
        Column::new("Sex".into(), sex),
        Column::new("Age".into(), age),
        Column::new("SibSp".into(), sibsp),
        Column::new("Parch".into(), parch),
        Column::new("Ticket".into(), tickets),
        Column::new("Fare".into(), fare),
        Column::new("Cabin".into(), cabins),
        Column::new("Embarked".into(), embarked),
    ];
    if with_outcome {
        let survived: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(0..=1)).collect();
        columns.insert(1, Column::new("Survived".into(), survived));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Full merge, impute, encode and split for growing manifests
fn benchmark_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_passengers");
    group.sample_size(20);

    for n_rows in [1_000, 10_000, 100_000] {
        let train = generate_passengers(n_rows, 1, true, 42);
        let test = generate_passengers(n_rows / 2, n_rows as i64 + 1, false, 43);

        group.throughput(Throughput::Elements((n_rows + n_rows / 2) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_rows),
            &(&train, &test),
            |b, (train, test)| {
                b.iter(|| {
                    let _ = prepare_passengers(black_box(*train), black_box(*test));
                });
            },
        );
    }

    group.finish();
}

/// Correlation matrix of the cleaned training table
fn benchmark_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");
    group.sample_size(30);

    for n_rows in [1_000, 10_000, 100_000] {
        let train = generate_passengers(n_rows, 1, true, 42);
        let test = generate_passengers(10, n_rows as i64 + 1, false, 43);
        let cleaned = prepare_passengers(&train, &test)
            .expect("Synthetic manifest should clean")
            .tables
            .train;

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &cleaned, |b, df| {
            b.iter(|| {
                let _ = correlation_matrix(black_box(df));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_prepare, benchmark_correlation);
criterion_main!(benches);
