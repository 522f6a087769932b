use curve_core::{CurveBuilder, VerticalMapper};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_values(n: usize) -> Vec<f64> {
    // seasonal wave with drift, kept positive
    (0..n).map(|i| (i as f64 * 0.3).sin() * 40.0 + 50.0 + i as f64 * 0.01).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_build");
    let builder = CurveBuilder::default();
    for &n in &[120usize, 1_000usize, 10_000usize] {
        let data = gen_values(n);
        let biggest = data.iter().copied().fold(0.0, f64::max);
        let mapper = VerticalMapper::new(biggest, 480.0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &n, |b, _| {
            b.iter_batched(
                || data.clone(),
                |d| {
                    let px: Vec<f64> = d.iter().map(|&v| mapper.convert(v).unwrap()).collect();
                    let path = builder.build(&px).unwrap();
                    let _ = black_box(path.area(480.0));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
