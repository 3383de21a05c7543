use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ephemstate::state::{get_position, OrientationSamples};
use ephemstate::{evaluate_polynomial, interpolate, Kernel};

fn sample_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let times: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let values = times.iter().map(|t| (0.1 * t).sin()).collect();
    (times, values)
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");
    for n in [8, 128, 2048] {
        let (times, values) = sample_series(n);
        let t = times[n / 2] + 0.25;
        for kernel in Kernel::ALL {
            group.bench_with_input(BenchmarkId::new(kernel.name(), n), &n, |b, _| {
                b.iter(|| interpolate(black_box(&values), &times, black_box(t), kernel, 1))
            });
        }
    }
    group.finish();
}

fn bench_reconstruction(c: &mut Criterion) {
    let (times, values) = sample_series(256);
    let coords = vec![values.clone(), values.clone(), values.clone()];
    let rotations = vec![
        values.iter().map(|v| 1.0 + v.abs()).collect(),
        values.clone(),
        vec![0.0; values.len()],
        values.iter().map(|v| -v).collect(),
    ];
    let samples = OrientationSamples::new(rotations, times.clone()).expect("valid bench samples");

    c.bench_function("position/cubic-spline/256", |b| {
        b.iter(|| get_position(&coords, &times, black_box(64.3), Kernel::CubicSpline))
    });
    c.bench_function("rotation/linear/256", |b| {
        b.iter(|| samples.rotation(black_box(64.3), Kernel::Linear))
    });
    c.bench_function("polynomial/degree-9/d2", |b| {
        let coeffs: Vec<f64> = (0..10).map(|k| 1.0 / (k + 1) as f64).collect();
        b.iter(|| evaluate_polynomial(&coeffs, black_box(0.75), 2))
    });
}

criterion_group!(benches, bench_kernels, bench_reconstruction);
criterion_main!(benches);
