//! Criterion benchmarks for cone membership.
//! PSD sizes: n in {3, 10, 50}; vector cones at n = 1000.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use convexlab::cone::{Comparison, Cone, ConeCfg, Operand};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_gram(n: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let g = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    &g * g.transpose()
}

fn bench_cones(c: &mut Criterion) {
    let cfg = ConeCfg::default();
    let mut group = c.benchmark_group("cone");
    for &n in &[3usize, 10, 50] {
        let cmp = Comparison::new(
            Cone::Psd(n),
            Operand::Matrix(random_gram(n, 1)),
            Operand::Matrix(random_gram(n, 2)),
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::new("psd", n), &n, |b, _| {
            b.iter(|| cmp.evaluate(&cfg))
        });
    }

    let mut rng = StdRng::seed_from_u64(7);
    let a = DVector::from_fn(1000, |_, _| rng.gen_range(0.0..1.0));
    let z = DVector::zeros(1000);
    for cone in [Cone::Orthant(1000), Cone::SecondOrder(1000)] {
        let cmp = Comparison::new(cone, Operand::Vector(a.clone()), Operand::Vector(z.clone())).unwrap();
        group.bench_function(cone.name(), |b| b.iter(|| cmp.evaluate(&cfg)));
    }
    group.finish();
}

criterion_group!(benches, bench_cones);
criterion_main!(benches);
