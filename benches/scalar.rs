//! Benchmarks for scalar multiplication. Requires `expose-field`.

use criterion::{criterion_group, criterion_main, Criterion};
use p256_ecdh::{base_scalar_mul, Scalar};
use rand_core::OsRng;

fn bench_scalar(c: &mut Criterion) {
    let mut rng = OsRng;
    let k = Scalar::generate(&mut rng).unwrap();

    c.bench_function("base_scalar_mul", |bencher| bencher.iter(|| base_scalar_mul(&k)));
}

criterion_group!(benches, bench_scalar);
criterion_main!(benches);
