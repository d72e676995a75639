//! Benchmarks for the modular and curve layers

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wideint_core::modular::{mod_exp, mod_inverse, mul_mod};
use wideint_core::{Exchange, U256, params};

fn bench_mul_mod(c: &mut Criterion) {
    let p = params::SECP256K1_P;
    let a = params::SECP256K1_GX;
    let b = params::SECP256K1_GY;

    c.bench_function("mul_mod_secp256k1", |bench| {
        bench.iter(|| mul_mod(black_box(a), black_box(b), p))
    });
}

fn bench_mod_exp(c: &mut Criterion) {
    let p = params::P192_P;
    let base = params::P192_GX;

    c.bench_function("mod_exp_p192", |bench| {
        bench.iter(|| mod_exp(black_box(base), black_box(p - 1u64), p))
    });
    c.bench_function("mod_inverse_p192", |bench| {
        bench.iter(|| mod_inverse(black_box(base), p))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let curve = params::p192();
    let scalar: U256 = "1863057198451078255086943063078133078831752240818134503"
        .parse()
        .unwrap();

    let mut group = c.benchmark_group("scalar_mul");
    group.sample_size(10);
    group.bench_function("p192", |bench| {
        bench.iter(|| curve.curve.scalar_mul(curve.generator, black_box(scalar)))
    });
    group.bench_function("p192_exchange", |bench| {
        bench.iter(|| Exchange::run(curve, black_box(scalar), black_box(scalar + 1u64)))
    });
    group.finish();
}

criterion_group!(benches, bench_mul_mod, bench_mod_exp, bench_scalar_mul);
criterion_main!(benches);
