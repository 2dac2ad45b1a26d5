//! Benchmarks for HDC encoding, training and prediction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emg_hdc::{build_trained_model, random, vsa, HdcConfig, ItemMemory, NgramEncoder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn synthetic(len: usize, seed: u64) -> (Vec<usize>, Vec<Vec<f64>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels = Vec::with_capacity(len);
    let mut samples = Vec::with_capacity(len);
    for i in 0..len {
        let class = (i / 50) % 3;
        let base = 0.2 + 0.3 * class as f64;
        labels.push(class);
        samples.push((0..4).map(|_| base + rng.gen_range(0.0..0.1)).collect());
    }
    (labels, samples)
}

fn bench_vector_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_algebra");

    for dim in [1_000, 10_000].iter() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = random::gen_random_hv(*dim, &mut rng).unwrap();
        let b = random::gen_random_hv(*dim, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::new("cos_angle", dim), dim, |bench, _| {
            bench.iter(|| black_box(vsa::cos_angle(a.as_slice(), b.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("bind", dim), dim, |bench, _| {
            bench.iter(|| black_box(vsa::entrywise_product(a.as_slice(), b.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("circ_shift", dim), dim, |bench, _| {
            bench.iter(|| black_box(vsa::circ_shift(a.as_slice())))
        });
    }

    group.finish();
}

fn bench_item_memory(c: &mut Criterion) {
    c.bench_function("item_memory_build_10k", |bench| {
        bench.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            black_box(ItemMemory::build(10_000, 4, 21, &mut rng))
        })
    });
}

fn bench_ngram(c: &mut Criterion) {
    let mut group = c.benchmark_group("ngram");
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let memory = ItemMemory::build(10_000, 4, 21, &mut rng).unwrap();
    let encoder = NgramEncoder::new(&memory, 20.0);
    let (_, samples) = synthetic(8, 3);

    for n in [1usize, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("encode", n), n, |bench, &n| {
            bench.iter(|| black_box(encoder.ngram(&samples[..n])))
        });
    }

    group.finish();
}

fn bench_train_predict(c: &mut Criterion) {
    let config = HdcConfig::default()
        .with_num_classes(3)
        .with_dimension(2_000)
        .with_ngram_size(4);
    let (labels, samples) = synthetic(600, 7);

    c.bench_function("train_600", |bench| {
        bench.iter(|| black_box(build_trained_model(&labels, &samples, &config)))
    });

    let model = build_trained_model(&labels, &samples, &config).unwrap();
    c.bench_function("predict_600", |bench| {
        bench.iter(|| black_box(model.predict(&labels, &samples)))
    });
}

criterion_group!(
    benches,
    bench_vector_algebra,
    bench_item_memory,
    bench_ngram,
    bench_train_predict
);
criterion_main!(benches);
