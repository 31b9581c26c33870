use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rm_channel::cs::ecc::{CodeMatrixBuilder, NoisyChannel, ReedMullerCode};

fn bench_matrix_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("rm_matrix_construction");

    for m in [3usize, 5, 7] {
        group.bench_with_input(BenchmarkId::new("h_matrices_uncached", m), &m, |b, &m| {
            b.iter(|| {
                let builder = CodeMatrixBuilder::new();
                builder.h_matrices(black_box(m)).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rm_encode_decode");

    for m in [3usize, 5, 7] {
        let code = ReedMullerCode::new(m).unwrap();
        let message: Vec<i32> = (0..=m).map(|i| (i % 2) as i32).collect();
        let codeword = code.encode(&message).unwrap();
        let mut channel = NoisyChannel::with_seed(42);
        let received = channel.transmit(&codeword, 0.05);

        // Warm the cache so only the coding work is measured
        code.h_matrices().unwrap();

        group.throughput(Throughput::Elements(code.codeword_length() as u64));

        group.bench_with_input(BenchmarkId::new("encode", m), &message, |b, message| {
            b.iter(|| code.encode(black_box(message)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("decode", m), &received, |b, received| {
            b.iter(|| code.decode(black_box(received)).unwrap())
        });
    }

    group.finish();
}

fn bench_channel(c: &mut Criterion) {
    let mut group = c.benchmark_group("noisy_channel");
    let bits = vec![0i32; 4096];
    let mut channel = NoisyChannel::with_seed(7);

    group.throughput(Throughput::Elements(bits.len() as u64));
    group.bench_function("transmit_4096", |b| {
        b.iter(|| channel.transmit(black_box(&bits), 0.1))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_construction,
    bench_encode_decode,
    bench_channel
);
criterion_main!(benches);
