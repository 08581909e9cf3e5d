use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use arenahash::Sha384;

// Test data sizes
const SIZES: &[usize] = &[
    128,     // 1 block
    256,     // 2 blocks
    1024,    // 1 KB
    4096,    // 4 KB
    16384,   // 16 KB
    65536,   // 64 KB
    1048576, // 1 MB
];

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA-384");

    for &size in SIZES {
        let data = vec![0u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let digest = Sha384::hash(black_box(data)).unwrap();
                black_box(digest);
            });
        });
    }

    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA-384-streaming");

    // uneven chunks keep a leftover tail live across calls
    const CHUNK: usize = 1000;

    for &size in SIZES {
        let data = vec![0u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = Sha384::new().unwrap();
                for chunk in data.chunks(CHUNK) {
                    hasher.update(black_box(chunk)).unwrap();
                }
                black_box(hasher.digest().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_one_shot, bench_streaming);
criterion_main!(benches);
