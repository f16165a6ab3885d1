//! Criterion micro-benchmarks for the world and region file codecs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glyphmap_arena::SystemSource;
use glyphmap_bench::{reference_dims, reference_world};
use glyphmap_save::{read_region, read_world, write_region, write_world};

/// Benchmark: encode the world file of the reference world.
fn bench_encode_world_file(c: &mut Criterion) {
    let world = reference_world(reference_dims(), 1).unwrap();

    c.bench_function("codec_encode_world_file", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(4096);
            write_world(&mut buf, &world).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: decode the same world file.
fn bench_decode_world_file(c: &mut Criterion) {
    let world = reference_world(reference_dims(), 1).unwrap();
    let mut encoded = Vec::new();
    write_world(&mut encoded, &world).unwrap();

    c.bench_function("codec_decode_world_file", |b| {
        b.iter(|| {
            let mut cursor = encoded.as_slice();
            let decoded = read_world(&mut cursor, &mut SystemSource).unwrap();
            black_box(&decoded);
        });
    });
}

/// Benchmark: encode one region file (16 realms × 16 regions × 512 locals).
fn bench_encode_region_file(c: &mut Criterion) {
    let world = reference_world(reference_dims(), 2).unwrap();

    c.bench_function("codec_encode_region_file", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1 << 20);
            write_region(&mut buf, &world, 5).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: decode one region file into a world cell, replacing its
/// previous regions each time.
fn bench_decode_region_file(c: &mut Criterion) {
    let source_world = reference_world(reference_dims(), 3).unwrap();
    let mut encoded = Vec::new();
    write_region(&mut encoded, &source_world, 5).unwrap();
    let mut target = reference_world(reference_dims(), 4).unwrap();

    c.bench_function("codec_decode_region_file", |b| {
        b.iter(|| {
            let mut cursor = encoded.as_slice();
            read_region(&mut cursor, &mut target, 5, &mut SystemSource).unwrap();
            black_box(target.is_materialized(5));
        });
    });
}

criterion_group!(
    benches,
    bench_encode_world_file,
    bench_decode_world_file,
    bench_encode_region_file,
    bench_decode_region_file
);
criterion_main!(benches);
