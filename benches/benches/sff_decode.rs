//! Benchmark suite for SFF v2 decoding and atlas packing.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mugen_sff_benches::{generate_test_sff, sizes};
use sff_core::Sff;
use sff_core::atlas;
use std::hint::black_box;

/// Benchmarks `Sff::load` (directory walk + RLE8 decode) across a range of
/// single-sprite catalog sizes.
fn bench_decode_sizes(c: &mut Criterion) {
	let mut group = c.benchmark_group("sff_decode");

	let cases = [("tiny", sizes::TINY), ("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)];

	for (name, (width, height)) in cases {
		let data = generate_test_sff(width, height, 1);
		let pixels = u64::from(width) * u64::from(height);

		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("load", name), &data, |b, data| {
			b.iter(|| {
				let result = Sff::load(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmarks decoding a catalog with many small sprites, exercising the
/// link-resolution and per-sprite directory-walk overhead rather than raw
/// codec throughput.
fn bench_decode_many_sprites(c: &mut Criterion) {
	let mut group = c.benchmark_group("sff_decode_directory");

	let (width, height) = sizes::TINY;
	let data = generate_test_sff(width, height, 64);

	group.throughput(Throughput::Elements(64));
	group.bench_function("load_64_sprites", |b| {
		b.iter(|| {
			let result = Sff::load(black_box(&data));
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmarks the atlas packer in isolation, holding the decode cost fixed.
fn bench_atlas_pack(c: &mut Criterion) {
	let mut group = c.benchmark_group("atlas_pack");

	let (width, height) = sizes::SMALL;
	let data = generate_test_sff(width, height, 16);
	let sff = Sff::load(&data).unwrap();

	group.throughput(Throughput::Elements(16));
	group.bench_function("pack_16_sprites", |b| {
		b.iter_batched(
			|| sff.clone(),
			|mut sff| {
				let result = atlas::pack(black_box(&mut sff), "bench");
				black_box(result)
			},
			criterion::BatchSize::SmallInput,
		);
	});

	group.finish();
}

/// End-to-end: decode a realistic multi-sprite catalog and pack it.
fn bench_full_pipeline(c: &mut Criterion) {
	let mut group = c.benchmark_group("sff_full_pipeline");
	group.sample_size(30);

	let (width, height) = sizes::LARGE;
	let data = generate_test_sff(width, height, 8);

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("decode_and_pack", |b| {
		b.iter(|| {
			let mut sff = Sff::load(black_box(&data)).unwrap();
			let atlas = atlas::pack(&mut sff, "bench");
			black_box(atlas)
		});
	});

	group.finish();
}

criterion_group!(benches, bench_decode_sizes, bench_decode_many_sprites, bench_atlas_pack, bench_full_pipeline,);

criterion_main!(benches);
