use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use randzone::{FairnessEngine, PasswordOptions, SnowflakeDiscordId, ThreadRandom, generate_password, generate_secure_digits};

const PARTICIPANTS: usize = 256;

fn bench_fair_shuffle(c: &mut Criterion) {
    let engine = FairnessEngine::default();
    let names: Vec<String> = (0..PARTICIPANTS).map(|i| format!("P{i}")).collect();

    let mut group = c.benchmark_group("fairness");
    group.throughput(Throughput::Elements(PARTICIPANTS as u64));
    group.bench_function("fair_shuffle/256", |b| {
        b.iter(|| black_box(engine.fair_shuffle(black_box(&names))));
    });
    group.bench_function("split_into_groups/256x4", |b| {
        b.iter(|| black_box(engine.split_into_groups(black_box(&names), 4)));
    });
    group.finish();
}

fn bench_snowflake_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowflake");
    group.bench_function("encode", |b| {
        b.iter(|| {
            black_box(
                SnowflakeDiscordId::encode(black_box(1_700_000_000_000), 5, 10, 42).unwrap(),
            )
        });
    });
    let id = SnowflakeDiscordId::encode(1_700_000_000_000, 5, 10, 42).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| black_box(black_box(id).decode()));
    });
    group.finish();
}

fn bench_secure_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("secure_gen");
    group.bench_function("digits/16", |b| {
        b.iter(|| black_box(generate_secure_digits(&ThreadRandom, 16)));
    });
    let options = PasswordOptions::default();
    group.bench_function("password/16", |b| {
        b.iter(|| black_box(generate_password(&ThreadRandom, &options)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_fair_shuffle,
    bench_snowflake_codec,
    bench_secure_generators
);
criterion_main!(benches);
