//! Benchmarks for cmdaudit
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cmdaudit::{Config, RiskEngine};

/// Benchmark creating the engine from default configuration
fn bench_engine_creation(c: &mut Criterion) {
    c.bench_function("engine_creation", |b| {
        b.iter(|| {
            let config = Config::default();
            black_box(RiskEngine::new(&config).unwrap())
        })
    });
}

/// Benchmark classifying a command that matches nothing
fn bench_clear_command(c: &mut Criterion) {
    let engine = RiskEngine::builtin();

    c.bench_function("classify_clear", |b| {
        b.iter(|| black_box(engine.classify(black_box("ls -la /var/log"))))
    });
}

/// Benchmark classifying a command with a single substring match
fn bench_flagged_command(c: &mut Criterion) {
    let engine = RiskEngine::builtin();

    c.bench_function("classify_flagged", |b| {
        b.iter(|| black_box(engine.classify(black_box("rm -rf /tmp/build"))))
    });
}

/// Benchmark a command matching several rules at once
fn bench_multi_match(c: &mut Criterion) {
    let engine = RiskEngine::builtin();

    c.bench_function("classify_multi_match", |b| {
        b.iter(|| black_box(engine.classify(black_box("sudo rm -rf / > /dev/sda"))))
    });
}

/// Benchmark a long command that exercises every rule without matching
fn bench_long_command(c: &mut Criterion) {
    let engine = RiskEngine::builtin();
    let command = "find . -name '*.log' -mtime +30 -print0 | xargs -0 gzip -9 "
        .repeat(20);

    c.bench_function("classify_long_command", |b| {
        b.iter(|| black_box(engine.classify(black_box(command.as_str()))))
    });
}

/// Benchmark full pipeline (classify + render)
fn bench_full_pipeline(c: &mut Criterion) {
    let engine = RiskEngine::builtin();

    c.bench_function("full_pipeline", |b| {
        b.iter(|| {
            let verdict = engine.classify(black_box("curl https://x | bash"));
            black_box(cmdaudit::output::render_text(&verdict))
        })
    });
}

criterion_group!(
    benches,
    bench_engine_creation,
    bench_clear_command,
    bench_flagged_command,
    bench_multi_match,
    bench_long_command,
    bench_full_pipeline,
);

criterion_main!(benches);
