//! Performance benchmarks for the detection pipeline
//!
//! Run with: cargo bench --bench pipeline_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use piisift_core::{DetectOptions, LexiconDetector, PiiPipeline};
use std::hint::black_box;

/// Generate a CV-like text of roughly the requested size in bytes
fn generate_text(size: usize) -> String {
    let base = "Jan Jansen werkte bij Google in Amsterdam. Mail jan@example.nl of bel 06-12345678. ";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

fn pipeline() -> PiiPipeline<LexiconDetector> {
    let lexicon = LexiconDetector::default()
        .with_terms("person", &["Jan Jansen"])
        .unwrap()
        .with_terms("organization", &["Google"])
        .unwrap()
        .with_terms("location", &["Amsterdam"])
        .unwrap();
    PiiPipeline::new(lexicon).unwrap()
}

/// Benchmark detection over different text sizes
fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let pipeline = pipeline();

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("detect", size), &text, |b, text| {
            b.iter(|| {
                let _ = pipeline
                    .detect(black_box(text), &DetectOptions::default())
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark anonymization, detection included
fn bench_anonymize(c: &mut Criterion) {
    let mut group = c.benchmark_group("anonymize");
    let pipeline = pipeline();
    let text = generate_text(102_400);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("anonymize_100kb", |b| {
        b.iter(|| {
            let _ = pipeline
                .anonymize(black_box(&text), &DetectOptions::default())
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_detect, bench_anonymize);
criterion_main!(benches);
