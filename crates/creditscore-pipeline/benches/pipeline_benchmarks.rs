//! End-to-end pipeline benchmarks against the demo artifacts
//!
//! Run with: cargo bench -p creditscore-pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use creditscore_core::{ApplicantProfile, AttributeRecord};
use creditscore_pipeline::ArtifactBundle;

fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

fn sample_record() -> AttributeRecord {
    let profile: ApplicantProfile =
        creditscore_core::read_document(artifacts_dir().join("applicant.json"))
            .expect("sample applicant");
    profile.to_record()
}

fn bench_preprocessing(c: &mut Criterion) {
    let bundle = ArtifactBundle::load(artifacts_dir().join("manifest.yaml")).expect("demo bundle");
    let preprocessor = bundle.preprocessor();
    let record = sample_record();

    let mut group = c.benchmark_group("preprocessing");
    group.bench_function("encode", |b| b.iter(|| preprocessor.encode(black_box(&record))));
    group.bench_function("transform", |b| b.iter(|| preprocessor.transform(black_box(&record))));
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let bundle = ArtifactBundle::load(artifacts_dir().join("manifest.yaml")).expect("demo bundle");
    let record = sample_record();

    let mut group = c.benchmark_group("predict");
    for name in bundle.models().model_names() {
        let pipeline = bundle.pipeline(Some(&name)).expect("registered model");
        group.bench_with_input(BenchmarkId::from_parameter(&name), &record, |b, record| {
            b.iter(|| pipeline.predict(black_box(record)))
        });
    }
    group.finish();
}

fn bench_bundle_load(c: &mut Criterion) {
    let manifest = artifacts_dir().join("manifest.yaml");
    c.bench_function("bundle_load", |b| b.iter(|| ArtifactBundle::load(black_box(&manifest))));
}

criterion_group!(benches, bench_preprocessing, bench_predict, bench_bundle_load);
criterion_main!(benches);
