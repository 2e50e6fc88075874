// ABOUTME: Criterion benchmarks for the calculation engine
// ABOUTME: Measures single formulas, full request pipelines and parallel batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Criterion benchmarks for the calculation engine.
//!
//! Measures raw formula cost, the validate-compute-format pipeline per
//! metric, and sequential against parallel batch evaluation.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nutrimetric::algorithms::bmr;
use nutrimetric::config::EngineConfig;
use nutrimetric::engine::{calculate_batch, calculate_with, CalculationRequest};
use nutrimetric::models::{Gender, Metric};
use nutrimetric::validation::RawBiometricInput;

/// Client measurements covering every metric's inputs
fn full_client(index: usize) -> RawBiometricInput {
    let weight = 50.0 + (index % 60) as f64;
    RawBiometricInput {
        weight_kg: Some(weight.into()),
        height_cm: Some((150.0 + (index % 45) as f64).into()),
        age_years: Some((20 + (index % 50) as u32).into()),
        gender: Some((if index % 2 == 0 { "male" } else { "female" }).into()),
        activity_level: Some("moderately_active".into()),
        neck_cm: Some(36.0.into()),
        waist_cm: Some(82.0.into()),
        hip_cm: Some(98.0.into()),
        body_fat_percent: Some(22.0.into()),
        daily_calorie_delta: Some((-400.0).into()),
        ..RawBiometricInput::default()
    }
}

fn bench_formulas(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulas");

    group.bench_function("mifflin_st_jeor", |b| {
        b.iter(|| bmr::mifflin_st_jeor(black_box(70.0), black_box(175.0), black_box(30), Gender::Male));
    });
    group.bench_function("harris_benedict", |b| {
        b.iter(|| bmr::harris_benedict(black_box(70.0), black_box(175.0), black_box(30), Gender::Male));
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let config = EngineConfig::default();
    let input = full_client(0);

    for metric in Metric::ALL {
        let request = CalculationRequest::new(metric, input.clone());
        group.bench_with_input(BenchmarkId::from_parameter(metric), &request, |b, request| {
            b.iter(|| calculate_with(&config, black_box(request)));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let config = EngineConfig::default();

    for size in [100_usize, 1_000] {
        let requests: Vec<CalculationRequest> = (0..size)
            .map(|index| CalculationRequest::new(Metric::ALL[index % Metric::ALL.len()], full_client(index)))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &requests, |b, requests| {
            b.iter(|| {
                requests
                    .iter()
                    .map(|request| calculate_with(&config, request))
                    .collect::<Vec<_>>()
            });
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &requests, |b, requests| {
            b.iter(|| calculate_batch(&config, black_box(requests)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_formulas, bench_pipeline, bench_batch);
criterion_main!(benches);
