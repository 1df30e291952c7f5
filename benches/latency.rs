//! Latency benchmarks for price estimation.
//!
//! # Benchmarks
//!
//! ## Feature Path
//! - `resolution_parse`: `WIDTHxHEIGHT` token parsing
//! - `derive_features`: form selections to feature vector
//! - `encode`: feature vector to one-hot model input
//! - `summary_render`: formatted summary text
//!
//! ## End-to-End Inference
//! - `estimate`: derive + encode + ONNX inference
//!
//! # Running Benchmarks
//!
//! ```bash
//! # All benchmarks
//! cargo bench
//!
//! # With real artifacts (place test_model.onnx and test_schema.json in benches/)
//! cargo bench -- estimate
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use laptop_price::schema::{ColumnEncoding, ColumnSpec, FeatureSchema};
use laptop_price::features::{ColumnKind, FEATURE_COLUMNS};
use laptop_price::{RawSpec, Resolution, YesNo};

fn sample_spec() -> RawSpec {
    RawSpec {
        brand: "Dell".to_string(),
        form_factor: "Notebook".to_string(),
        weight: 1.5,
        ram: 8,
        hdd: 0,
        ssd: 256,
        touchscreen: YesNo::No,
        ips: YesNo::Yes,
        screen_size: 15.6,
        resolution: Resolution::new(1920, 1080),
        cpu_brand: "Intel Core i5".to_string(),
        gpu_brand: "Intel".to_string(),
        os: "Windows".to_string(),
    }
}

/// Schema whose categorical columns each learn `n` categories, the sample's
/// value last so lookup walks the whole list.
fn synthetic_schema(n: usize) -> FeatureSchema {
    let spec = sample_spec();
    let sample_value = |name: &str| -> String {
        match name {
            "Company" => spec.brand.clone(),
            "TypeName" => spec.form_factor.clone(),
            "Cpu brand" => spec.cpu_brand.clone(),
            "Gpu brand" => spec.gpu_brand.clone(),
            _ => spec.os.clone(),
        }
    };

    let columns = FEATURE_COLUMNS
        .iter()
        .map(|column| ColumnSpec {
            name: column.name.to_string(),
            encoding: match column.kind {
                ColumnKind::Number => ColumnEncoding::Numeric,
                ColumnKind::Category => {
                    let mut categories: Vec<String> =
                        (0..n - 1).map(|i| format!("category-{i}")).collect();
                    categories.push(sample_value(column.name));
                    ColumnEncoding::Categorical {
                        categories,
                        drop_first: true,
                    }
                }
            },
        })
        .collect();

    FeatureSchema { columns }
}

//
// Feature Path Benchmarks
//

fn benchmark_features(c: &mut Criterion) {
    use laptop_price::derive_features;

    c.bench_function("resolution_parse", |b| {
        b.iter(|| {
            let _ = Resolution::parse(black_box("2560x1600"));
        });
    });

    c.bench_function("derive_features", |b| {
        let spec = sample_spec();
        b.iter(|| {
            let _ = derive_features(black_box(&spec));
        });
    });
}

fn benchmark_encode(c: &mut Criterion) {
    use laptop_price::derive_features;

    let mut group = c.benchmark_group("encode");
    let features = derive_features(&sample_spec());

    // Catalog sizes from a handful of brands to a wide reference table
    for categories in [4usize, 20, 100].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(categories),
            categories,
            |b, &categories| {
                let schema = synthetic_schema(categories);
                b.iter(|| {
                    let _ = schema.encode(black_box(&features));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_summary(c: &mut Criterion) {
    use laptop_price::{PredictionResult, PriceSummary};

    c.bench_function("summary_render", |b| {
        let spec = sample_spec();
        let prediction = PredictionResult::from_log_price(11.2).unwrap();
        b.iter(|| {
            let _ = PriceSummary::new(black_box(&spec), &prediction, "₹").to_string();
        });
    });
}

//
// End-to-End Benchmarks
//
// Note: These require real artifacts.
// Place benches/test_model.onnx and benches/test_schema.json to enable.
//

fn benchmark_end_to_end(c: &mut Criterion) {
    use laptop_price::{Config, PricePredictor};
    use std::path::PathBuf;

    let benches = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches");
    let config = Config {
        model_path: benches.join("test_model.onnx"),
        schema_path: benches.join("test_schema.json"),
        ..Config::default()
    };

    if !config.model_path.exists() || !config.schema_path.exists() {
        eprintln!(
            "Skipping end-to-end benchmarks: artifacts not found in {}",
            benches.display()
        );
        eprintln!("To enable, place test_model.onnx and test_schema.json in benches/");
        return;
    }

    let predictor = PricePredictor::load(&config).unwrap();
    let spec = sample_spec();

    c.bench_function("estimate", |b| {
        b.iter(|| {
            let _ = predictor.estimate(black_box(&spec));
        });
    });
}

criterion_group!(
    benches,
    benchmark_features,
    benchmark_encode,
    benchmark_summary,
    benchmark_end_to_end,
);
criterion_main!(benches);
