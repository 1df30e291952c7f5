//! Price prediction inference interface.
//!
//! Provides the main PricePredictor struct for loading the ONNX regressor
//! and turning its log-price output into a price estimate.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::features::{derive_features, FeatureVector, RawSpec};
use crate::schema::FeatureSchema;
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Configuration for artifact locations and inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the ONNX regressor
    pub model_path: PathBuf,

    /// Path to the feature schema JSON
    pub schema_path: PathBuf,

    /// Path to the reference table CSV
    pub reference_path: PathBuf,

    /// Name of the model output holding the log price
    pub output_name: String,

    /// Enable graph optimization
    pub optimize_graph: bool,

    /// Intra-op thread count for ONNX Runtime
    pub intra_threads: usize,

    /// Currency symbol used when rendering prices
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("pipe_rand.onnx"),
            schema_path: PathBuf::from("schema.json"),
            reference_path: PathBuf::from("laptops.csv"),
            // skl2onnx names regressor outputs "variable"
            output_name: "variable".to_string(),
            optimize_graph: true,
            intra_threads: 1,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON configuration file; missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// A trained regressor that maps one encoded row to its outputs.
pub trait Estimator: Send + Sync {
    /// Run inference on a `(1, width)` input and return the raw outputs.
    fn predict(&self, input: Array2<f32>) -> Result<Vec<f32>>;

    /// Estimator name for logs.
    fn name(&self) -> &str;
}

/// Estimator backed by an ONNX Runtime session.
pub struct OnnxEstimator {
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,

    output_name: String,

    name: String,
}

impl OnnxEstimator {
    /// Load an ONNX model.
    ///
    /// # Arguments
    /// * `model_path` - Path to ONNX model file
    /// * `config` - Optimization and output settings
    pub fn load(model_path: &Path, config: &Config) -> Result<Self> {
        let session = Session::builder()
            .map_err(model_load_error(model_path))?
            .with_optimization_level(if config.optimize_graph {
                GraphOptimizationLevel::Level3
            } else {
                GraphOptimizationLevel::Level1
            })
            .map_err(model_load_error(model_path))?
            .with_intra_threads(config.intra_threads)
            .map_err(model_load_error(model_path))?
            .commit_from_file(model_path)
            .map_err(model_load_error(model_path))?;

        tracing::info!(
            path = %model_path.display(),
            output = %config.output_name,
            "Loaded ONNX model"
        );

        Ok(Self {
            session: Mutex::new(session),
            output_name: config.output_name.clone(),
            name: model_path.display().to_string(),
        })
    }
}

fn model_load_error<E: ToString>(path: &Path) -> impl Fn(E) -> Error + '_ {
    move |e| Error::artifact_load("model", path, e)
}

impl Estimator for OnnxEstimator {
    fn predict(&self, input: Array2<f32>) -> Result<Vec<f32>> {
        let tensor = Value::from_array(input).map_err(|e| Error::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Inference("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| Error::Inference(e.to_string()))?;

        let output = outputs.get(&self.output_name).ok_or_else(|| {
            Error::Inference(format!("model has no output {:?}", self.output_name))
        })?;
        let tensor_data = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference(e.to_string()))?;

        Ok(tensor_data.1.to_vec())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Result of a price prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw model output, the natural log of the price
    pub log_price: f64,

    /// `exp(log_price)` truncated to whole currency units
    pub price: u64,
}

impl PredictionResult {
    /// Decode a log-scaled model output.
    ///
    /// Fails when the output is not finite or its exponential overflows.
    pub fn from_log_price(log_price: f64) -> Result<Self> {
        if !log_price.is_finite() {
            return Err(Error::Inference(format!(
                "model returned non-finite output {log_price}"
            )));
        }

        let price = log_price.exp();
        if !price.is_finite() || price >= u64::MAX as f64 {
            return Err(Error::Inference(format!(
                "price exp({log_price}) out of range"
            )));
        }

        Ok(Self {
            log_price,
            price: price.trunc() as u64,
        })
    }
}

/// Main price predictor: schema-checked encoding plus a trained estimator.
pub struct PricePredictor {
    schema: FeatureSchema,

    estimator: Box<dyn Estimator>,
}

impl PricePredictor {
    /// Wrap an estimator; fails fast if the schema does not match the feature vector.
    pub fn new(schema: FeatureSchema, estimator: Box<dyn Estimator>) -> Result<Self> {
        schema.validate()?;
        Ok(Self { schema, estimator })
    }

    /// Load schema and ONNX model from the configured paths.
    ///
    /// # Example
    /// ```no_run
    /// use laptop_price::{Config, PricePredictor};
    ///
    /// let predictor = PricePredictor::load(&Config::default()).unwrap();
    /// ```
    pub fn load(config: &Config) -> Result<Self> {
        let schema = FeatureSchema::from_file(&config.schema_path)?;
        let estimator = OnnxEstimator::load(&config.model_path, config)?;
        Self::new(schema, Box::new(estimator))
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predict the price for a derived feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let input = self.schema.encode(features)?;
        tracing::debug!(
            estimator = self.estimator.name(),
            width = input.ncols(),
            "Encoded feature vector"
        );

        let outputs = self.estimator.predict(input)?;
        let log_price = outputs
            .first()
            .copied()
            .ok_or_else(|| Error::Inference("model returned no outputs".to_string()))?;

        let result = PredictionResult::from_log_price(f64::from(log_price))?;
        tracing::debug!(log_price = result.log_price, price = result.price, "Predicted price");
        Ok(result)
    }

    /// Derive features from form selections and predict.
    pub fn estimate(&self, spec: &RawSpec) -> Result<PredictionResult> {
        let features = derive_features(spec);
        tracing::debug!(?features, "Derived features");
        self.predict(&features)
    }
}

/// Artifacts loaded once at startup and shared read-only.
#[derive(Clone)]
pub struct Artifacts {
    pub predictor: Arc<PricePredictor>,

    pub catalog: Arc<Catalog>,
}

impl Artifacts {
    /// Load model, schema and reference table. Any failure aborts startup.
    pub fn load(config: &Config) -> Result<Self> {
        let predictor = PricePredictor::load(config)?;
        let catalog = Catalog::from_path(&config.reference_path)?;
        Ok(Self {
            predictor: Arc::new(predictor),
            catalog: Arc::new(catalog),
        })
    }
}
