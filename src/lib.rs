//! Laptop price estimation.
//!
//! Derives the model's feature vector from form selections, runs a
//! pre-trained ONNX regressor that predicts log price, and renders the
//! decoded estimate.

pub mod catalog;
pub mod error;
pub mod features;
pub mod predictor;
pub mod schema;
pub mod summary;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use features::{derive_features, FeatureVector, RawSpec, Resolution, YesNo};
pub use predictor::{Artifacts, Config, Estimator, OnnxEstimator, PredictionResult, PricePredictor};
pub use schema::FeatureSchema;
pub use summary::PriceSummary;
