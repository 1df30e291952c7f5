//! Feature schema and input encoding.
//!
//! The schema artifact records the columns the regressor was trained on and
//! the categories its one-hot step learned. Encoding reproduces the training
//! pipeline's column transformer: one-hot blocks for categorical columns
//! first (in column order), then numeric columns passed through (in column
//! order).

use crate::error::{Error, Result};
use crate::features::{ColumnKind, FeatureValue, FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How one training column is turned into model inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnEncoding {
    /// Passed through as a single float
    Numeric,

    /// One indicator per learned category
    Categorical {
        categories: Vec<String>,

        /// The first category is dropped and encodes as all zeros
        #[serde(default)]
        drop_first: bool,
    },
}

/// One training column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,

    #[serde(flatten)]
    pub encoding: ColumnEncoding,
}

/// Column layout and learned categories of the trained pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// Parse a schema from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let schema: FeatureSchema = serde_json::from_str(json)
            .map_err(|e| Error::artifact_load("schema", "<string>", e))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema artifact from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::artifact_load("schema", path, e))?;
        let schema: FeatureSchema =
            serde_json::from_str(&json).map_err(|e| Error::artifact_load("schema", path, e))?;
        schema.validate()?;

        tracing::info!(
            path = %path.display(),
            encoded_width = schema.encoded_width(),
            "Loaded feature schema"
        );
        Ok(schema)
    }

    /// Check that the schema describes exactly the vector [`FeatureVector`] produces.
    pub fn validate(&self) -> Result<()> {
        if self.columns.len() != FEATURE_COUNT {
            return Err(Error::SchemaMismatch(format!(
                "expected {} columns, schema has {}",
                FEATURE_COUNT,
                self.columns.len()
            )));
        }

        for (i, (spec, expected)) in self.columns.iter().zip(FEATURE_COLUMNS.iter()).enumerate() {
            if spec.name != expected.name {
                return Err(Error::SchemaMismatch(format!(
                    "column {} is {:?}, expected {:?}",
                    i, spec.name, expected.name
                )));
            }

            if let ColumnEncoding::Categorical { categories, .. } = &spec.encoding {
                if expected.kind != ColumnKind::Category {
                    return Err(Error::SchemaMismatch(format!(
                        "column {:?} is numeric but encoded as categorical",
                        spec.name
                    )));
                }
                if categories.is_empty() {
                    return Err(Error::SchemaMismatch(format!(
                        "column {:?} has no categories",
                        spec.name
                    )));
                }
            } else if expected.kind == ColumnKind::Category {
                return Err(Error::SchemaMismatch(format!(
                    "column {:?} holds categories but is encoded as numeric",
                    spec.name
                )));
            }
        }

        Ok(())
    }

    /// Number of floats in one encoded row.
    pub fn encoded_width(&self) -> usize {
        self.columns
            .iter()
            .map(|spec| match &spec.encoding {
                ColumnEncoding::Numeric => 1,
                ColumnEncoding::Categorical {
                    categories,
                    drop_first,
                } => categories.len().saturating_sub(usize::from(*drop_first)),
            })
            .sum()
    }

    /// Encode a feature vector into a `(1, encoded_width)` model input.
    ///
    /// Fails with [`Error::SchemaMismatch`] when the schema does not describe
    /// the feature vector, and with [`Error::UnknownCategory`] when a
    /// categorical value was not seen during training.
    pub fn encode(&self, features: &FeatureVector) -> Result<Array2<f32>> {
        self.validate()?;

        let values = features.values();
        let mut row = Array2::<f32>::zeros((1, self.encoded_width()));
        let mut col = 0;

        // 1. One-hot blocks
        for (spec, value) in self.columns.iter().zip(values.iter()) {
            let ColumnEncoding::Categorical {
                categories,
                drop_first,
            } = &spec.encoding
            else {
                continue;
            };

            let text = match value {
                FeatureValue::Category(text) => *text,
                FeatureValue::Number(_) => {
                    return Err(Error::SchemaMismatch(format!(
                        "column {:?} expects a category",
                        spec.name
                    )))
                }
            };

            let index = categories
                .iter()
                .position(|c| c == text)
                .ok_or_else(|| Error::UnknownCategory {
                    column: spec.name.clone(),
                    value: text.to_string(),
                })?;

            let skip = usize::from(*drop_first);
            if index >= skip {
                row[[0, col + index - skip]] = 1.0;
            }
            col += categories.len() - skip;
        }

        // 2. Numeric passthrough
        for (spec, value) in self.columns.iter().zip(values.iter()) {
            if spec.encoding != ColumnEncoding::Numeric {
                continue;
            }
            match value {
                FeatureValue::Number(n) => row[[0, col]] = *n as f32,
                FeatureValue::Category(_) => {
                    return Err(Error::SchemaMismatch(format!(
                        "column {:?} expects a number",
                        spec.name
                    )))
                }
            }
            col += 1;
        }

        Ok(row)
    }
}
