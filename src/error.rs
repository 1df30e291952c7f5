//! Error types for price estimation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by feature derivation, encoding and inference.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed form input, e.g. a resolution token that is not `WIDTHxHEIGHT`.
    #[error("Failed to parse {what}: {input:?}")]
    Parse { what: &'static str, input: String },

    /// A categorical value the model never saw during training.
    #[error("Unknown category for column {column:?}: {value:?}")]
    UnknownCategory { column: String, value: String },

    /// A required artifact (model, schema, reference table) could not be loaded.
    #[error("Failed to load {artifact} from {}: {reason}", path.display())]
    ArtifactLoad {
        artifact: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The feature schema does not describe the vector this crate produces.
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A form value outside the choices or bounds the form offers.
    #[error("Invalid selection for {field}: {value}")]
    InvalidSelection { field: &'static str, value: String },

    /// Model invocation failed or returned an unusable output.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Invalid configuration file.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn artifact_load(
        artifact: &'static str,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Error::ArtifactLoad {
            artifact,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error comes from user input rather than from the deployment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::UnknownCategory { .. } | Error::InvalidSelection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_category() {
        let err = Error::UnknownCategory {
            column: "Company".to_string(),
            value: "Nokia".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown category for column \"Company\": \"Nokia\""
        );
    }

    #[test]
    fn test_display_artifact_load() {
        let err = Error::artifact_load("model", "/tmp/pipe.onnx", "no such file");
        assert_eq!(
            err.to_string(),
            "Failed to load model from /tmp/pipe.onnx: no such file"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::Parse {
            what: "resolution",
            input: "1920".to_string()
        }
        .is_input_error());
        assert!(!Error::Inference("boom".to_string()).is_input_error());
        assert!(!Error::SchemaMismatch("x".to_string()).is_input_error());
    }
}
