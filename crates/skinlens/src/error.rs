//! Error type shared by the enhancement pipeline and the classifier.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for skinlens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by image I/O, configuration and model loading.
#[derive(Debug, Error)]
pub enum Error {
    /// The image file could not be opened or decoded.
    #[error("failed to read image {}: {source}", path.display())]
    ImageLoad {
        /// Path that was requested.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image could not be encoded or written.
    #[error("failed to write image {}: {source}", path.display())]
    ImageSave {
        /// Destination path.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The classifier weights could not be loaded.
    #[error("failed to load model {}: {message}", path.display())]
    ModelLoad {
        /// Record file that was requested.
        path: PathBuf,
        /// Recorder error text.
        message: String,
    },

    /// The classifier weights could not be written.
    #[error("failed to save model {}: {message}", path.display())]
    ModelSave {
        /// Destination record file.
        path: PathBuf,
        /// Recorder error text.
        message: String,
    },

    /// The model produced output that could not be read back.
    #[error("inference failed: {0}")]
    Inference(String),

    /// A configuration file could not be parsed.
    #[error("invalid configuration {}: {source}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Generic filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A tuning parameter is outside its valid range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Dotted parameter name, e.g. `clahe.clip_limit`.
        name: &'static str,
        /// Offending value, formatted.
        value: String,
        /// Constraint that was violated.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error came from decoding or opening an input image.
    pub fn is_image_load(&self) -> bool {
        matches!(self, Error::ImageLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_the_field() {
        let err = Error::invalid("gamma.gamma", 0.0, "must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("gamma.gamma"));
        assert!(msg.contains("must be > 0"));
        assert!(!err.is_image_load());
    }
}
