//! Error types for the leaf_health library

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for leaf_health operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for leaf analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or decoded
    #[error("Failed to load image {}: {message}", .path.display())]
    ImageLoadError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reference set or configuration file is unusable
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Command line was missing a required argument
    #[error("Usage error: {message}")]
    UsageError { message: String },

    /// Raster with no pixels reached a stage that needs at least one
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Generic processing error
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(path: &Path, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            path: path.to_path_buf(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with an underlying cause
    pub fn configuration<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigurationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: None,
        }
    }

    /// Process exit code for the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalysisError::UsageError { .. } => 2,
            _ => 1,
        }
    }

    /// Get user-friendly error description for display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { path, .. } => format!(
                "Could not load the image '{}'. Please check that the file exists and is a supported format.",
                path.display()
            ),
            AnalysisError::ConfigurationError { .. } => {
                "The healthy baseline could not be built. Please check the reference image list.".to_string()
            }
            AnalysisError::UsageError { .. } => {
                "Missing required argument. Use --help for usage information.".to_string()
            }
            _ => "Leaf analysis failed. Please try with a different image.".to_string(),
        }
    }
}
