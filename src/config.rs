//! Configuration for the leaf analysis pipeline.
//!
//! The configuration names the healthy reference photographs that make up the
//! baseline and whether background suppression runs. Classification
//! thresholds are fixed in [`crate::constants`] and are not part of it.
//!
//! ```no_run
//! use leaf_health::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use the bundled reference set
//! let config = PipelineConfig::default_reference_set();
//! # Ok::<(), leaf_health::AnalysisError>(())
//! ```

use crate::constants::baseline::REFERENCE_IMAGE_COUNT;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_leaf_masking() -> bool {
    true
}

/// Pipeline configuration.
///
/// Can be serialized to/from JSON so a reference set can be swapped without
/// recompiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Healthy reference photographs averaged into the baseline
    pub reference_images: Vec<PathBuf>,

    /// Zero out non-leaf pixels before extracting features
    #[serde(default = "default_leaf_masking")]
    pub leaf_masking: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::default_reference_set()
    }
}

impl PipelineConfig {
    /// Bundled healthy tomato leaf samples
    pub fn default_reference_set() -> Self {
        Self {
            reference_images: vec![
                PathBuf::from("samples/Tomato_healthy_1.jpeg"),
                PathBuf::from("samples/Tomato_healthy_2.jpeg"),
                PathBuf::from("samples/Tomato_healthy_3.jpeg"),
            ],
            leaf_masking: true,
        }
    }

    /// Build a configuration from an explicit reference list
    pub fn with_references<I, P>(references: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            reference_images: references.into_iter().map(Into::into).collect(),
            leaf_masking: true,
        }
    }

    /// Check that the reference list has the expected size
    pub fn validate(&self) -> Result<()> {
        if self.reference_images.len() != REFERENCE_IMAGE_COUNT {
            return Err(AnalysisError::invalid_configuration(format!(
                "expected {} reference images, got {}",
                REFERENCE_IMAGE_COUNT,
                self.reference_images.len()
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::configuration(format!("cannot read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::configuration(format!("cannot parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::configuration("cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::configuration(format!("cannot write {}", path.display()), e)
        })?;
        Ok(())
    }
}
