//! Serialized model artifact format.
//!
//! An artifact is a JSON document produced by the offline training job. It
//! carries the schema the model was trained on next to its scoring
//! parameters, so schema agreement is verified once when the file is loaded
//! rather than per request.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use forecast_spi::{FeatureSchema, ForecastError, Result};

/// Scoring parameters for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnWeights {
    /// Text column: learned weight per category, fallback for categories and
    /// missing values not seen in training.
    Category {
        weights: BTreeMap<String, f64>,
        #[serde(default)]
        fallback: f64,
    },
    /// Numeric column: linear coefficient, with the training mean substituted
    /// for missing values.
    Numeric {
        coefficient: f64,
        #[serde(default)]
        mean: f64,
    },
}

/// On-disk representation of a trained price model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    pub schema: FeatureSchema,
    pub intercept: f64,
    pub columns: BTreeMap<String, ColumnWeights>,
}

impl ModelArtifact {
    /// Read and parse an artifact file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| {
            ForecastError::Artifact(format!("failed to read {}: {error}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|error| {
            ForecastError::Artifact(format!("failed to parse {}: {error}", path.display()))
        })
    }

    /// Every schema column must have scoring parameters.
    pub fn check_complete(&self) -> Result<()> {
        for column in self.schema.columns() {
            if !self.columns.contains_key(column) {
                return Err(ForecastError::Artifact(format!(
                    "no weights for schema column '{column}'"
                )));
            }
        }
        Ok(())
    }
}
