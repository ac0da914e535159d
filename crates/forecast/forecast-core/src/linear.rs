//! Linear scoring over a named feature row.

use std::collections::HashMap;
use std::path::Path;

use forecast_spi::{FeatureRow, FeatureSchema, FeatureValue, ForecastError, PricePredictor, Result};

use crate::artifact::{ColumnWeights, ModelArtifact};
use crate::features::canonical_schema;

/// The shipped [`PricePredictor`]: intercept plus per-column contributions
/// from a [`ModelArtifact`].
///
/// Text columns contribute a learned per-category weight (fallback for unseen
/// categories and missing values); numeric columns contribute
/// `coefficient * value`, with the training mean substituted when the value
/// is missing.
#[derive(Debug)]
pub struct LinearModel {
    name: String,
    version: String,
    schema: FeatureSchema,
    intercept: f64,
    columns: HashMap<String, ColumnWeights>,
}

impl LinearModel {
    /// Build a model from a parsed artifact.
    ///
    /// Rejects artifacts whose schema differs from the canonical column set
    /// the request assembler produces, so a stale or foreign artifact fails
    /// here instead of scoring garbage at request time.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        canonical_schema().check_schema(&artifact.schema)?;
        artifact.check_complete()?;
        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            schema: artifact.schema,
            intercept: artifact.intercept,
            columns: artifact.columns.into_iter().collect(),
        })
    }

    /// Load an artifact file and build a model from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_artifact(ModelArtifact::from_path(path)?)
    }

    /// Model name, for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Artifact version, for logging.
    pub fn version(&self) -> &str {
        &self.version
    }

    fn contribution(&self, name: &str, value: &FeatureValue) -> Result<f64> {
        // Construction guarantees a weights entry per schema column.
        let weights = self
            .columns
            .get(name)
            .ok_or_else(|| ForecastError::PredictionFailed(format!("no weights for '{name}'")))?;
        match (weights, value) {
            (ColumnWeights::Category { weights, fallback }, FeatureValue::Text(category)) => {
                Ok(weights.get(category).copied().unwrap_or(*fallback))
            }
            (ColumnWeights::Category { fallback, .. }, FeatureValue::Missing) => Ok(*fallback),
            (ColumnWeights::Numeric { coefficient, .. }, FeatureValue::Number(number)) => {
                Ok(coefficient * number)
            }
            (ColumnWeights::Numeric { coefficient, mean }, FeatureValue::Missing) => {
                Ok(coefficient * mean)
            }
            (ColumnWeights::Category { .. }, FeatureValue::Number(_)) => {
                Err(ForecastError::PredictionFailed(format!(
                    "column '{name}' holds a number but the model expects text"
                )))
            }
            (ColumnWeights::Numeric { .. }, FeatureValue::Text(_)) => {
                Err(ForecastError::PredictionFailed(format!(
                    "column '{name}' holds text but the model expects a number"
                )))
            }
        }
    }
}

impl PricePredictor for LinearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        self.schema.check_row(row)?;
        let mut total = self.intercept;
        for (name, value) in row.iter() {
            total += self.contribution(name, value)?;
        }
        if total.is_finite() {
            Ok(total)
        } else {
            Err(ForecastError::PredictionFailed(
                "model produced a non-finite value".to_string(),
            ))
        }
    }
}
