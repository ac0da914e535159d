//! Feature schema: the ordered column set a model was trained on.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::model::FeatureRow;

/// Ordered list of column names a predictor expects.
///
/// Serialized inside model artifacts so agreement between the artifact and
/// the row assembler can be checked once at load time instead of surfacing as
/// an opaque scoring failure per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from owned column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Create a schema from borrowed column names.
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            columns: names.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Comma-joined column list, used in mismatch messages.
    pub fn describe(&self) -> String {
        self.columns.join(", ")
    }

    /// Check that `row` carries exactly these columns in this order.
    pub fn check_row(&self, row: &FeatureRow) -> Result<()> {
        let matches = row.len() == self.columns.len()
            && row
                .names()
                .zip(self.columns.iter())
                .all(|(actual, expected)| actual == expected.as_str());
        if matches {
            Ok(())
        } else {
            Err(ForecastError::SchemaMismatch {
                expected: self.describe(),
                actual: row.names().collect::<Vec<_>>().join(", "),
            })
        }
    }

    /// Check that another schema is identical, column for column.
    pub fn check_schema(&self, other: &FeatureSchema) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(ForecastError::SchemaMismatch {
                expected: self.describe(),
                actual: other.describe(),
            })
        }
    }
}
