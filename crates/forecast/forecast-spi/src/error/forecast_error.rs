//! Forecast error taxonomy.

use thiserror::Error;

/// Errors that can occur while validating a forecast request, loading a model
/// artifact, or scoring a feature row.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A mandatory request field is absent or empty.
    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A request field is present but outside its accepted bounds.
    #[error("Field '{field}' out of range: {reason}")]
    FieldOutOfRange { field: &'static str, reason: String },

    /// An optional feature is present but is not a finite number.
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidFeature { field: &'static str, reason: String },

    /// The assembled row or loaded artifact does not match the expected
    /// column set.
    #[error("Feature schema mismatch: expected [{expected}], got [{actual}]")]
    SchemaMismatch { expected: String, actual: String },

    /// No model is loaded; the service cannot score anything.
    #[error("Prediction model is not available")]
    PredictorUnavailable,

    /// The model raised while scoring a structurally valid row.
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    /// The model artifact could not be read or parsed.
    #[error("Model artifact error: {0}")]
    Artifact(String),
}

/// Result type for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Coarse classification used by transport layers to pick a response class
/// without matching on message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad client input; a 400-class response.
    Validation,
    /// The model is absent; a service-unavailable response.
    Unavailable,
    /// Everything else; a 500-class response.
    Internal,
}

impl ForecastError {
    /// Classify this error for transport mapping.
    pub fn class(&self) -> ErrorClass {
        match self {
            ForecastError::MissingField { .. }
            | ForecastError::FieldOutOfRange { .. }
            | ForecastError::InvalidFeature { .. } => ErrorClass::Validation,
            ForecastError::PredictorUnavailable => ErrorClass::Unavailable,
            ForecastError::SchemaMismatch { .. }
            | ForecastError::PredictionFailed(_)
            | ForecastError::Artifact(_) => ErrorClass::Internal,
        }
    }
}
