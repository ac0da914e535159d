//! Forecast Facade
//!
//! High-level API for the price forecast stack. Re-exports all public types
//! from the forecast crates for convenient usage.

// Re-export the SPI traits, model types, and error taxonomy
pub use forecast_spi::{
    ErrorClass, FeatureRow, FeatureSchema, FeatureValue, ForecastError, PricePredictor, Result,
};

// Re-export the core request/validation/scoring surface
pub use forecast_core::{
    canonical_schema, validate, ColumnWeights, Forecast, ForecastRequest, LinearModel,
    ModelArtifact, PredictionService, RawNumber, ValidForecast, CANONICAL_COLUMNS, DEFAULT_MARKET,
    YEAR_WINDOW,
};
