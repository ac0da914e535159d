//! Forecast core
//!
//! The contract behind the prediction endpoint: parse and validate a raw
//! forecast request, assemble exactly one feature row in the canonical column
//! order, score it against an injected [`forecast_spi::PricePredictor`], and
//! wrap the scalar into a response.

mod artifact;
mod features;
mod linear;
mod request;
mod service;
mod validation;

pub use artifact::{ColumnWeights, ModelArtifact};
pub use features::{canonical_schema, CANONICAL_COLUMNS};
pub use linear::LinearModel;
pub use request::{ForecastRequest, RawNumber, ValidForecast};
pub use service::{Forecast, PredictionService};
pub use validation::{validate, DEFAULT_MARKET, YEAR_WINDOW};
