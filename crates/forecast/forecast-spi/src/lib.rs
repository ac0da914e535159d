//! Forecast Service Provider Interface
//!
//! Defines the predictor contract, the tabular feature model a predictor is
//! scored on, and the error taxonomy shared by the whole forecast stack.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::PricePredictor;
pub use error::{ErrorClass, ForecastError, Result};
pub use model::{FeatureRow, FeatureSchema, FeatureValue};
