//! Error types for the forecast stack.

mod forecast_error;

pub use forecast_error::{ErrorClass, ForecastError, Result};
