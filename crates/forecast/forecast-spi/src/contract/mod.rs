//! Contract traits for the forecast stack.

mod predictor;

pub use predictor::PricePredictor;
