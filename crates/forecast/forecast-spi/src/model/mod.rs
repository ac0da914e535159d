//! Tabular feature model handed to predictors.

mod feature;
mod schema;

pub use feature::{FeatureRow, FeatureValue};
pub use schema::FeatureSchema;
