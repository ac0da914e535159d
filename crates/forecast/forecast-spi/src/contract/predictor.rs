//! Price predictor trait definition.

use crate::error::Result;
use crate::model::{FeatureRow, FeatureSchema};

/// Trait for externally-trained models that map one tabular feature row to a
/// scalar price estimate.
///
/// Implementations are loaded once at process start and shared read-only
/// across concurrent requests, so the trait requires `Send + Sync` and takes
/// `&self` everywhere.
///
/// # Example
///
/// ```rust,ignore
/// use forecast_spi::{FeatureRow, PricePredictor};
///
/// fn score<P: PricePredictor>(predictor: &P, row: &FeatureRow) -> forecast_spi::Result<f64> {
///     predictor.predict(row)
/// }
/// ```
pub trait PricePredictor: Send + Sync {
    /// The column set this model was trained on.
    ///
    /// Callers must hand [`predict`](Self::predict) a row whose columns match
    /// this schema exactly; the model is schema-sensitive and a mismatch is an
    /// error, never a silent garbage prediction.
    fn schema(&self) -> &FeatureSchema;

    /// Score a single feature row, returning the predicted monthly wholesale
    /// price.
    fn predict(&self, row: &FeatureRow) -> Result<f64>;
}
