//! The prediction service: validate, assemble, score, wrap.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use forecast_spi::{PricePredictor, Result};

use crate::request::{ForecastRequest, ValidForecast};
use crate::validation::validate;

/// Successful prediction, echoing the request fields clients correlate on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub predicted_monthly_wholesale_price: f64,
    pub commodity: String,
    pub market: String,
    pub target_month: u32,
    pub target_year: i32,
}

/// Stateless prediction front end over an injected predictor.
///
/// The predictor handle is shared and read-only; the service itself holds no
/// mutable state, so one instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct PredictionService {
    predictor: Arc<dyn PricePredictor>,
}

impl PredictionService {
    /// Create a service around a loaded predictor.
    pub fn new(predictor: Arc<dyn PricePredictor>) -> Self {
        Self { predictor }
    }

    /// Validate a raw request and score it.
    ///
    /// The year window is anchored to the year at call time, so a request
    /// that was valid yesterday can be stale today.
    pub fn predict(&self, request: &ForecastRequest) -> Result<Forecast> {
        self.predict_at(request, Utc::now().year())
    }

    /// [`predict`](Self::predict) with a pinned reference year.
    pub fn predict_at(&self, request: &ForecastRequest, current_year: i32) -> Result<Forecast> {
        let valid = validate(request, current_year)?;
        let row = valid.to_feature_row();
        let price = self.predictor.predict(&row)?;
        debug!(
            commodity = %valid.commodity,
            market = %valid.market,
            month = valid.target_month,
            year = valid.target_year,
            price,
            "scored forecast request"
        );
        if price < 0.0 {
            // Wholesale prices are non-negative; a negative score means the
            // model is extrapolating badly. Surface it in logs, return as-is.
            warn!(price, commodity = %valid.commodity, "model predicted a negative price");
        }
        Ok(Self::wrap(price, &valid))
    }

    fn wrap(price: f64, valid: &ValidForecast) -> Forecast {
        Forecast {
            predicted_monthly_wholesale_price: price,
            commodity: valid.commodity.clone(),
            market: valid.market.clone(),
            target_month: valid.target_month,
            target_year: valid.target_year,
        }
    }
}
