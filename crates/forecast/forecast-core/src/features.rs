//! Canonical feature-row assembly.
//!
//! The predictor is schema-sensitive: the row handed to it must use exactly
//! the column names and order it was trained with. That column set is pinned
//! here, and artifacts are checked against it at load time.

use forecast_spi::{FeatureRow, FeatureSchema, FeatureValue};

use crate::request::ValidForecast;

/// The column set every shipped model is trained on, in scoring order.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "commodity",
    "market",
    "county",
    "month",
    "year",
    "price_lag1",
    "price_lag2",
    "price_rolling_avg",
];

/// The canonical columns as a schema value.
pub fn canonical_schema() -> FeatureSchema {
    FeatureSchema::from_names(&CANONICAL_COLUMNS)
}

fn optional_number(value: Option<f64>) -> FeatureValue {
    match value {
        Some(number) => FeatureValue::Number(number),
        None => FeatureValue::Missing,
    }
}

impl ValidForecast {
    /// Assemble the single tabular record the predictor scores.
    ///
    /// Absent optional features become [`FeatureValue::Missing`]; nothing is
    /// fabricated on the request's behalf.
    pub fn to_feature_row(&self) -> FeatureRow {
        let mut row = FeatureRow::new();
        row.push("commodity", FeatureValue::text(self.commodity.clone()));
        row.push("market", FeatureValue::text(self.market.clone()));
        row.push(
            "county",
            match &self.county {
                Some(county) => FeatureValue::text(county.clone()),
                None => FeatureValue::Missing,
            },
        );
        row.push("month", FeatureValue::Number(f64::from(self.target_month)));
        row.push("year", FeatureValue::Number(f64::from(self.target_year)));
        row.push("price_lag1", optional_number(self.price_lag1));
        row.push("price_lag2", optional_number(self.price_lag2));
        row.push("price_rolling_avg", optional_number(self.price_rolling_avg));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_forecast() -> ValidForecast {
        ValidForecast {
            commodity: "maize".to_string(),
            market: "bungoma-town".to_string(),
            county: None,
            target_month: 6,
            target_year: 2027,
            price_lag1: Some(41.0),
            price_lag2: None,
            price_rolling_avg: None,
        }
    }

    #[test]
    fn test_row_matches_canonical_schema() {
        let row = valid_forecast().to_feature_row();
        assert!(canonical_schema().check_row(&row).is_ok());
    }

    #[test]
    fn test_row_column_order_is_stable() {
        let row = valid_forecast().to_feature_row();
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, CANONICAL_COLUMNS);
    }

    #[test]
    fn test_absent_optionals_stay_missing() {
        let row = valid_forecast().to_feature_row();
        assert!(row.get("county").unwrap().is_missing());
        assert!(row.get("price_lag2").unwrap().is_missing());
        assert!(row.get("price_rolling_avg").unwrap().is_missing());
        // Present optional comes through untouched.
        assert_eq!(row.get("price_lag1"), Some(&FeatureValue::Number(41.0)));
    }

    #[test]
    fn test_month_and_year_are_numeric_columns() {
        let row = valid_forecast().to_feature_row();
        assert_eq!(row.get("month"), Some(&FeatureValue::Number(6.0)));
        assert_eq!(row.get("year"), Some(&FeatureValue::Number(2027.0)));
    }

    #[test]
    fn test_county_text_when_present() {
        let mut forecast = valid_forecast();
        forecast.county = Some("bungoma".to_string());
        let row = forecast.to_feature_row();
        assert_eq!(row.get("county"), Some(&FeatureValue::text("bungoma")));
    }
}
