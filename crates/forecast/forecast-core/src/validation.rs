//! Forecast request validation.
//!
//! Fail-fast: the first invalid field is reported and processing stops. The
//! year window is anchored to `current_year`, which callers take from the
//! clock at request time so the accepted range advances day-to-day.

use forecast_spi::{ForecastError, Result};

use crate::request::{ForecastRequest, RawNumber, ValidForecast};

/// Market used when the request does not name one.
pub const DEFAULT_MARKET: &str = "bungoma-town";

/// How far past `current_year` a forecast may target.
pub const YEAR_WINDOW: i32 = 5;

fn required_text(value: Option<&String>, field: &'static str) -> Result<String> {
    match value.map(|text| text.trim()) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ForecastError::MissingField { field }),
    }
}

fn optional_text(value: Option<&String>) -> Option<String> {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn optional_finite(value: Option<&RawNumber>, field: &'static str) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .as_finite()
            .map(Some)
            .map_err(|reason| ForecastError::InvalidFeature { field, reason }),
    }
}

/// Validate a raw request against the canonical policy.
///
/// `current_year` is the reference point for the accepted year window
/// `[current_year, current_year + YEAR_WINDOW]`; production callers pass the
/// year at request time, tests pin it.
pub fn validate(request: &ForecastRequest, current_year: i32) -> Result<ValidForecast> {
    let commodity = required_text(request.commodity.as_ref(), "commodity")?;

    let target_month = request
        .target_month
        .as_ref()
        .ok_or(ForecastError::MissingField {
            field: "target_month",
        })?
        .as_integer()
        .map_err(|reason| ForecastError::InvalidFeature {
            field: "target_month",
            reason,
        })?;
    if !(1..=12).contains(&target_month) {
        return Err(ForecastError::FieldOutOfRange {
            field: "target_month",
            reason: "must be between 1 and 12".to_string(),
        });
    }

    let target_year = request
        .target_year
        .as_ref()
        .ok_or(ForecastError::MissingField {
            field: "target_year",
        })?
        .as_integer()
        .map_err(|reason| ForecastError::InvalidFeature {
            field: "target_year",
            reason,
        })?;
    let max_year = i64::from(current_year) + i64::from(YEAR_WINDOW);
    if target_year < i64::from(current_year) || target_year > max_year {
        return Err(ForecastError::FieldOutOfRange {
            field: "target_year",
            reason: format!("must be between {current_year} and {max_year}"),
        });
    }

    let market = optional_text(request.market.as_ref()).unwrap_or_else(|| DEFAULT_MARKET.to_string());
    let county = optional_text(request.county.as_ref());

    let price_lag1 = optional_finite(request.price_lag1.as_ref(), "price_lag1")?;
    let price_lag2 = optional_finite(request.price_lag2.as_ref(), "price_lag2")?;
    let price_rolling_avg =
        optional_finite(request.price_rolling_avg.as_ref(), "price_rolling_avg")?;

    Ok(ValidForecast {
        commodity,
        market,
        county,
        target_month: target_month as u32,
        target_year: target_year as i32,
        price_lag1,
        price_lag2,
        price_rolling_avg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn base_request() -> ForecastRequest {
        ForecastRequest {
            commodity: Some("maize".to_string()),
            market: Some("bungoma-town".to_string()),
            county: None,
            target_month: Some(RawNumber::Number(6.0)),
            target_year: Some(RawNumber::Number(2027.0)),
            price_lag1: None,
            price_lag2: None,
            price_rolling_avg: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let valid = validate(&base_request(), YEAR).unwrap();
        assert_eq!(valid.commodity, "maize");
        assert_eq!(valid.market, "bungoma-town");
        assert_eq!(valid.target_month, 6);
        assert_eq!(valid.target_year, 2027);
        assert_eq!(valid.price_lag1, None);
    }

    #[test]
    fn test_missing_commodity_names_field() {
        let mut request = base_request();
        request.commodity = None;

        let error = validate(&request, YEAR).unwrap_err();
        assert_eq!(error.to_string(), "Missing required field 'commodity'");
    }

    #[test]
    fn test_blank_commodity_is_missing() {
        let mut request = base_request();
        request.commodity = Some("   ".to_string());

        let error = validate(&request, YEAR).unwrap_err();
        assert!(matches!(
            error,
            ForecastError::MissingField { field: "commodity" }
        ));
    }

    #[test]
    fn test_missing_month_names_field() {
        let mut request = base_request();
        request.target_month = None;

        let error = validate(&request, YEAR).unwrap_err();
        assert!(matches!(
            error,
            ForecastError::MissingField {
                field: "target_month"
            }
        ));
    }

    #[test]
    fn test_missing_year_names_field() {
        let mut request = base_request();
        request.target_year = None;

        let error = validate(&request, YEAR).unwrap_err();
        assert!(matches!(
            error,
            ForecastError::MissingField {
                field: "target_year"
            }
        ));
    }

    #[test]
    fn test_month_bounds() {
        for month in [0, 13, -1, 100] {
            let mut request = base_request();
            request.target_month = Some(RawNumber::Number(month as f64));

            let error = validate(&request, YEAR).unwrap_err();
            assert_eq!(
                error.to_string(),
                "Field 'target_month' out of range: must be between 1 and 12",
                "month {month} should be rejected"
            );
        }
        for month in 1..=12 {
            let mut request = base_request();
            request.target_month = Some(RawNumber::Number(month as f64));
            assert!(
                validate(&request, YEAR).is_ok(),
                "month {month} should pass"
            );
        }
    }

    #[test]
    fn test_year_window_is_relative_to_current_year() {
        for year in [YEAR - 1, YEAR + YEAR_WINDOW + 1, 2000, 2100] {
            let mut request = base_request();
            request.target_year = Some(RawNumber::Number(year as f64));

            let error = validate(&request, YEAR).unwrap_err();
            assert_eq!(
                error.to_string(),
                "Field 'target_year' out of range: must be between 2026 and 2031",
                "year {year} should be rejected"
            );
        }
        for year in YEAR..=YEAR + YEAR_WINDOW {
            let mut request = base_request();
            request.target_year = Some(RawNumber::Number(year as f64));
            assert!(validate(&request, YEAR).is_ok(), "year {year} should pass");
        }
    }

    #[test]
    fn test_year_window_advances_with_reference_year() {
        let mut request = base_request();
        request.target_year = Some(RawNumber::Number(2027.0));

        assert!(validate(&request, 2026).is_ok());
        // Same request is stale two years later.
        let error = validate(&request, 2028).unwrap_err();
        assert!(error.to_string().contains("between 2028 and 2033"));
    }

    #[test]
    fn test_absent_market_gets_default() {
        let mut request = base_request();
        request.market = None;

        let valid = validate(&request, YEAR).unwrap();
        assert_eq!(valid.market, DEFAULT_MARKET);
    }

    #[test]
    fn test_county_is_optional() {
        let valid = validate(&base_request(), YEAR).unwrap();
        assert_eq!(valid.county, None);

        let mut request = base_request();
        request.county = Some("bungoma".to_string());
        let valid = validate(&request, YEAR).unwrap();
        assert_eq!(valid.county.as_deref(), Some("bungoma"));
    }

    #[test]
    fn test_non_numeric_lag_names_field() {
        let mut request = base_request();
        request.price_lag1 = Some(RawNumber::Text("abc".to_string()));

        let error = validate(&request, YEAR).unwrap_err();
        let msg = error.to_string();
        assert!(msg.contains("price_lag1"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_non_finite_rolling_avg_rejected() {
        let mut request = base_request();
        request.price_rolling_avg = Some(RawNumber::Number(f64::NAN));

        let error = validate(&request, YEAR).unwrap_err();
        assert!(matches!(
            error,
            ForecastError::InvalidFeature {
                field: "price_rolling_avg",
                ..
            }
        ));
    }

    #[test]
    fn test_string_numerics_accepted() {
        let mut request = base_request();
        request.target_month = Some(RawNumber::Text("6".to_string()));
        request.target_year = Some(RawNumber::Text("2027".to_string()));
        request.price_lag2 = Some(RawNumber::Text("39.5".to_string()));

        let valid = validate(&request, YEAR).unwrap();
        assert_eq!(valid.target_month, 6);
        assert_eq!(valid.target_year, 2027);
        assert_eq!(valid.price_lag2, Some(39.5));
    }

    #[test]
    fn test_fail_fast_reports_first_invalid_field() {
        // Both month and year are bad; month is checked first.
        let mut request = base_request();
        request.target_month = Some(RawNumber::Number(0.0));
        request.target_year = Some(RawNumber::Number(1990.0));

        let error = validate(&request, YEAR).unwrap_err();
        assert!(error.to_string().contains("target_month"));
    }
}
