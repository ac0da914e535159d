//! Wire-level forecast request and its validated form.

use serde::Deserialize;

/// A numeric field as clients actually send it: a JSON number or a string
/// holding one. Interpretation happens during validation so a bad value can
/// be reported against its field name instead of failing body deserialization
/// wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Interpret as a finite float, or describe why it cannot be.
    pub fn as_finite(&self) -> Result<f64, String> {
        let value = match self {
            RawNumber::Number(value) => *value,
            RawNumber::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", text))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{value} is not a finite number"))
        }
    }

    /// Interpret as an integer, or describe why it cannot be.
    pub fn as_integer(&self) -> Result<i64, String> {
        match self {
            RawNumber::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    Ok(*value as i64)
                } else {
                    Err(format!("{value} is not an integer"))
                }
            }
            RawNumber::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer", text)),
        }
    }
}

/// Raw forecast request as received on the wire, before validation.
///
/// Field aliases accept both payload spellings that have been in production:
/// `commodity`/`product_name`, `target_month`/`month`, `target_year`/`year`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastRequest {
    #[serde(default, alias = "product_name")]
    pub commodity: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, alias = "month")]
    pub target_month: Option<RawNumber>,
    #[serde(default, alias = "year")]
    pub target_year: Option<RawNumber>,
    #[serde(default)]
    pub price_lag1: Option<RawNumber>,
    #[serde(default)]
    pub price_lag2: Option<RawNumber>,
    #[serde(default)]
    pub price_rolling_avg: Option<RawNumber>,
}

/// A request that passed validation: mandatory fields present, bounds
/// checked, numerics finite, market defaulted. Immutable from here on.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForecast {
    pub commodity: String,
    pub market: String,
    pub county: Option<String>,
    pub target_month: u32,
    pub target_year: i32,
    pub price_lag1: Option<f64>,
    pub price_lag2: Option<f64>,
    pub price_rolling_avg: Option<f64>,
}
