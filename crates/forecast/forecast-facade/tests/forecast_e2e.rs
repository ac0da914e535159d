//! End-to-end tests: artifact file on disk through `LinearModel` to a served
//! forecast.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use forecast_facade::{
    ForecastError, ForecastRequest, LinearModel, PredictionService, PricePredictor,
    CANONICAL_COLUMNS,
};

const YEAR: i32 = 2026;

fn artifact_json() -> String {
    r#"{
        "name": "monthly-wholesale-price",
        "version": "2",
        "schema": [
            "commodity", "market", "county", "month", "year",
            "price_lag1", "price_lag2", "price_rolling_avg"
        ],
        "intercept": 12.0,
        "columns": {
            "commodity": {
                "kind": "category",
                "weights": { "maize": 4.0, "beans": 9.0 },
                "fallback": 5.0
            },
            "market": {
                "kind": "category",
                "weights": { "bungoma-town": 1.5 },
                "fallback": 1.0
            },
            "county": { "kind": "category", "weights": {}, "fallback": 0.0 },
            "month": { "kind": "numeric", "coefficient": 0.25, "mean": 6.5 },
            "year": { "kind": "numeric", "coefficient": 0.0, "mean": 2026.0 },
            "price_lag1": { "kind": "numeric", "coefficient": 0.5, "mean": 40.0 },
            "price_lag2": { "kind": "numeric", "coefficient": 0.0, "mean": 40.0 },
            "price_rolling_avg": { "kind": "numeric", "coefficient": 0.0, "mean": 40.0 }
        }
    }"#
    .to_string()
}

fn write_artifact(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("forecast-facade-e2e");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_and_serve_from_artifact_file() {
    let path = write_artifact("model.json", &artifact_json());
    let model = LinearModel::from_path(&path).unwrap();
    assert_eq!(model.name(), "monthly-wholesale-price");
    assert_eq!(model.version(), "2");
    assert_eq!(model.schema().describe(), CANONICAL_COLUMNS.join(", "));

    let service = PredictionService::new(Arc::new(model));
    let request: ForecastRequest = serde_json::from_str(
        r#"{"commodity": "maize", "market": "bungoma-town", "target_month": 6, "target_year": 2027, "price_lag1": 42.0}"#,
    )
    .unwrap();

    let forecast = service.predict_at(&request, YEAR).unwrap();
    // 12 + maize 4 + market 1.5 + county 0 + month 0.25*6 + year 0
    // + lag1 0.5*42 + lag2 mean 0 + avg mean 0
    let expected = 12.0 + 4.0 + 1.5 + 1.5 + 21.0;
    assert!((forecast.predicted_monthly_wholesale_price - expected).abs() < 1e-9);
    assert_eq!(forecast.commodity, "maize");

    fs::remove_file(path).ok();
}

#[test]
fn test_missing_lags_score_with_training_means() {
    let path = write_artifact("model_means.json", &artifact_json());
    let service = PredictionService::new(Arc::new(LinearModel::from_path(&path).unwrap()));

    let bare: ForecastRequest = serde_json::from_str(
        r#"{"commodity": "maize", "market": "bungoma-town", "target_month": 6, "target_year": 2027}"#,
    )
    .unwrap();
    let at_mean: ForecastRequest = serde_json::from_str(
        r#"{"commodity": "maize", "market": "bungoma-town", "target_month": 6, "target_year": 2027, "price_lag1": 40.0}"#,
    )
    .unwrap();

    let bare_price = service
        .predict_at(&bare, YEAR)
        .unwrap()
        .predicted_monthly_wholesale_price;
    let mean_price = service
        .predict_at(&at_mean, YEAR)
        .unwrap()
        .predicted_monthly_wholesale_price;
    assert!((bare_price - mean_price).abs() < 1e-9);

    fs::remove_file(path).ok();
}

#[test]
fn test_foreign_artifact_schema_rejected_at_load() {
    let foreign = r#"{
        "name": "other-model",
        "version": "1",
        "schema": ["commodity", "month"],
        "intercept": 0.0,
        "columns": {
            "commodity": { "kind": "category", "weights": {} },
            "month": { "kind": "numeric", "coefficient": 1.0 }
        }
    }"#;
    let path = write_artifact("foreign.json", foreign);

    let error = LinearModel::from_path(&path).unwrap_err();
    assert!(matches!(error, ForecastError::SchemaMismatch { .. }));

    fs::remove_file(path).ok();
}

#[test]
fn test_unreadable_artifact_is_classified() {
    let error = LinearModel::from_path("/nonexistent/forecast-model.json").unwrap_err();
    assert!(matches!(error, ForecastError::Artifact(_)));
}
