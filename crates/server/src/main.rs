//! # soko-server
//!
//! REST API server for commodity price forecasting. Loads a serialized price
//! model once at startup and serves predictions over a single POST endpoint,
//! with Kubernetes-compatible health probes.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;

use config::{CorsOrigins, ServerConfig};
use forecast_facade::{LinearModel, PredictionService};

/// Application state shared across handlers.
///
/// `service` is `None` when the model artifact failed to load: the server
/// runs degraded, reports it through readiness, and classifies every
/// prediction as unavailable instead of crashing or returning nulls.
#[derive(Clone)]
pub struct AppState {
    pub service: Option<PredictionService>,
    pub predict_timeout: Duration,
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - can the server actually serve forecasts?
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let model_loaded = state.service.is_some();
    let status = if model_loaded {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "status": if model_loaded { "ready" } else { "degraded" },
            "model_loaded": model_loaded,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => {
            let parsed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(parsed))
        }
    }
}

/// Build the router with middleware around the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        // Legacy health endpoint
        .route("/health", get(liveness))
        // API endpoints
        .route("/api/v1/forecast", post(routes::forecast))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid configuration");
            std::process::exit(1);
        }
    };

    let service = match LinearModel::from_path(&config.model_path) {
        Ok(model) => {
            tracing::info!(
                name = model.name(),
                version = model.version(),
                path = %config.model_path.display(),
                "model loaded"
            );
            Some(PredictionService::new(Arc::new(model)))
        }
        Err(error) => {
            tracing::error!(
                %error,
                path = %config.model_path.display(),
                "failed to load model, serving degraded"
            );
            None
        }
    };

    let state = AppState {
        service,
        predict_timeout: config.predict_timeout,
    };

    let app = build_router(state).layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(error) => {
            tracing::error!(%error, "invalid HOST:PORT configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "soko-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, %addr, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(error) = axum::serve(listener, app).await {
        tracing::error!(%error, "server exited");
        std::process::exit(1);
    }
}
