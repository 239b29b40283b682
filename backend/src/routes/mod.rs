//! Route definitions for the Raincast server

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/model-info", get(handlers::model_info))
        .merge(forecast_routes())
}

/// Forecast routes backed by the weather API
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/predict-rain", get(handlers::predict_rain))
        .route("/air-quality", get(handlers::air_quality))
}
