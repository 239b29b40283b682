//! Raincast - Backend Server
//!
//! Serves rain predictions and air quality conversions computed from
//! WeatherAPI.com forecasts.

use axum::{routing::get, Router};
use shared::{RainScorer, ScoringWeights};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::AppResult;
use external::WeatherClient;
use services::ForecastService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forecast: ForecastService,
    pub scorer: RainScorer,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let scorer = RainScorer::new(ScoringWeights::DEFAULT);
        let client = WeatherClient::from_config(&config.weather)?;

        Ok(Self {
            forecast: ForecastService::new(client, scorer),
            scorer,
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raincast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Raincast Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Model: {}", shared::MODEL_TYPE);

    if !config.has_weather_api_key() {
        tracing::warn!("Weather API key not configured; forecast routes will return errors");
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    tracing::info!("JSON endpoint: http://{}/predict-rain?city=Chennai", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Raincast API v1.0\n\
     GET /predict-rain?city=<name> or ?lat=<lat>&lon=<lon>[&days=<1-14>]\n\
     GET /air-quality?city=<name> or ?lat=<lat>&lon=<lon>\n\
     GET /model-info\n\
     GET /health\n"
}
