//! HTTP handlers

pub mod forecast;
pub mod health;
pub mod model;

pub use forecast::{air_quality, predict_rain};
pub use health::health_check;
pub use model::model_info;
