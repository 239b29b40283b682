//! Model description handler

use axum::{extract::State, Json};
use shared::ModelInfo;

use crate::AppState;

/// Describe the active scoring model
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(ModelInfo::from_weights(state.scorer.weights()))
}
