//! Chart Routes
//!
//! - GET /api/v1/charts - Chart.js configuration for the usage doughnuts

use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::api::state::AppState;

/// GET /api/v1/charts
pub async fn chart_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.charts.to_json())
}
