//! Volume Routes
//!
//! - GET /api/v1/volumes - Current inventory as JSON

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::VolumeListResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/volumes
///
/// Fetches the inventory once and returns the records in response order.
/// Failures are reported as 502 rather than an empty list.
pub async fn list_volumes(State(state): State<Arc<AppState>>) -> ApiResult<Json<VolumeListResponse>> {
    let volumes = state.pipeline.fetch().await?;

    Ok(Json(VolumeListResponse {
        count: volumes.len(),
        volumes,
    }))
}
