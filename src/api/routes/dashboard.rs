//! Dashboard Page Route
//!
//! - GET / - The dashboard page with one volume card per inventory record
//!
//! Every page load gets a fresh document and exactly one pipeline run, so
//! reloading never duplicates cards.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dom::Document;
use crate::inventory::ErrorKind;
use crate::pipeline::PipelineError;
use crate::render::DashboardPage;

/// GET /
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let container_id = state.pipeline.container_id();
    let mut doc = Document::with_container(container_id);

    let notice = match state.pipeline.run(&mut doc).await {
        Ok(report) => {
            tracing::debug!(volumes = report.appended, "Dashboard page rendered");
            None
        }
        Err(e) => Some(empty_state_message(&e)),
    };

    let html = DashboardPage::new(&state.charts)
        .title(&state.config.title)
        .container_id(container_id)
        .notice(notice)
        .render(&doc);

    Html(html)
}

/// Message shown in place of the volume list when the pipeline fails
pub fn empty_state_message(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Inventory(e) => match e.kind() {
            ErrorKind::Network => "The volume inventory could not be reached. No volumes to show.",
            ErrorKind::Parse => "The volume inventory returned an unreadable response. No volumes to show.",
        },
        PipelineError::Dom(_) => "The volume list could not be displayed.",
    }
}
