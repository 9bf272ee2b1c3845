//! Dashboard HTTP Server
//!
//! Serves the storage dashboard page, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Usage charts and one detail card per volume
//!
//! ## Data
//! - `GET /api/v1/volumes` - Current inventory as JSON
//! - `GET /api/v1/charts` - Chart configuration
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status and uptime
//!
//! # Example
//!
//! ```rust,ignore
//! use polly_dashboard::api::{serve, ApiConfig, AppState};
//! use polly_dashboard::{Config, InventoryPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let pipeline = InventoryPipeline::from_config(&config)?;
//!     let api_config = ApiConfig::from_config(&config);
//!
//!     serve(AppState::new(pipeline, api_config.clone()), &api_config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/volumes", get(routes::volumes::list_volumes))
        .route("/charts", get(routes::charts::chart_config));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Polly dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Polly dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{
        parse_inventory, InventoryError, InventoryResult, InventorySource, VolumeRecord,
    };
    use crate::pipeline::InventoryPipeline;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    struct FixedSource(Option<&'static str>);

    #[async_trait]
    impl InventorySource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        async fn fetch(&self) -> InventoryResult<Vec<VolumeRecord>> {
            match self.0 {
                Some(body) => parse_inventory(body.as_bytes()),
                None => Err(InventoryError::Status { status: 503 }),
            }
        }
    }

    fn create_test_app(body: Option<&'static str>) -> Router {
        let pipeline = InventoryPipeline::new(Arc::new(FixedSource(body)));
        build_router(AppState::new(pipeline, ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get(create_test_app(Some("[]")), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get(create_test_app(Some("[]")), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["inventory"], "fixed");
    }

    #[tokio::test]
    async fn test_dashboard_page_renders_cards() {
        let app = create_test_app(Some(r#"[{"id":"v1","name":"Vol1"},{"id":"v2","name":"Vol2"}]"#));
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="volumeList""#));
        assert_eq!(body.matches(r#"<div class="col-xs-6 col-md-3">"#).count(), 2);
        assert!(body.find("<td> v1</td>").unwrap() < body.find("<td> v2</td>").unwrap());
        assert!(!body.contains("volumeListNotice"));
    }

    #[tokio::test]
    async fn test_dashboard_page_reload_does_not_duplicate() {
        let app = create_test_app(Some(r#"[{"id":"v1"}]"#));

        let (_, first) = get(app.clone(), "/").await;
        let (_, second) = get(app, "/").await;

        assert_eq!(first.matches("<td> v1</td>").count(), 1);
        assert_eq!(second.matches("<td> v1</td>").count(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_page_shows_empty_state_on_failure() {
        let (status, body) = get(create_test_app(None), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("volumeListNotice"));
        assert!(body.contains("could not be reached"));
    }

    #[tokio::test]
    async fn test_dashboard_page_uses_configured_title() {
        let mut config = crate::config::Config::default();
        config.api.title = "Lab Storage".to_string();

        let pipeline = InventoryPipeline::new(Arc::new(FixedSource(Some("[]"))));
        let app = build_router(AppState::new(pipeline, ApiConfig::from_config(&config)));

        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Lab Storage</title>"));
        assert!(!body.contains("Polly Storage Dashboard"));
    }

    #[tokio::test]
    async fn test_list_volumes() {
        let app = create_test_app(Some(r#"[{"id":"v1","size":100},{"id":"v2"}]"#));
        let (status, body) = get(app, "/api/v1/volumes").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["volumes"][0]["size"], 100);
        assert_eq!(json["volumes"][1]["id"], "v2");
    }

    #[tokio::test]
    async fn test_list_volumes_upstream_failure() {
        let (status, body) = get(create_test_app(None), "/api/v1/volumes").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "INVENTORY_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_chart_config() {
        let (status, body) = get(create_test_app(Some("[]")), "/api/v1/charts").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["charts"].as_object().unwrap().len(), 5);
    }
}
