use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        .route("/api/platforms", get(handlers::isis::list_platforms))
        // Synthesis routes
        .route("/api/isis/instances/synthesize", post(handlers::isis::synthesize_instance))
        .route("/api/isis/interfaces/synthesize", post(handlers::isis::synthesize_interface))
        // Render routes
        .route("/api/isis/instances/render", post(handlers::isis::render_instance))
        .route("/api/isis/interfaces/render", post(handlers::isis::render_interface))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::secrets::SecretStore;

    fn app() -> Router {
        build(Arc::new(AppState {
            config: Config::default(),
            secrets: SecretStore::new(),
            renderer: None,
        }))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "isis-synth");
    }

    #[tokio::test]
    async fn test_platforms() {
        let response = app()
            .oneshot(Request::get("/api/platforms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Vec<String> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, vec!["vendor-a", "vendor-b", "vendor-c"]);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app()
            .oneshot(Request::get("/api/devices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
