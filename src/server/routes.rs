// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{health_handler, metrics_handler, recommend_handler};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::gemini::{ContentGenerator, FallbackDispatcher};
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generator: Arc<dyn ContentGenerator>,
    pub dispatcher: Arc<FallbackDispatcher>,
}

pub fn create_router(config: AppConfig, generator: Arc<dyn ContentGenerator>) -> Router {
    let dispatcher = FallbackDispatcher::from_config(&config.gemini);
    let body_limit = config.server.max_body_bytes;

    let state = AppState {
        config: Arc::new(config),
        generator,
        dispatcher: Arc::new(dispatcher),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Method gating happens in the handler so every method gets a JSON answer
        .route("/api/recommend", any(recommend_handler))
        // Photo requests inline the image as base64; axum's 2 MB extractor cap is replaced
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
