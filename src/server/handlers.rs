// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{ProxyError, Result};
use crate::metrics;
use crate::models::recommend::{Mode, RecommendRequest, RecommendResponse};
use crate::translation::build_payload;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check credential
    let key_check = if state.generator.is_configured() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "API key not configured".to_string(),
        }
    };
    checks.insert("api_key".to_string(), key_check);

    // Check model chain
    let models = state.dispatcher.models();
    let models_check = if models.is_empty() {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "No candidate models configured".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: models.join(" -> "),
        }
    };
    checks.insert("models".to_string(), models_check);

    // Check configuration
    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("API base: {}", state.config.gemini.api_base_url),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for /api/recommend.
///
/// `OPTIONS` answers 200 with no body, `POST` runs the fallback chain and
/// every other method is refused.
pub async fn recommend_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return ProxyError::MethodNotAllowed.into_response();
    }

    let started = Instant::now();
    let mut mode = None;
    let response = match recommend(&state, &body, &mut mode).await {
        Ok(result) => Json(RecommendResponse { result }).into_response(),
        Err(e) => e.into_response(),
    };

    let mode_label = mode.map(|m| m.as_str()).unwrap_or("unknown");
    metrics::record_request(
        mode_label,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}

async fn recommend(state: &AppState, body: &[u8], mode: &mut Option<Mode>) -> Result<String> {
    // Refuse before touching the body or the network
    if !state.generator.is_configured() {
        error!("Rejecting request: API key not configured");
        return Err(ProxyError::NotConfigured);
    }

    let req: RecommendRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(
            "Raw body (first 500 bytes): {}",
            String::from_utf8_lossy(&body[..body.len().min(500)])
        );
        ProxyError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;

    *mode = Some(req.mode);
    info!(
        "Received recommend request: mode={}, messages={}",
        req.mode.as_str(),
        req.messages.as_ref().map_or(0, Vec::len)
    );

    let payload = build_payload(req, state.config.gemini.max_image_bytes)?;

    let dispatched = state
        .dispatcher
        .dispatch(state.generator.as_ref(), &payload)
        .await?;

    debug!(
        "Served by {} on attempt {}",
        dispatched.model,
        dispatched.attempt + 1
    );

    Ok(dispatched.text)
}
