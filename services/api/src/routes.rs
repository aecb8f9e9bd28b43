use crate::infra::{AppState, EngineSettings};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use civic_priority::engine::{
    RecommendationResult, Recommender, ServiceRecord, UserProfile, Weights,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) user: UserProfile,
    pub(crate) services: Vec<ServiceRecord>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
}

/// Router builder exposing the engine plus health and diagnostics routes.
pub(crate) fn api_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/recommendations",
            post(recommendations_endpoint),
        )
        .route("/api/v1/weights", get(weights_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn recommendations_endpoint(
    Extension(settings): Extension<EngineSettings>,
    Json(payload): Json<RecommendationRequest>,
) -> Response {
    let top_n = payload.top_n.unwrap_or(settings.default_top_n);
    if top_n == 0 {
        let body = json!({ "error": "top_n must be at least 1" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let recommender = Recommender::new(Local::now().date_naive());
    let result: RecommendationResult =
        recommender.recommend(&payload.user, &payload.services, top_n);

    (StatusCode::OK, Json(result)).into_response()
}

/// Read-only view of the fixed scoring weights for diagnostics tooling.
pub(crate) async fn weights_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "weights": Weights::standard(),
        "description": {
            "urgency": "Time sensitivity - how soon does the service expire?",
            "seasonality": "Calendar-driven demand patterns",
            "importance": "Service category criticality",
            "activity": "User engagement level",
        },
    }))
}
