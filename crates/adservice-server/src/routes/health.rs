use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::health::ServingStatus;
use crate::state::AppState;

/// GET /healthz — 200 while serving, 503 once shutdown has begun.
pub async fn health(State(app): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let status = app.health.status();
    let code = match status {
        ServingStatus::Serving => StatusCode::OK,
        ServingStatus::NotServing => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(serde_json::json!({ "status": status })))
}
