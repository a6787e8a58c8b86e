use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::state::AppState;

/// GET /metrics — request counter in Prometheus text format.
pub async fn metrics(State(app): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = app.service.counter().render_prometheus()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
