use adservice_core::error::AdServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

// ---------------------------------------------------------------------------
// Internal sentinel for malformed request bodies
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain without touching the `AdServiceError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// The body is `{"error": <message>, "code": <status name>}` where the code
/// mirrors the RPC status the caller would have seen over gRPC.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        if self.0.downcast_ref::<BadRequestError>().is_some() {
            return (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT");
        }
        match self.0.downcast_ref::<AdServiceError>() {
            Some(AdServiceError::ResourceExhausted { .. }) => {
                (StatusCode::TOO_MANY_REQUESTS, "RESOURCE_EXHAUSTED")
            }
            Some(AdServiceError::FlagService(_)) => (StatusCode::BAD_GATEWAY, "UNAVAILABLE"),
            Some(
                AdServiceError::MissingConfig(_)
                | AdServiceError::InvalidConfig { .. }
                | AdServiceError::EmptyCatalog
                | AdServiceError::Metrics(_),
            )
            | None => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = serde_json::json!({ "error": self.0.to_string(), "code": code });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
