use adservice_core::{AdRequest, AdResponse};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// POST /oteldemo.AdService/GetAds (alias: POST /api/ads) — select ads.
///
/// Body is `{"contextKeys": [...]}`. An empty body is the empty request, the
/// same as an empty protobuf message.
pub async fn get_ads(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<AdResponse>, AppError> {
    let request = parse_request(&body)?;
    let response = app.service.get_ads(request).await?;
    Ok(Json(response))
}

fn parse_request(body: &[u8]) -> Result<AdRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AdRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(format!("invalid AdRequest body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_untargeted_request() {
        assert_eq!(parse_request(b"").unwrap(), AdRequest::default());
        assert_eq!(parse_request(b" \n").unwrap(), AdRequest::default());
    }

    #[test]
    fn body_with_keys_is_parsed() {
        let req = parse_request(br#"{"contextKeys": ["binoculars"]}"#).unwrap();
        assert_eq!(req, AdRequest::new(["binoculars"]));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(parse_request(br#"{"contextKeys": "binoculars"}"#).is_err());
        assert!(parse_request(b"[").is_err());
    }
}
