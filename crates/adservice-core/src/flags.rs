//! Client side of the feature flag service.
//!
//! The service is reached over HTTP/JSON:
//!
//! ```text
//! POST {addr}/oteldemo.FeatureFlagService/GetFlag
//! {"name": "adServiceFailure"}
//!
//! 200 OK
//! {"flag": {"name": "adServiceFailure", "enabled": true}}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FlagError;

pub const GET_FLAG_PATH: &str = "/oteldemo.FeatureFlagService/GetFlag";

/// Looks up a boolean feature flag by name.
#[async_trait]
pub trait FlagClient: Send + Sync {
    async fn get_flag(&self, name: &str) -> Result<bool, FlagError>;
}

#[derive(Debug, Serialize)]
struct GetFlagRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GetFlagResponse {
    flag: Flag,
}

#[derive(Debug, Deserialize)]
struct Flag {
    #[serde(default)]
    enabled: bool,
}

/// [`FlagClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFlagClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpFlagClient {
    /// `addr` may be `host:port` or a full URL; a bare address gets `http://`.
    pub fn new(addr: &str, timeout: Duration) -> Result<Self, FlagError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FlagError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint_for(addr),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(addr: &str) -> String {
    let base = addr.trim().trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{base}{GET_FLAG_PATH}")
    } else {
        format!("http://{base}{GET_FLAG_PATH}")
    }
}

#[async_trait]
impl FlagClient for HttpFlagClient {
    async fn get_flag(&self, name: &str) -> Result<bool, FlagError> {
        tracing::debug!(flag = name, endpoint = %self.endpoint, "fetching feature flag");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GetFlagRequest { name })
            .send()
            .await
            .map_err(|source| FlagError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlagError::Status {
                flag: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FlagError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;
        let parsed: GetFlagResponse =
            serde_json::from_slice(&body).map_err(|source| FlagError::Decode {
                flag: name.to_string(),
                source,
            })?;

        Ok(parsed.flag.enabled)
    }
}
