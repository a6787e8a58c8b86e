use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdServiceError {
    #[error("missing required configuration: {0} must be set")]
    MissingConfig(&'static str),

    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("ad catalog is empty: at least one (category, ad) pair is required")]
    EmptyCatalog,

    #[error("resource exhausted: {flag} fail feature flag enabled")]
    ResourceExhausted { flag: String },

    #[error("failed to set up metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("feature flag service error: {0}")]
    FlagService(#[from] FlagError),
}

impl AdServiceError {
    /// Startup-only errors; the process must not start when one occurs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AdServiceError::MissingConfig(_)
                | AdServiceError::InvalidConfig { .. }
                | AdServiceError::EmptyCatalog
                | AdServiceError::Metrics(_)
        )
    }
}

/// Failures talking to the feature flag service.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("flag service returned HTTP {status} for flag '{flag}'")]
    Status { flag: String, status: u16 },

    #[error("malformed flag service response for '{flag}': {source}")]
    Decode {
        flag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("flag service unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, AdServiceError>;
