use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Ad
// ---------------------------------------------------------------------------

/// A single advertisement: where it links to and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub redirect_url: String,
    pub text: String,
}

impl Ad {
    pub fn new(redirect_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRequest {
    #[serde(default)]
    pub context_keys: Vec<String>,
}

impl AdRequest {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context_keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdResponse {
    pub ads: Vec<Ad>,
}

// ---------------------------------------------------------------------------
// Classification labels
// ---------------------------------------------------------------------------

/// Whether the caller supplied any context keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Targeted,
    NotTargeted,
}

impl RequestType {
    pub fn all() -> &'static [RequestType] {
        &[RequestType::Targeted, RequestType::NotTargeted]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Targeted => "TARGETED",
            RequestType::NotTargeted => "NOT_TARGETED",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the returned ads were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    Targeted,
    Random,
}

impl ResponseType {
    pub fn all() -> &'static [ResponseType] {
        &[ResponseType::Targeted, ResponseType::Random]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Targeted => "TARGETED",
            ResponseType::Random => "RANDOM",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
