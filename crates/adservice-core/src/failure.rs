use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{AdServiceError, FlagError};
use crate::flags::FlagClient;
use crate::random::RandomSource;

/// Flag consulted before failing a request on purpose.
pub const FAILURE_FLAG: &str = "adServiceFailure";

/// The coin has this many faces; only [`TRIGGER_FACE`] leads to a flag lookup.
pub const COIN_FACES: usize = 10;
pub const TRIGGER_FACE: usize = 1;

// ---------------------------------------------------------------------------
// FlagErrorPolicy
// ---------------------------------------------------------------------------

/// What to do when the flag service itself cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlagErrorPolicy {
    /// Propagate the error and fail the request.
    #[default]
    Fail,
    /// Log it and carry on as if the flag were off.
    Disabled,
}

impl FlagErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FlagErrorPolicy::Fail => "fail",
            FlagErrorPolicy::Disabled => "disabled",
        }
    }
}

impl fmt::Display for FlagErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagErrorPolicy {
    type Err = AdServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(FlagErrorPolicy::Fail),
            "disabled" => Ok(FlagErrorPolicy::Disabled),
            other => Err(AdServiceError::InvalidConfig {
                key: "AD_SERVICE_FLAG_ERROR_POLICY",
                reason: format!("unknown policy '{other}' (expected 'fail' or 'disabled')"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// FailureInjector
// ---------------------------------------------------------------------------

/// Decides whether a request should be failed for chaos testing.
pub struct FailureInjector {
    flags: Arc<dyn FlagClient>,
    random: Arc<dyn RandomSource>,
    policy: FlagErrorPolicy,
}

impl FailureInjector {
    pub fn new(
        flags: Arc<dyn FlagClient>,
        random: Arc<dyn RandomSource>,
        policy: FlagErrorPolicy,
    ) -> Self {
        Self {
            flags,
            random,
            policy,
        }
    }

    pub fn policy(&self) -> FlagErrorPolicy {
        self.policy
    }

    /// Roughly one call in [`COIN_FACES`] asks the flag service; every other
    /// call answers `false` without any I/O. Nothing is cached or retried.
    pub async fn should_fail(&self) -> Result<bool, FlagError> {
        if self.random.below(COIN_FACES) != TRIGGER_FACE {
            return Ok(false);
        }

        match self.flags.get_flag(FAILURE_FLAG).await {
            Ok(enabled) => Ok(enabled),
            Err(e) => match self.policy {
                FlagErrorPolicy::Fail => Err(e),
                FlagErrorPolicy::Disabled => {
                    tracing::warn!(
                        flag = FAILURE_FLAG,
                        error = %e,
                        "flag lookup failed, treating flag as disabled"
                    );
                    Ok(false)
                }
            },
        }
    }
}
