use std::time::Duration;

use crate::error::{AdServiceError, Result};
use crate::failure::FlagErrorPolicy;

pub const PORT_VAR: &str = "AD_SERVICE_PORT";
pub const FLAG_ADDR_VAR: &str = "FEATURE_FLAG_SERVICE_ADDR";
pub const FLAG_TIMEOUT_VAR: &str = "FEATURE_FLAG_TIMEOUT_MS";
pub const FLAG_POLICY_VAR: &str = "AD_SERVICE_FLAG_ERROR_POLICY";

pub const DEFAULT_FLAG_TIMEOUT: Duration = Duration::from_millis(500);

/// Process configuration for the ad service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub flag_service_addr: String,
    pub flag_timeout: Duration,
    pub flag_error_policy: FlagErrorPolicy,
}

impl ServiceConfig {
    /// Resolve configuration from any key → value lookup.
    ///
    /// The port and flag service address are required; the timeout and
    /// error policy fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = get(PORT_VAR).ok_or(AdServiceError::MissingConfig(PORT_VAR))?;
        let port = parse_port(&port)?;

        let flag_service_addr =
            get(FLAG_ADDR_VAR).ok_or(AdServiceError::MissingConfig(FLAG_ADDR_VAR))?;

        let flag_timeout = match get(FLAG_TIMEOUT_VAR) {
            Some(ms) => parse_timeout(&ms)?,
            None => DEFAULT_FLAG_TIMEOUT,
        };

        let flag_error_policy = match get(FLAG_POLICY_VAR) {
            Some(p) => p.parse()?,
            None => FlagErrorPolicy::default(),
        };

        Ok(Self {
            port,
            flag_service_addr,
            flag_timeout,
            flag_error_policy,
        })
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.parse::<u16>().map_err(|e| AdServiceError::InvalidConfig {
        key: PORT_VAR,
        reason: format!("'{raw}' is not a valid port: {e}"),
    })
}

/// A zero timeout would fail every flag lookup, so it is rejected.
fn parse_timeout(raw: &str) -> Result<Duration> {
    let ms: u64 = raw.parse().map_err(|e| AdServiceError::InvalidConfig {
        key: FLAG_TIMEOUT_VAR,
        reason: format!("'{raw}' is not a number of milliseconds: {e}"),
    })?;
    if ms == 0 {
        return Err(AdServiceError::InvalidConfig {
            key: FLAG_TIMEOUT_VAR,
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn resolves_required_values_and_defaults() {
        let cfg = ServiceConfig::from_lookup(lookup(&[
            (PORT_VAR, "9555"),
            (FLAG_ADDR_VAR, "featureflagservice:50053"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9555);
        assert_eq!(cfg.flag_service_addr, "featureflagservice:50053");
        assert_eq!(cfg.flag_timeout, DEFAULT_FLAG_TIMEOUT);
        assert_eq!(cfg.flag_error_policy, FlagErrorPolicy::Fail);
    }

    #[test]
    fn missing_port_is_fatal() {
        let err = ServiceConfig::from_lookup(lookup(&[(FLAG_ADDR_VAR, "flags:1")])).unwrap_err();
        assert!(matches!(err, AdServiceError::MissingConfig(PORT_VAR)));
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_flag_address_is_fatal() {
        let err = ServiceConfig::from_lookup(lookup(&[(PORT_VAR, "9555")])).unwrap_err();
        assert!(matches!(err, AdServiceError::MissingConfig(FLAG_ADDR_VAR)));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = ServiceConfig::from_lookup(lookup(&[(PORT_VAR, "  "), (FLAG_ADDR_VAR, "x:1")]))
            .unwrap_err();
        assert!(matches!(err, AdServiceError::MissingConfig(PORT_VAR)));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (PORT_VAR, "70000"),
            (FLAG_ADDR_VAR, "flags:1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AdServiceError::InvalidConfig { key: PORT_VAR, .. }));
    }

    #[test]
    fn optional_values_are_parsed() {
        let cfg = ServiceConfig::from_lookup(lookup(&[
            (PORT_VAR, "8080"),
            (FLAG_ADDR_VAR, "http://flags:8013"),
            (FLAG_TIMEOUT_VAR, "250"),
            (FLAG_POLICY_VAR, "disabled"),
        ]))
        .unwrap();
        assert_eq!(cfg.flag_timeout, Duration::from_millis(250));
        assert_eq!(cfg.flag_error_policy, FlagErrorPolicy::Disabled);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (PORT_VAR, "8080"),
            (FLAG_ADDR_VAR, "flags:1"),
            (FLAG_TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AdServiceError::InvalidConfig {
                key: FLAG_TIMEOUT_VAR,
                ..
            }
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (PORT_VAR, "8080"),
            (FLAG_ADDR_VAR, "flags:1"),
            (FLAG_TIMEOUT_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AdServiceError::InvalidConfig {
                key: FLAG_TIMEOUT_VAR,
                ..
            }
        ));
        assert!(err.to_string().contains("greater than zero"));
    }
}
