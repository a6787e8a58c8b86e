use std::sync::Arc;

use adservice_core::AdService;

use crate::health::HealthReporter;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AdService>,
    pub health: HealthReporter,
}

impl AppState {
    /// Wrap an initialized service; health reports SERVING from here on.
    pub fn new(service: Arc<AdService>) -> Self {
        let health = HealthReporter::new();
        health.set_serving();
        Self { service, health }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ServingStatus;
    use adservice_core::catalog::default_catalog;
    use adservice_core::failure::FlagErrorPolicy;
    use adservice_core::flags::HttpFlagClient;
    use adservice_core::random::ThreadRandom;
    use std::time::Duration;

    #[test]
    fn new_state_reports_serving() {
        let flags = HttpFlagClient::new("127.0.0.1:1", Duration::from_millis(10)).unwrap();
        let service = AdService::new(
            Arc::new(default_catalog().unwrap()),
            Arc::new(flags),
            Arc::new(ThreadRandom),
            FlagErrorPolicy::Fail,
        )
        .unwrap();
        let state = AppState::new(Arc::new(service));
        assert_eq!(state.health.status(), ServingStatus::Serving);
    }
}
