use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Serving,
    NotServing,
}

/// Binary serving status shared between the health route and shutdown.
#[derive(Debug, Clone, Default)]
pub struct HealthReporter {
    serving: Arc<AtomicBool>,
}

impl HealthReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_serving(&self) {
        self.serving.store(true, Ordering::SeqCst);
    }

    pub fn set_not_serving(&self) {
        self.serving.store(false, Ordering::SeqCst);
    }

    pub fn status(&self) -> ServingStatus {
        if self.serving.load(Ordering::SeqCst) {
            ServingStatus::Serving
        } else {
            ServingStatus::NotServing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_serving_and_toggles() {
        let health = HealthReporter::new();
        assert_eq!(health.status(), ServingStatus::NotServing);
        health.set_serving();
        assert_eq!(health.status(), ServingStatus::Serving);

        let clone = health.clone();
        clone.set_not_serving();
        assert_eq!(health.status(), ServingStatus::NotServing);
    }
}
