use std::sync::Arc;

use tracing::Instrument;

use crate::catalog::Catalog;
use crate::error::{AdServiceError, Result};
use crate::failure::{FailureInjector, FlagErrorPolicy, FAILURE_FLAG};
use crate::flags::FlagClient;
use crate::metrics::AdRequestCounter;
use crate::random::RandomSource;
use crate::selector::Selector;
use crate::types::{AdRequest, AdResponse};

/// The ad service: built once at startup and shared by every request task.
pub struct AdService {
    selector: Selector,
    injector: FailureInjector,
    counter: AdRequestCounter,
}

impl AdService {
    pub fn new(
        catalog: Arc<Catalog>,
        flags: Arc<dyn FlagClient>,
        random: Arc<dyn RandomSource>,
        policy: FlagErrorPolicy,
    ) -> Result<Self> {
        Ok(Self {
            selector: Selector::new(catalog, random.clone()),
            injector: FailureInjector::new(flags, random, policy),
            counter: AdRequestCounter::new()?,
        })
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn catalog(&self) -> &Catalog {
        self.selector.catalog()
    }

    pub fn counter(&self) -> &AdRequestCounter {
        &self.counter
    }

    pub fn flag_error_policy(&self) -> FlagErrorPolicy {
        self.injector.policy()
    }

    /// Handle one `GetAds` call.
    ///
    /// The selection is always computed and counted. If the failure injector
    /// fires, the selection is discarded and the caller gets
    /// [`AdServiceError::ResourceExhausted`].
    pub async fn get_ads(&self, request: AdRequest) -> Result<AdResponse> {
        let span = tracing::info_span!(
            "get_ads",
            app.ads.contextKeys = ?request.context_keys,
            app.ads.contextKeys.count = request.context_keys.len(),
            app.ads.count = tracing::field::Empty,
            app.ads.ad_request_type = tracing::field::Empty,
            app.ads.ad_response_type = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        );
        self.handle(request, span.clone()).instrument(span).await
    }

    async fn handle(&self, request: AdRequest, span: tracing::Span) -> Result<AdResponse> {
        let selection = self.selector.select(&request.context_keys);

        span.record("app.ads.count", selection.ads.len());
        span.record("app.ads.ad_request_type", selection.request_type.as_str());
        span.record("app.ads.ad_response_type", selection.response_type.as_str());
        self.counter
            .increment(selection.request_type, selection.response_type);

        match self.injector.should_fail().await {
            Ok(false) => Ok(AdResponse {
                ads: selection.ads,
            }),
            Ok(true) => {
                let err = AdServiceError::ResourceExhausted {
                    flag: FAILURE_FLAG.to_string(),
                };
                span.record("otel.status_code", "ERROR");
                tracing::warn!(
                    exception.message = %err,
                    "GetAds failed with status RESOURCE_EXHAUSTED"
                );
                Err(err)
            }
            Err(e) => {
                span.record("otel.status_code", "ERROR");
                tracing::warn!(exception.message = %e, "GetAds failed: flag service error");
                Err(e.into())
            }
        }
    }
}
