use std::sync::Arc;

use crate::catalog::Catalog;
use crate::random::RandomSource;
use crate::types::{Ad, RequestType, ResponseType};

/// Number of ads drawn when falling back to random sampling.
pub const MAX_ADS_TO_SERVE: usize = 2;

/// Outcome of one selection: the ads plus both classification labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub ads: Vec<Ad>,
    pub request_type: RequestType,
    pub response_type: ResponseType,
}

/// Picks ads for a request from the shared catalog.
pub struct Selector {
    catalog: Arc<Catalog>,
    random: Arc<dyn RandomSource>,
}

impl Selector {
    pub fn new(catalog: Arc<Catalog>, random: Arc<dyn RandomSource>) -> Self {
        Self { catalog, random }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Targeted lookup per context key, with random fallback.
    ///
    /// Ads from every key are concatenated in key order without
    /// de-duplication. When the keys are empty, or none of them matched, the
    /// response is a random sample; the request label still records whether
    /// keys were supplied.
    pub fn select(&self, context_keys: &[String]) -> Selection {
        let (mut ads, request_type, mut response_type) = if context_keys.is_empty() {
            tracing::info!("non-targeted ad request received, preparing random response");
            (
                self.random_ads(),
                RequestType::NotTargeted,
                ResponseType::Random,
            )
        } else {
            tracing::info!(keys = ?context_keys, "targeted ad request received");
            let ads = context_keys
                .iter()
                .flat_map(|key| self.ads_by_category(key).iter().cloned())
                .collect::<Vec<_>>();
            (ads, RequestType::Targeted, ResponseType::Targeted)
        };

        if ads.is_empty() {
            ads = self.random_ads();
            response_type = ResponseType::Random;
        }

        Selection {
            ads,
            request_type,
            response_type,
        }
    }

    /// Catalog entries for one category, inside its own span.
    pub fn ads_by_category(&self, category: &str) -> &[Ad] {
        let span = tracing::info_span!(
            "get_ads_by_category",
            app.ads.category = category,
            app.ads.count = tracing::field::Empty,
        );
        let _guard = span.enter();
        let ads = self.catalog.lookup(category);
        span.record("app.ads.count", ads.len());
        ads
    }

    /// Exactly [`MAX_ADS_TO_SERVE`] independent uniform draws, with
    /// replacement, over the whole catalog.
    pub fn random_ads(&self) -> Vec<Ad> {
        let span = tracing::info_span!("get_random_ads", app.ads.count = tracing::field::Empty);
        let _guard = span.enter();
        let all = self.catalog.all_ads();
        let ads: Vec<Ad> = (0..MAX_ADS_TO_SERVE)
            .map(|_| all[self.random.below(all.len())].clone())
            .collect();
        span.record("app.ads.count", ads.len());
        ads
    }
}
