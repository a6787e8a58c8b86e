use prometheus::{IntCounterVec, Opts, Registry, TextEncoder};

use crate::types::{RequestType, ResponseType};

/// Prometheus name of the `app.ads.ad_requests` counter.
pub const AD_REQUESTS_METRIC: &str = "app_ads_ad_requests_total";
pub const REQUEST_TYPE_LABEL: &str = "app_ads_ad_request_type";
pub const RESPONSE_TYPE_LABEL: &str = "app_ads_ad_response_type";

/// Monotonic count of ad requests, labelled by (request, response) type.
///
/// Each service owns its registry so separate instances never share series.
#[derive(Debug, Clone)]
pub struct AdRequestCounter {
    registry: Registry,
    requests: IntCounterVec,
}

impl AdRequestCounter {
    pub fn new() -> prometheus::Result<Self> {
        let requests = IntCounterVec::new(
            Opts::new(
                AD_REQUESTS_METRIC,
                "Counts ad requests by request and response type",
            ),
            &[REQUEST_TYPE_LABEL, RESPONSE_TYPE_LABEL],
        )?;
        let registry = Registry::new();
        registry.register(Box::new(requests.clone()))?;

        // Touch every label pair so all four series are exported from zero.
        for &req in RequestType::all() {
            for &resp in ResponseType::all() {
                let _ = requests.with_label_values(&[req.as_str(), resp.as_str()]);
            }
        }

        Ok(Self { registry, requests })
    }

    pub fn increment(&self, request: RequestType, response: ResponseType) {
        self.requests
            .with_label_values(&[request.as_str(), response.as_str()])
            .inc();
    }

    pub fn get(&self, request: RequestType, response: ResponseType) -> u64 {
        self.requests
            .with_label_values(&[request.as_str(), response.as_str()])
            .get()
    }

    pub fn total(&self) -> u64 {
        self.snapshot().iter().map(|&(_, _, v)| v).sum()
    }

    /// Every label pair with its current value, zeroes included.
    pub fn snapshot(&self) -> Vec<(RequestType, ResponseType, u64)> {
        RequestType::all()
            .iter()
            .flat_map(|&req| {
                ResponseType::all()
                    .iter()
                    .map(move |&resp| (req, resp, self.get(req, resp)))
            })
            .collect()
    }

    /// Prometheus text exposition of this counter's registry.
    pub fn render_prometheus(&self) -> prometheus::Result<String> {
        let mut buffer = String::new();
        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}
