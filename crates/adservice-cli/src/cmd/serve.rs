use std::sync::Arc;

use adservice_core::catalog::default_catalog;
use adservice_core::config::{
    ServiceConfig, FLAG_ADDR_VAR, FLAG_POLICY_VAR, FLAG_TIMEOUT_VAR, PORT_VAR,
};
use adservice_core::flags::HttpFlagClient;
use adservice_core::random::{RandomSource, SeededRandom, ThreadRandom};
use adservice_core::AdService;
use adservice_server::AppState;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = PORT_VAR)]
    pub port: Option<String>,

    /// Address of the feature flag service (host:port or URL)
    #[arg(long, env = FLAG_ADDR_VAR)]
    pub flag_service_addr: Option<String>,

    /// Timeout for a single flag lookup, in milliseconds
    #[arg(long, env = FLAG_TIMEOUT_VAR)]
    pub flag_timeout_ms: Option<String>,

    /// What to do when the flag service is unreachable: fail | disabled
    #[arg(long, env = FLAG_POLICY_VAR)]
    pub flag_error_policy: Option<String>,

    /// Interface to bind
    #[arg(long)]
    pub bind: Option<String>,

    /// Seed the shared random source (sampling and failure coin flip)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ServeArgs {
    /// Flag value for a configuration key, if given on the command line.
    fn value_for(&self, key: &str) -> Option<String> {
        match key {
            PORT_VAR => self.port.clone(),
            FLAG_ADDR_VAR => self.flag_service_addr.clone(),
            FLAG_TIMEOUT_VAR => self.flag_timeout_ms.clone(),
            FLAG_POLICY_VAR => self.flag_error_policy.clone(),
            _ => None,
        }
    }
}

pub fn run(args: ServeArgs) -> Result<()> {
    tracing::info!("ad service starting");

    let config = ServiceConfig::from_lookup(|key| {
        args.value_for(key)
            .or_else(|| std::env::var(key).ok())
    })?;

    let catalog = Arc::new(default_catalog()?);
    let flags = HttpFlagClient::new(&config.flag_service_addr, config.flag_timeout)?;
    let random: Arc<dyn RandomSource> = match args.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };

    tracing::info!(
        ads = catalog.len(),
        flag_endpoint = flags.endpoint(),
        flag_timeout_ms = config.flag_timeout.as_millis() as u64,
        flag_error_policy = %config.flag_error_policy,
        "ad catalog loaded"
    );

    let service = AdService::new(catalog, Arc::new(flags), random, config.flag_error_policy)?;
    let state = AppState::new(Arc::new(service));
    let bind = args.bind.unwrap_or_else(|| "0.0.0.0".to_string());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((bind.as_str(), config.port)).await?;
        adservice_server::serve_on(listener, state, adservice_server::shutdown_signal()).await
    })
}
