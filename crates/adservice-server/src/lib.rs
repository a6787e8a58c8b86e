pub mod error;
pub mod health;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/oteldemo.AdService/GetAds", post(routes::ads::get_ads))
        .route("/api/ads", post(routes::ads::get_ads))
        .route("/healthz", get(routes::health::health))
        .route("/metrics", get(routes::metrics::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on a pre-bound listener until `shutdown` resolves.
///
/// When `shutdown` fires, health flips to NOT_SERVING before the listener
/// stops accepting connections; in-flight requests are allowed to finish.
pub async fn serve_on<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let health = state.health.clone();
    health.set_serving();
    let app = build_router(state);

    tracing::info!("ad service started, listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            health.set_not_serving();
            tracing::info!("shutting down ad service");
        })
        .await?;

    tracing::info!("ad service stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
