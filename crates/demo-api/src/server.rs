use std::io;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::cors::{self, CorsPolicy};
use crate::handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server terminated: {0}")]
    Serve(#[source] io::Error),
}

pub fn build_app(cors_policy: CorsPolicy, request_timeout_secs: u64) -> Router {
    let routes = Router::new()
        .route(
            "/",
            get(handlers::root).head(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).head(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed);

    with_layers(
        routes,
        cors_policy,
        Duration::from_secs(request_timeout_secs),
    )
}

/// Wrap `router` in the timeout, tracing and CORS layers, CORS outermost.
pub fn with_layers(router: Router, cors_policy: CorsPolicy, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(cors_policy, cors::cors))
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let app = build_app(
        CorsPolicy::permissive(),
        config.server.request_timeout_seconds,
    );

    info!(
        title = %config.app.title,
        version = %config.app.version,
        "API listening on {addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
