//! Paperleaf backend - online bookstore HTTP API.
//!
//! Serves account, cart, and catalog endpoints over a `MongoDB` store.
//!
//! # Architecture
//!
//! - Axum web framework with JSON request/response bodies
//! - Bearer-token authentication (signed, 24h expiry)
//! - `MongoDB` for users (with embedded carts) and the book catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use paperleaf_backend::config::PaperleafConfig;
use paperleaf_backend::db::Store;
use paperleaf_backend::routes;
use paperleaf_backend::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = PaperleafConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "paperleaf_backend=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Connect to the store
    let store = Store::connect(
        &config.database_url,
        &config.database_name,
        config.store_timeout,
    )
    .await
    .expect("Failed to connect to database");
    tracing::info!(database = %config.database_name, "store connected");

    // Build application state and router
    let addr = config.socket_addr();
    let state = AppState::new(config, store);

    let app = routes::routes()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state);

    // Start server
    tracing::info!("backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
