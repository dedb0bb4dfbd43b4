//! Entry point for the notes-server binary.

use axum::middleware;
use notes_server::{
    config::{ConfigError, ServerConfig},
    middleware::{propagate_request_id, request_id_layer, request_span},
    routes,
    state::AppState,
};
use notes_store::StoreConfig;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;
    let store_config = StoreConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting notes-server");
    tracing::info!(
        port = config.port,
        log_level = %config.log_level,
        min_latency_ms = config.min_latency.as_millis() as u64,
        backend = %store_config.backend,
        id_encoding = %store_config.id_encoding,
        "Configuration loaded"
    );

    // Open the note repository
    let notes = notes_store::open(&store_config).await?;
    tracing::info!(encoding = notes.encoding(), "Note repository ready");

    // Build application state
    let cors = build_cors_layer(&config.cors_allowed_origins)?;
    let addr = config.socket_addr();
    let state = AppState::new(notes, config);

    // Build router with middleware. The request ID layer wraps the trace
    // layer so every request span carries its ID.
    let app = routes::build_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors);

    // Create listener
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build CORS layer from configuration.
fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    if allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    // Parse comma-separated origins
    let origins = allowed_origins
        .split(',')
        .map(|s| {
            s.trim().parse().map_err(|e: http::header::InvalidHeaderValue| {
                ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("{:?}: {}", s.trim(), e),
                }
            })
        })
        .collect::<Result<Vec<http::HeaderValue>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_wildcard() {
        assert!(build_cors_layer("*").is_ok());
    }

    #[test]
    fn test_cors_origin_list() {
        assert!(build_cors_layer("http://localhost:3000, https://notes.example").is_ok());
    }

    #[test]
    fn test_cors_invalid_origin() {
        let err = build_cors_layer("http://ok.example,bad\norigin").unwrap_err();
        let ConfigError::InvalidValue { name, .. } = err;
        assert_eq!(name, "CORS_ALLOWED_ORIGINS");
    }
}
