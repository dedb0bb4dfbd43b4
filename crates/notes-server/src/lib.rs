//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - REST endpoints to list, fetch and create notes
//! - Per-request cancellation: work for a caller that has gone away is
//!   abandoned and its response never written
//! - JSON error responses
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - Cancellation tracking
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{AppState, ServerConfig, routes};
//!
//! let notes = notes_store::open(&notes_store::StoreConfig::from_env()?).await?;
//! let app = routes::build_router(AppState::new(notes, ServerConfig::from_env()?));
//! axum::serve(listener, app).await?;
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use cancel::{CancelHandle, CancelSignal, Cancellation, CancellationGuard, Cancelled};
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
