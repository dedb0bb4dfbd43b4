//! Route definitions for the HTTP API.

pub mod health;
pub mod notes;

use axum::{Router, middleware};

use crate::middleware::track_cancellation;
use crate::state::AppState;

/// Build the complete router with all routes.
///
/// Every route gets a cancellation signal; transport layers (request IDs,
/// CORS, tracing) are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(notes::routes())
        .layer(middleware::from_fn(track_cancellation))
        .with_state(state)
}
