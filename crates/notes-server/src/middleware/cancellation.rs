//! Per-request cancellation tracking.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::cancel::{CancelSignal, cancel_pair};

/// Attach a `CancelSignal` to the request.
///
/// The signal fires if this middleware's future is dropped before the inner
/// service responds, which is what the server does when the connection closes.
/// A signal already present on the request is left in place.
pub async fn track_cancellation(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<CancelSignal>().is_some() {
        return next.run(request).await;
    }

    let (handle, signal) = cancel_pair();
    request.extensions_mut().insert(signal);

    let response = next.run(request).await;
    handle.disarm();
    response
}
