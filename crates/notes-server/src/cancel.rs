//! Request cancellation.
//!
//! Every request carries a `CancelSignal`. It fires when the caller goes away:
//! either the transport drops the request future (the armed `CancelHandle`
//! is dropped with it) or an upstream layer cancels explicitly.
//!
//! Handlers never race the signal themselves. They hand the repository call to
//! a `CancellationGuard`, which owns the single precedence rule: a signal that
//! has already fired wins, and otherwise the work completes in order.

use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use axum::extract::FromRequestParts;
use http::request::Parts;
use tokio::sync::watch;

/// Create a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx, armed: true }, CancelSignal { rx })
}

/// Owning side of a request's cancellation signal.
///
/// Fires when `cancel` is called, or when dropped while still armed.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
    armed: bool,
}

impl CancelHandle {
    /// Fire the signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Drop the handle without firing. Called once a response exists.
    pub fn disarm(mut self) {
        self.armed = false;
    }

    /// Another receiver for the same signal.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        if self.armed && !*self.tx.borrow() {
            tracing::info!("Caller went away before a response was produced, abandoning request");
            self.tx.send_replace(true);
        }
    }
}

/// Observing side of a request's cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal fires. Pending forever if it never will.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let closed_without_firing = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed_without_firing {
            std::future::pending::<()>().await;
        }
    }
}

/// The caller went away before the work finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request cancelled by caller")]
pub struct Cancelled;

/// Response extension marking a response produced for a cancelled request.
///
/// Such a response has no body and is never meant to reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestAborted;

/// Runs one unit of work on behalf of a request, unless the caller leaves.
///
/// With a non-zero `min_latency` the work starts only after that delay; the
/// delay counts as part of the guarded section.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationGuard {
    min_latency: Duration,
}

impl CancellationGuard {
    /// Guard with an artificial delay before each unit of work.
    pub const fn new(min_latency: Duration) -> Self {
        Self { min_latency }
    }

    /// The configured delay.
    pub fn min_latency(&self) -> Duration {
        self.min_latency
    }

    /// Run `work` unless `signal` fires first.
    ///
    /// Returns `Err(Cancelled)` without polling `work` if the signal has
    /// already fired. If it fires while the delay or the work is outstanding,
    /// the work future is dropped and its result is never observed.
    pub async fn run<F>(&self, signal: &CancelSignal, work: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        if signal.is_cancelled() {
            return Err(Cancelled);
        }

        let min_latency = self.min_latency;
        let delayed = async move {
            if !min_latency.is_zero() {
                tokio::time::sleep(min_latency).await;
            }
            work.await
        };

        tokio::select! {
            biased;
            () = signal.cancelled() => Err(Cancelled),
            output = delayed => Ok(output),
        }
    }
}

/// Extracts the request's cancellation signal.
///
/// Falls back to a signal that never fires when no cancellation middleware
/// is installed.
#[derive(Debug, Clone)]
pub struct Cancellation(pub CancelSignal);

impl<S> FromRequestParts<S> for Cancellation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let signal = parts
            .extensions
            .get::<CancelSignal>()
            .cloned()
            .unwrap_or_else(CancelSignal::never);
        Ok(Self(signal))
    }
}
