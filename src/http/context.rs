//! Per-request context handed to handlers.
//!
//! # Responsibilities
//! - Carry the request ID and operation name for log correlation
//! - Carry the request budget (deadline, body limit)
//! - Expose cancellation: deadline elapsed or server shutting down
//!
//! # Design Decisions
//! - Client disconnects cancel by dropping the request future; handlers
//!   need no extra hook for that case
//! - Cancellation is observed cooperatively through `cancelled()`/`run()`

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::lifecycle::ShutdownSignal;

/// Why a request stopped before producing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancelled {
    /// The request budget elapsed.
    DeadlineExceeded,
    /// The server began shutting down.
    Shutdown,
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cancelled::DeadlineExceeded => write!(f, "deadline exceeded"),
            Cancelled::Shutdown => write!(f, "server shutting down"),
        }
    }
}

impl std::error::Error for Cancelled {}

/// Request-scoped metadata and cancellation.
#[derive(Debug, Clone)]
pub struct Context {
    request_id: String,
    operation: String,
    deadline: Instant,
    body_limit: usize,
    shutdown: ShutdownSignal,
    cancel_on_shutdown: bool,
}

impl Context {
    /// Create a context whose deadline is `timeout` from now.
    pub fn new(
        request_id: impl Into<String>,
        operation: impl Into<String>,
        timeout: Duration,
        body_limit: usize,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            operation: operation.into(),
            deadline: Instant::now() + timeout,
            body_limit,
            shutdown,
            cancel_on_shutdown: true,
        }
    }

    /// Keep the request running through shutdown; only the deadline cancels it.
    pub fn detach_shutdown(mut self) -> Self {
        self.cancel_on_shutdown = false;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Maximum number of request body bytes the adapter will read.
    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Returns the cancellation reason if the request is already cancelled.
    pub fn is_cancelled(&self) -> Option<Cancelled> {
        if self.cancel_on_shutdown && self.shutdown.is_triggered() {
            Some(Cancelled::Shutdown)
        } else if Instant::now() >= self.deadline {
            Some(Cancelled::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Resolve once the request is cancelled.
    pub async fn cancelled(&self) -> Cancelled {
        let mut shutdown = self.shutdown.clone();
        let cancel_on_shutdown = self.cancel_on_shutdown;
        tokio::select! {
            _ = shutdown.wait(), if cancel_on_shutdown => Cancelled::Shutdown,
            _ = tokio::time::sleep_until(self.deadline) => Cancelled::DeadlineExceeded,
        }
    }

    /// Drive `fut` to completion unless the request is cancelled first.
    ///
    /// Handlers wrap downstream calls in this so they stop promptly. When
    /// both become ready in the same poll, cancellation wins.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            reason = self.cancelled() => Err(reason),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    fn context(timeout: Duration, shutdown: &Shutdown) -> Context {
        Context::new("req-1", "test", timeout, 1024, shutdown.subscribe())
    }

    #[tokio::test]
    async fn test_run_completes_before_deadline() {
        let shutdown = Shutdown::new();
        let ctx = context(Duration::from_secs(5), &shutdown);

        let out = ctx.run(async { 42 }).await;
        assert_eq!(out, Ok(42));
        assert_eq!(ctx.is_cancelled(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_at_deadline() {
        let shutdown = Shutdown::new();
        let ctx = context(Duration::from_millis(100), &shutdown);

        let out = ctx
            .run(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert_eq!(out, Err(Cancelled::DeadlineExceeded));
        assert_eq!(ctx.is_cancelled(), Some(Cancelled::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let shutdown = Shutdown::new();
        let ctx = context(Duration::from_secs(60), &shutdown);

        let (out, ()) = tokio::join!(
            ctx.run(std::future::pending::<()>()),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                shutdown.trigger();
            }
        );
        assert_eq!(out, Err(Cancelled::Shutdown));
        assert_eq!(ctx.is_cancelled(), Some(Cancelled::Shutdown));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_context_ignores_shutdown() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let ctx = context(Duration::from_millis(100), &shutdown).detach_shutdown();

        assert_eq!(ctx.is_cancelled(), None);
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
        assert_eq!(ctx.cancelled().await, Cancelled::DeadlineExceeded);
    }
}
