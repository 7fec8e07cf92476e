//! Typed handler contract.

use std::future::Future;

use axum::http::StatusCode;

use crate::http::Context;

/// Error returned by a [`Handler`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Failure the handler wants reported with a specific status.
    #[error("{kind}: {message}")]
    Status {
        status: StatusCode,
        kind: String,
        message: String,
    },

    /// Anything else. Reported to the client as a generic 500.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Tag a failure with the status the client should see.
    pub fn status(status: StatusCode, kind: impl Into<String>, message: impl Into<String>) -> Self {
        HandlerError::Status {
            status,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn internal(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        HandlerError::Internal(error.into())
    }
}

/// Business logic for one operation.
///
/// Implementations are built once at startup and shared by every request,
/// so they hold only read-only dependencies.
pub trait Handler: Send + Sync + 'static {
    type Request: Send + 'static;
    type Response: Send + 'static;

    /// Handle one decoded request.
    ///
    /// Any downstream call must honor `ctx` cancellation.
    fn handle(
        &self,
        ctx: &Context,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, HandlerError>> + Send;
}
