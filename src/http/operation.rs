//! Operation adapter: typed handler → HTTP endpoint.
//!
//! # Responsibilities
//! - Reject unsupported content types before touching the body
//! - Read the body within the configured size limit
//! - Decode, invoke the handler, encode, map errors
//! - Abort the connection when the request is cancelled
//!
//! # Design Decisions
//! - Exactly one response per request; the body is attached only after
//!   encoding succeeded
//! - The whole pipeline runs under the request's cancellation, so a slow
//!   body read is bounded just like a slow handler
//! - Operations are immutable once built and shared behind `Arc`

use std::fmt;
use std::io;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::codec::{Decoder, Encoder, Json};
use crate::http::{ApiError, Cancelled, Context, Handler};

/// Type-erased operation stored in the route table.
pub trait Endpoint: Send + Sync + fmt::Debug + 'static {
    /// Operation name used in logs and metrics.
    fn name(&self) -> &str;

    /// Serve one request. Always yields exactly one response.
    fn call(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response>;
}

/// A handler bound to its input and output codecs.
pub struct Operation<H, D, E> {
    name: String,
    handler: H,
    decoder: D,
    encoder: E,
    success_status: StatusCode,
    survives_shutdown: bool,
}

impl<H> Operation<H, Json, Json>
where
    H: Handler,
    Json: Decoder<H::Request> + Encoder<H::Response>,
{
    /// Operation consuming and returning JSON.
    pub fn json(name: impl Into<String>, handler: H) -> Self {
        Self::new(name, handler, Json, Json)
    }
}

impl<H, D, E> Operation<H, D, E>
where
    H: Handler,
    D: Decoder<H::Request>,
    E: Encoder<H::Response>,
{
    pub fn new(name: impl Into<String>, handler: H, decoder: D, encoder: E) -> Self {
        Self {
            name: name.into(),
            handler,
            decoder,
            encoder,
            success_status: StatusCode::OK,
            survives_shutdown: false,
        }
    }

    /// Status written on success. Defaults to 200.
    pub fn with_success_status(mut self, status: StatusCode) -> Self {
        self.success_status = status;
        self
    }

    /// Keep serving this operation after shutdown begins instead of
    /// aborting it. Used by probes that must report the shutdown itself.
    pub fn survives_shutdown(mut self) -> Self {
        self.survives_shutdown = true;
        self
    }

    async fn process(&self, ctx: &Context, request: Request) -> Result<Response, ApiError> {
        let (parts, body) = request.into_parts();

        let content_type = parts.headers.get(header::CONTENT_TYPE);
        if !self.decoder.accepts(content_type) {
            let received = content_type
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none")
                .to_string();
            return Err(ApiError::UnsupportedMediaType(received));
        }

        let bytes = read_body(&parts.headers, body, ctx.body_limit()).await?;
        let input = self.decoder.decode(&bytes)?;

        let output = self.handler.handle(ctx, input).await?;

        let encoded = self.encoder.encode(&output)?;
        let mut response = Response::new(Body::from(encoded));
        *response.status_mut() = self.success_status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.encoder.content_type()),
        );
        Ok(response)
    }
}

impl<H, D, E> Endpoint for Operation<H, D, E>
where
    H: Handler,
    D: Decoder<H::Request>,
    E: Encoder<H::Response>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        let ctx = if self.survives_shutdown {
            ctx.detach_shutdown()
        } else {
            ctx
        };
        Box::pin(async move {
            let mut outcome = ctx.run(self.process(&ctx, request)).await;
            // A handler that gave up after seeing the cancellation is cancelled too.
            if matches!(outcome, Ok(Err(_))) {
                if let Some(reason) = ctx.is_cancelled() {
                    outcome = Err(reason);
                }
            }

            match outcome {
                Ok(Ok(response)) => response,
                Ok(Err(err)) => {
                    if err.is_internal() {
                        tracing::error!(
                            request_id = %ctx.request_id(),
                            operation = %self.name,
                            error = %err,
                            "Operation failed"
                        );
                    } else {
                        tracing::debug!(
                            request_id = %ctx.request_id(),
                            operation = %self.name,
                            error = %err,
                            "Request rejected"
                        );
                    }
                    err.into_response()
                }
                Err(reason) => {
                    tracing::warn!(
                        request_id = %ctx.request_id(),
                        operation = %self.name,
                        reason = %reason,
                        "Request cancelled"
                    );
                    aborted(reason)
                }
            }
        })
    }
}

impl<H, D, E> fmt::Debug for Operation<H, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("success_status", &self.success_status)
            .finish_non_exhaustive()
    }
}

/// Read the full body, rejecting anything over `limit` bytes.
async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, ApiError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > limit as u64) {
        return Err(ApiError::PayloadTooLarge { limit });
    }

    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ApiError::PayloadTooLarge { limit }),
        Err(e) => Err(ApiError::BadRequest(format!("failed to read request body: {e}"))),
    }
}

/// Response for a cancelled request: the body errors on first poll, so hyper
/// aborts the connection instead of writing a body.
fn aborted(reason: Cancelled) -> Response {
    let stream = futures_util::stream::iter([Err::<Bytes, io::Error>(io::Error::new(
        io::ErrorKind::ConnectionAborted,
        reason,
    ))]);
    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
    response
}
