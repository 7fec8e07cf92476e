//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router around the route table
//! - Wire up middleware (request ID, tracing)
//! - Build each request's `Context` (deadline, body limit, shutdown)
//! - Dispatch requests to the routing engine
//! - Drain connections on shutdown, bounded by the grace period
//!
//! # Design Decisions
//! - All routing is ours: Axum only contributes a single fallback handler
//! - The route table is frozen behind `Arc` before serving starts

use std::future::IntoFuture;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::{ApiError, Context, RequestIdExt};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::Router;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<Router>,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub shutdown: ShutdownSignal,
}

/// HTTP server for the journeys API.
pub struct HttpServer {
    router: axum::Router,
    shutdown: ShutdownSignal,
    grace: Duration,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(routes: Router, config: &HttpConfig, shutdown: ShutdownSignal) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
            request_timeout: config.request_timeout(),
            max_body_bytes: config.max_body_bytes,
            shutdown: shutdown.clone(),
        };

        Self {
            router: Self::build_router(state),
            shutdown,
            grace: config.shutdown_grace(),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered Axum app, for driving requests without a listener.
    pub fn router(&self) -> axum::Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once shutdown was triggered and in-flight requests drained, or
    /// the grace period ran out.
    pub async fn run(self, listener: TcpListener) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut drain = self.shutdown.clone();
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { drain.wait().await })
            .into_future();

        let mut expiry = self.shutdown;
        let grace = self.grace;
        let grace_elapsed = async move {
            expiry.wait().await;
            tracing::info!(grace = ?grace, "Draining connections");
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => result?,
            _ = grace_elapsed => {
                tracing::warn!("Grace period elapsed, dropping remaining connections");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request enters here and is dispatched through the
/// route table.
async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let endpoint = match state.routes.dispatch(&method, &path) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            let err = ApiError::from_route(e, &method, &path);
            tracing::debug!(request_id = %request_id, path = %path, error = %err, "No route matched");
            let response = err.into_response();
            metrics::record_request(
                metrics::UNMATCHED,
                method.as_str(),
                response.status().as_u16(),
                start_time,
            );
            return response;
        }
    };

    let ctx = Context::new(
        request_id,
        endpoint.name(),
        state.request_timeout,
        state.max_body_bytes,
        state.shutdown.clone(),
    );
    let response = endpoint.call(ctx, request).await;

    metrics::record_request(
        endpoint.name(),
        method.as_str(),
        response.status().as_u16(),
        start_time,
    );
    response
}
