//! Liveness and readiness probes.
//!
//! # States
//! - Live: the process is serving HTTP at all
//! - Ready: the process is accepting new work (until shutdown begins)
//!
//! # Design Decisions
//! - Probes take no body and accept any content type
//! - Readiness flips to 503 as soon as shutdown is triggered, so load
//!   balancers drain traffic before connections close
//! - Probes are not aborted by shutdown like other operations

use axum::http::{Method, StatusCode};
use serde::Serialize;

use crate::codec::{Empty, Json};
use crate::http::{Context, Handler, HandlerError, Operation};
use crate::lifecycle::ShutdownSignal;
use crate::routing::{RouteError, Router};

pub const LIVENESS_PATH: &str = "/health/liveness";
pub const READINESS_PATH: &str = "/health/readiness";

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LivenessHandler;

impl Handler for LivenessHandler {
    type Request = ();
    type Response = HealthStatus;

    async fn handle(&self, _ctx: &Context, _request: ()) -> Result<HealthStatus, HandlerError> {
        Ok(HealthStatus { status: "ok" })
    }
}

#[derive(Debug, Clone)]
pub struct ReadinessHandler {
    shutdown: ShutdownSignal,
}

impl ReadinessHandler {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self { shutdown }
    }
}

impl Handler for ReadinessHandler {
    type Request = ();
    type Response = HealthStatus;

    async fn handle(&self, _ctx: &Context, _request: ()) -> Result<HealthStatus, HandlerError> {
        if self.shutdown.is_triggered() {
            return Err(HandlerError::status(
                StatusCode::SERVICE_UNAVAILABLE,
                "not_ready",
                "server is shutting down",
            ));
        }
        Ok(HealthStatus { status: "ready" })
    }
}

/// Register both probes on `router`.
pub fn register(router: &mut Router, shutdown: ShutdownSignal) -> Result<(), RouteError> {
    router.register(
        Method::GET,
        LIVENESS_PATH,
        Operation::new("liveness", LivenessHandler, Empty, Json).survives_shutdown(),
    )?;
    router.register(
        Method::GET,
        READINESS_PATH,
        Operation::new("readiness", ReadinessHandler::new(shutdown), Empty, Json)
            .survives_shutdown(),
    )
}
