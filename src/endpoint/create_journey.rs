//! `POST /v1/journey`: create a journey and return its new ID.

use std::sync::Arc;

use axum::http::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Span;

use crate::http::{Context, Handler, HandlerError, Operation};
use crate::id::IdGenerator;
use crate::routing::{RouteError, Router};

pub const PATH: &str = "/v1/journey";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJourneyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tracking_enabled: bool,
    /// Unix epoch when absent.
    #[serde(default)]
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateJourneyResponse {
    pub id: String,
}

#[derive(Debug)]
pub struct CreateJourneyHandler {
    log: Span,
    ids: Arc<dyn IdGenerator>,
}

impl CreateJourneyHandler {
    pub fn new(log: Span, ids: Arc<dyn IdGenerator>) -> Self {
        Self { log, ids }
    }
}

impl Handler for CreateJourneyHandler {
    type Request = CreateJourneyRequest;
    type Response = CreateJourneyResponse;

    async fn handle(
        &self,
        ctx: &Context,
        request: CreateJourneyRequest,
    ) -> Result<CreateJourneyResponse, HandlerError> {
        tracing::info!(
            parent: &self.log,
            request_id = %ctx.request_id(),
            name = %request.name,
            tracking_enabled = request.tracking_enabled,
            "Handling request"
        );

        Ok(CreateJourneyResponse {
            id: self.ids.generate(),
        })
    }
}

/// Register the operation on `router`.
pub fn register(router: &mut Router, ids: Arc<dyn IdGenerator>) -> Result<(), RouteError> {
    let handler = CreateJourneyHandler::new(tracing::info_span!("endpoint"), ids);
    router.register(Method::POST, PATH, Operation::json("create_journey", handler))
}
