//! Error taxonomy at the HTTP boundary.
//!
//! # Responsibilities
//! - Collect every way a request can fail before or after the handler
//! - Map each failure to a status code and a JSON error body
//!
//! # Design Decisions
//! - Error bodies are always `{"error": <kind>, "message": <text>}`
//! - Internal failures never expose their text to the client
//! - Handler-tagged statuses outside 400..=599 degrade to 500

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::codec::{DecodeError, EncodeError};
use crate::http::HandlerError;
use crate::routing::RouteError;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Machine-readable error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// A request failure, translated into exactly one HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("failed to decode request: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] EncodeError),

    #[error("no route for {0}")]
    NotFound(String),

    #[error("method {method} not allowed")]
    MethodNotAllowed { method: Method, allowed: Vec<Method> },

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a router miss to its client-facing error.
    pub fn from_route(error: RouteError, method: &Method, path: &str) -> Self {
        match error {
            RouteError::MethodNotAllowed { allowed } => ApiError::MethodNotAllowed {
                method: method.clone(),
                allowed,
            },
            _ => ApiError::NotFound(path.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadRequest(_) | ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Handler(HandlerError::Status { status, .. })
                if status.is_client_error() || status.is_server_error() =>
            {
                *status
            }
            ApiError::Handler(_) | ApiError::Encode(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True when the failure is ours rather than the client's and must be
    /// logged instead of returned.
    pub fn is_internal(&self) -> bool {
        match self {
            ApiError::Encode(_) | ApiError::Internal(_) => true,
            ApiError::Handler(HandlerError::Internal(_)) => true,
            ApiError::Handler(HandlerError::Status { status, .. }) => {
                !(status.is_client_error() || status.is_server_error())
            }
            _ => false,
        }
    }

    fn kind(&self) -> &str {
        match self {
            _ if self.is_internal() => "internal_error",
            ApiError::UnsupportedMediaType(_) => "unsupported_media_type",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Decode(_) => "decode_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::MethodNotAllowed { .. } => "method_not_allowed",
            ApiError::Handler(HandlerError::Status { kind, .. }) => kind.as_str(),
            _ => "internal_error",
        }
    }

    /// The body sent to the client.
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            _ if self.is_internal() => INTERNAL_MESSAGE.to_string(),
            ApiError::Decode(e) => e.message().to_string(),
            ApiError::Handler(HandlerError::Status { message, .. }) => message.clone(),
            other => other.to_string(),
        };
        ErrorBody {
            error: self.kind().to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.body())).into_response();

        if let ApiError::MethodNotAllowed { allowed, .. } = &self {
            let allow = allowed
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_decode_error_maps_to_400() {
        let err = ApiError::from(DecodeError::new("expected value at line 1 column 1"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "decode_error");
        assert_eq!(body["message"], "expected value at line 1 column 1");
    }

    #[tokio::test]
    async fn test_tagged_handler_status_is_honored() {
        let err = ApiError::from(HandlerError::status(
            StatusCode::CONFLICT,
            "journey_exists",
            "a journey with that name exists",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "journey_exists");
        assert_eq!(body["message"], "a journey with that name exists");
    }

    #[tokio::test]
    async fn test_non_error_status_tag_degrades_to_500() {
        let err = ApiError::from(HandlerError::status(StatusCode::OK, "odd", "not an error"));
        assert!(err.is_internal());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_internal_error_text_is_not_leaked() {
        let err = ApiError::from(HandlerError::internal("db password rejected for user admin"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn test_method_not_allowed_sets_allow_header() {
        let err = ApiError::MethodNotAllowed {
            method: Method::GET,
            allowed: vec![Method::POST, Method::PUT],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST, PUT");
    }
}
