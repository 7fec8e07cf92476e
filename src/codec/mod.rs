//! Body codecs.
//!
//! # Data Flow
//! ```text
//! Request body (bytes + content-type)
//!     → Decoder::accepts (content negotiation)
//!     → Decoder::decode  → typed request
//!
//! Typed response
//!     → Encoder::encode  → bytes
//!     → Encoder::content_type → response header
//! ```
//!
//! # Design Decisions
//! - Codecs are stateless unit structs, shared freely across requests
//! - Encoding is fully buffered so a response is never half-written
//! - Negotiation happens before the body is read

pub mod empty;
pub mod json;

use axum::body::Bytes;
use axum::http::HeaderValue;

pub use empty::Empty;
pub use json::Json;

/// Error returned when a request body cannot be turned into the target type.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned when a response value cannot be represented in the wire format.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns raw request bodies into `T`.
pub trait Decoder<T>: Send + Sync + 'static {
    /// Returns true if a request with this `content-type` header can be decoded.
    fn accepts(&self, content_type: Option<&HeaderValue>) -> bool;

    /// Decode a fully buffered body.
    fn decode(&self, body: &[u8]) -> Result<T, DecodeError>;
}

/// Turns `T` into a raw response body.
pub trait Encoder<T>: Send + Sync + 'static {
    /// Media type written to the `content-type` response header.
    fn content_type(&self) -> &'static str;

    /// Encode a value. Equal values always produce identical bytes.
    fn encode(&self, value: &T) -> Result<Bytes, EncodeError>;
}
