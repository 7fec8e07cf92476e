//! Codec for operations that take no request body.

use axum::http::HeaderValue;

use super::{DecodeError, Decoder};

/// Accepts any content type and discards the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Decoder<()> for Empty {
    fn accepts(&self, _content_type: Option<&HeaderValue>) -> bool {
        true
    }

    fn decode(&self, _body: &[u8]) -> Result<(), DecodeError> {
        Ok(())
    }
}
