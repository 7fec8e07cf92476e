//! JSON codec.
//!
//! # Responsibilities
//! - Accept `application/json` and `application/*+json` request bodies
//! - Decode into any `DeserializeOwned` type
//! - Encode any `Serialize` type
//!
//! # Design Decisions
//! - Media type parameters (e.g. `charset`) are ignored
//! - An empty body is decoded as `{}` so all-default types still decode
//! - Unknown fields are ignored (serde's default behaviour)

use axum::body::Bytes;
use axum::http::HeaderValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DecodeError, Decoder, EncodeError, Encoder};

/// Media type produced by [`Json`].
pub const CONTENT_TYPE: &str = "application/json";

/// JSON body codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Json {
    fn is_json(content_type: &HeaderValue) -> bool {
        let Ok(value) = content_type.to_str() else {
            return false;
        };
        match value.parse::<mime::Mime>() {
            Ok(media) => {
                media.type_() == mime::APPLICATION
                    && (media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON))
            }
            Err(_) => false,
        }
    }
}

impl<T> Decoder<T> for Json
where
    T: DeserializeOwned + 'static,
{
    fn accepts(&self, content_type: Option<&HeaderValue>) -> bool {
        content_type.is_some_and(Self::is_json)
    }

    fn decode(&self, body: &[u8]) -> Result<T, DecodeError> {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };
        serde_json::from_slice(body).map_err(|e| DecodeError::new(e.to_string()))
    }
}

impl<T> Encoder<T> for Json
where
    T: Serialize + 'static,
{
    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn encode(&self, value: &T) -> Result<Bytes, EncodeError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| EncodeError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serializer};

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Trip {
        name: String,
        start: DateTime<Utc>,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Filter {
        #[serde(default)]
        name: String,
        #[serde(default)]
        active: bool,
    }

    struct Unrepresentable;

    impl Serialize for Unrepresentable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value has no JSON form"))
        }
    }

    fn accepts(value: &str) -> bool {
        <Json as Decoder<Trip>>::accepts(&Json, Some(&HeaderValue::from_str(value).unwrap()))
    }

    #[test]
    fn test_accepts_json_media_types() {
        assert!(accepts("application/json"));
        assert!(accepts("application/json; charset=utf-8"));
        assert!(accepts("Application/JSON"));
        assert!(accepts("application/problem+json"));
    }

    #[test]
    fn test_rejects_other_media_types() {
        assert!(!accepts("text/plain"));
        assert!(!accepts("application/xml"));
        assert!(!accepts("not a media type"));
        assert!(!<Json as Decoder<Trip>>::accepts(&Json, None));
    }

    #[test]
    fn test_decodes_timestamps_and_ignores_unknown_fields() {
        let trip: Trip = Json
            .decode(br#"{"name":"Trip","start":"2024-01-01T00:00:00Z","extra":1}"#)
            .unwrap();
        assert_eq!(trip.name, "Trip");
        assert_eq!(trip.start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let result: Result<Trip, _> = Json.decode(b"{\"name\":");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_timestamp_is_decode_error() {
        let result: Result<Trip, _> = Json.decode(br#"{"name":"Trip","start":"yesterday"}"#);
        assert!(!result.unwrap_err().message().is_empty());
    }

    #[test]
    fn test_empty_body_decodes_to_zero_value_when_permitted() {
        let filter: Filter = Json.decode(b"").unwrap();
        assert_eq!(filter, Filter::default());

        let partial: Filter = Json.decode(br#"{"active":true}"#).unwrap();
        assert_eq!(partial.name, "");
        assert!(partial.active);
    }

    #[test]
    fn test_empty_body_is_decode_error_for_required_fields() {
        let result: Result<Trip, _> = Json.decode(b"");
        assert!(result.is_err());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let trip: Trip = Json
            .decode(br#"{"name":"Trip","start":"2024-01-01T00:00:00Z"}"#)
            .unwrap();
        let first = Json.encode(&trip).unwrap();
        let second = Json.encode(&trip).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            &first[..],
            br#"{"name":"Trip","start":"2024-01-01T00:00:00Z"}"#
        );
    }

    #[test]
    fn test_unrepresentable_value_is_encode_error() {
        let result = Json.encode(&Unrepresentable);
        assert!(result.is_err());
    }
}
