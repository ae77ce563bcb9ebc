//! Response decoder.
//!
//! Every response is XML with a top-level element carrying a `status` child
//! and, on failure, an `error` child:
//!
//! ```xml
//! <xml>
//!   <status>0</status>
//!   <error code="42">Invalid key</error>
//! </xml>
//! ```
//!
//! Decoding runs in two independent passes over the same immutable bytes.
//! The first pass reads only the [`Envelope`] and turns `status != 1` into
//! [`ResponseError::Api`]. Only when the envelope reports success does a
//! second pass deserialise the caller's typed result shape. Action-specific
//! shapes therefore never need to know about the envelope, and the envelope
//! never needs to know about them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::{DecodeStage, ResponseError};

/// `status` value signalling success.
pub const STATUS_OK: i64 = 1;

/// The protocol envelope present in every response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// `1` on success; anything else (including a missing or empty element)
    /// is failure.
    #[serde(default, deserialize_with = "zero_if_blank")]
    pub status: i64,

    /// Failure detail, when the server supplied one.
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

impl Envelope {
    /// Returns `true` if `status` equals [`STATUS_OK`].
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Converts a failure envelope into [`ResponseError::Api`].
    ///
    /// Absent detail becomes code `0` with an empty message.
    fn into_api_error(self) -> ResponseError {
        let detail = self.error.unwrap_or_default();
        ResponseError::Api {
            code: detail.code,
            message: detail.message,
        }
    }
}

/// The `<error code="...">message</error>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Numeric error code; a missing or empty attribute reads as `0`.
    #[serde(rename = "@code", default, deserialize_with = "zero_if_blank")]
    pub code: i64,

    /// Character data of the element. The XML reader trims leading and
    /// trailing whitespace, so the message is reported without it.
    #[serde(rename = "$text", default)]
    pub message: String,
}

/// Reads an integer, treating empty or whitespace-only text as `0`.
/// Non-numeric text is still an error.
fn zero_if_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(serde::de::Error::custom)
}

/// Decodes the envelope and fails if it does not report success.
pub fn decode_envelope(raw: &[u8]) -> Result<Envelope, ResponseError> {
    let envelope: Envelope =
        quick_xml::de::from_reader(raw).map_err(|source| ResponseError::Decode {
            stage: DecodeStage::Envelope,
            source,
        })?;

    tracing::debug!(status = envelope.status, "decoded response envelope");

    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(envelope.into_api_error())
    }
}

/// Checks the envelope only, for calls that carry no payload.
pub fn decode_status(raw: &[u8]) -> Result<(), ResponseError> {
    decode_envelope(raw).map(|_| ())
}

/// Checks the envelope, then decodes the same bytes into `R`.
///
/// A failing envelope is returned without attempting the second pass. If the
/// envelope reports success but `R` does not fit the body, the result is a
/// [`DecodeStage::TypedResult`] error; no partially decoded value escapes.
pub fn decode<R: DeserializeOwned>(raw: &[u8]) -> Result<R, ResponseError> {
    decode_envelope(raw)?;

    let result = quick_xml::de::from_reader(raw).map_err(|source| ResponseError::Decode {
        stage: DecodeStage::TypedResult,
        source,
    })?;

    tracing::debug!(
        shape = std::any::type_name::<R>(),
        "decoded typed result"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    #[derive(Debug, Deserialize)]
    struct Created {
        id: i64,
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        timestamp: Timestamp,
    }

    const CREATED: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
        <xml><status>1</status><id>1234</id></xml>";

    const INVALID_KEY: &[u8] =
        b"<xml><status>0</status><error code=\"42\">Invalid key</error></xml>";

    #[test]
    fn success_populates_the_typed_shape() {
        let created: Created = decode(CREATED).unwrap();
        assert_eq!(created.id, 1234);
    }

    #[test]
    fn success_without_target_is_ok() {
        assert!(decode_status(CREATED).is_ok());

        let envelope = decode_envelope(CREATED).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.error, None);
    }

    #[test]
    fn failure_reports_code_and_message_with_or_without_target() {
        let err = decode_status(INVALID_KEY).unwrap_err();
        assert_eq!(err.to_string(), "Invalid key [Error #42]");

        let err = decode::<Created>(INVALID_KEY).unwrap_err();
        assert_eq!(err.to_string(), "Invalid key [Error #42]");
        assert_eq!(err.api_error(), Some((42, "Invalid key")));
    }

    #[test]
    fn failure_does_not_require_the_typed_fields() {
        // The error response carries no <id>; the typed pass must not run.
        let err = decode::<Created>(INVALID_KEY).unwrap_err();
        assert!(matches!(err, ResponseError::Api { .. }));
    }

    #[test]
    fn failure_without_detail_defaults_to_zero_and_empty() {
        let err = decode_status(b"<xml><status>0</status></xml>").unwrap_err();
        assert_eq!(err.api_error(), Some((0, "")));
        assert_eq!(err.to_string(), " [Error #0]");
    }

    #[test]
    fn missing_status_is_a_failure() {
        let err = decode_status(b"<xml><id>3</id></xml>").unwrap_err();
        assert!(matches!(err, ResponseError::Api { code: 0, .. }));
    }

    #[test]
    fn empty_status_reads_as_zero() {
        for raw in [
            &b"<xml><status></status></xml>"[..],
            &b"<xml><status/></xml>"[..],
            &b"<xml><status>  </status></xml>"[..],
        ] {
            let err = decode_status(raw).unwrap_err();
            assert_eq!(err.api_error(), Some((0, "")));
        }
    }

    #[test]
    fn empty_error_code_reads_as_zero() {
        let raw = b"<xml><status>0</status><error code=\"\">Bad request</error></xml>";
        let err = decode_status(raw).unwrap_err();
        assert_eq!(err.to_string(), "Bad request [Error #0]");
    }

    #[test]
    fn non_numeric_status_is_a_decode_error() {
        let err = decode_status(b"<xml><status>ok</status></xml>").unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                stage: DecodeStage::Envelope,
                ..
            }
        ));
    }

    #[test]
    fn error_message_is_reported_without_surrounding_whitespace() {
        let raw = b"<xml><status>0</status><error code=\"5\">  spaced msg  </error></xml>";
        let err = decode_status(raw).unwrap_err();
        assert_eq!(err.api_error(), Some((5, "spaced msg")));
    }

    #[test]
    fn status_other_than_one_is_a_failure() {
        let err = decode_status(b"<xml><status>2</status><error code=\"7\">Nope</error></xml>")
            .unwrap_err();
        assert_eq!(err.api_error(), Some((7, "Nope")));
    }

    #[test]
    fn malformed_markup_fails_at_the_envelope() {
        let err = decode_status(b"<xml><status>1</stat").unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                stage: DecodeStage::Envelope,
                ..
            }
        ));
    }

    #[test]
    fn shape_mismatch_after_success_is_a_decode_error() {
        let err = decode::<Created>(b"<xml><status>1</status></xml>").unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                stage: DecodeStage::TypedResult,
                ..
            }
        ));
    }

    #[test]
    fn bad_timestamp_in_typed_result_is_a_decode_error() {
        let raw = b"<xml><status>1</status><timestamp>2021-03-04T13:45:09Z</timestamp></xml>";
        let err = decode::<Stamped>(raw).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Decode {
                stage: DecodeStage::TypedResult,
                ..
            }
        ));

        let ok = b"<xml><status>1</status><timestamp>2021-03-04 13:45:09</timestamp></xml>";
        let stamped: Stamped = decode(ok).unwrap();
        assert_eq!(stamped.timestamp.to_string(), "2021-03-04 13:45:09");
    }
}
