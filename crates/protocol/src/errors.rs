//! Error types for decoding API responses.
//!
//! [`ResponseError`] covers both ways a response can fail the caller: the
//! server explicitly reported failure, or the bytes did not match the shape
//! being decoded. Transport failures are defined next to the port in
//! [`crate::transport`].

use thiserror::Error;

/// Which decoding pass failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// The protocol envelope (`status` / `error`) common to every response.
    Envelope,
    /// The caller-supplied, action-specific result shape.
    TypedResult,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeStage::Envelope => f.write_str("response envelope"),
            DecodeStage::TypedResult => f.write_str("typed result"),
        }
    }
}

/// A response could not be turned into a successful result.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The server answered with `status != 1`.
    ///
    /// A missing `error` element, code, or message decodes as `0` / empty, so
    /// "no error detail" and "error code 0" are indistinguishable here.
    #[error("{message} [Error #{code}]")]
    Api {
        /// Numeric error code from the `code` attribute.
        code: i64,
        /// Character data of the `error` element.
        message: String,
    },

    /// The response bytes did not match the expected XML shape.
    ///
    /// At [`DecodeStage::TypedResult`] this means the server reported success
    /// but the caller's shape does not fit what was returned. Timestamp parse
    /// failures inside a typed result surface here too.
    #[error("Failed to decode {stage}: {source}")]
    Decode {
        /// The pass that failed.
        stage: DecodeStage,
        /// The underlying deserialisation error.
        #[source]
        source: quick_xml::DeError,
    },
}

impl ResponseError {
    /// Returns `(code, message)` when the server reported the failure.
    pub fn api_error(&self) -> Option<(i64, &str)> {
        match self {
            ResponseError::Api { code, message } => Some((*code, message)),
            ResponseError::Decode { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_uses_bracketed_code_format() {
        let err = ResponseError::Api {
            code: 42,
            message: "Invalid key".into(),
        };
        assert_eq!(err.to_string(), "Invalid key [Error #42]");
        assert_eq!(err.api_error(), Some((42, "Invalid key")));
    }

    #[test]
    fn missing_detail_formats_as_zero_and_empty() {
        let err = ResponseError::Api {
            code: 0,
            message: String::new(),
        };
        assert_eq!(err.to_string(), " [Error #0]");
    }
}
