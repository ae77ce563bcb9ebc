//! Protocol layer for the CodeREADr action-based API.
//!
//! A call is a resource section, an action name, and a set of named
//! parameters. This crate encodes a call into a single `multipart/form-data`
//! body and decodes the XML response into either a typed result or a
//! structured error.
//!
//! ## Architectural Layer
//!
//! **Protocol + port definitions.** This crate has no I/O dependencies. It
//! defines the [`Transport`] port; `codereadr-client` supplies the HTTP
//! implementation and the call-and-decode glue.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `ApiKey`, `Section`, `Action`, `ServiceValidationMethod` |
//! | [`types`] | `Parameter`, `Parameters`, `Timestamp` |
//! | [`encoder`] | Multipart request encoding |
//! | [`decoder`] | Envelope check and typed-result decoding |
//! | [`responses`] | Typed result shapes for the known actions |
//! | [`transport`] | The `Transport` port |
//! | [`errors`] | `ResponseError` and `DecodeStage` |

pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod identifiers;
pub mod responses;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use decoder::{decode, decode_envelope, decode_status, Envelope, ErrorDetail, STATUS_OK};
pub use encoder::{encode_request, MultipartBody, ACTION_FIELD, API_KEY_FIELD, SECTION_FIELD};
pub use errors::{DecodeStage, ResponseError};
pub use identifiers::{Action, ApiKey, Section, ServiceValidationMethod, UnknownIdentifier};
pub use responses::{
    CreateResult, Database, DatabaseValue, DatabaseValues, DatabasesRetrieve, Scan, ScanService,
    ScansRetrieve, Service, ServicesRetrieve, User, UsersRetrieve,
};
pub use transport::{Transport, TransportError, TransportResponse};
pub use types::{Parameter, Parameters, Timestamp, TimestampParseError, TIMESTAMP_FORMAT};
