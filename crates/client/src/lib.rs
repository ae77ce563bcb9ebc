//! CodeREADr API client.
//!
//! Wires the [`codereadr_protocol`] encoder and decoder to a [`Transport`]
//! and exposes one uniform contract: encode, send, decode.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and configuration loading live here.
//! Request encoding and response decoding rules live in
//! [`codereadr_protocol`]; this crate adds no protocol rules of its own.
//!
//! ## Example
//!
//! ```no_run
//! use codereadr_client::{ClientConfig, CodeReadrClient};
//! use codereadr_protocol::{Action, ApiKey, Parameters, Section, UsersRetrieve};
//!
//! # async fn run() -> Result<(), codereadr_client::ClientError> {
//! let key = ApiKey::new("my-api-key").expect("non-empty key");
//! let client = CodeReadrClient::new(ClientConfig::new(key))?;
//!
//! let users: UsersRetrieve = client
//!     .call(Section::Users, Action::Retrieve, &Parameters::new())
//!     .await?;
//! println!("{} users", users.count);
//! # Ok(())
//! # }
//! ```
//!
//! [`Transport`]: codereadr_protocol::Transport

pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use client::CodeReadrClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use http::HttpTransport;
