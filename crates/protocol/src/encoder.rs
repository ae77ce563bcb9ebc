//! Request encoder: turns one call into a `multipart/form-data` body.
//!
//! Every body starts with the three protocol fields (`api_key`, `section`,
//! `action`) followed by the caller's parameters. Scalars become plain form
//! fields; [`Parameter::FilePayload`] values become file parts. Part framing
//! follows RFC 7578 with CRLF line endings.
//!
//! The body and its `Content-Type` header value are produced together from
//! one boundary so they can never disagree.

use uuid::Uuid;

use crate::{ApiKey, Parameter, Parameters};

/// Field carrying the credential.
pub const API_KEY_FIELD: &str = "api_key";

/// Field carrying the resource section.
pub const SECTION_FIELD: &str = "section";

/// Field carrying the action name.
pub const ACTION_FIELD: &str = "action";

const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// An encoded request body together with the boundary that delimits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    /// The boundary string separating parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `Content-Type` header value matching this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The encoded body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the value, returning the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Encodes a call into a multipart body.
///
/// Section and action are taken as plain strings and sent as-is; the remote
/// side decides whether the pair is legal. Names and values are not
/// validated beyond escaping quotes in `Content-Disposition` parameters.
pub fn encode_request(
    api_key: &ApiKey,
    section: &str,
    action: &str,
    parameters: &Parameters,
) -> MultipartBody {
    let mut writer = FormWriter::new(new_boundary());

    writer.field(API_KEY_FIELD, api_key.as_str());
    writer.field(SECTION_FIELD, section);
    writer.field(ACTION_FIELD, action);

    for (name, parameter) in parameters.iter() {
        match parameter {
            Parameter::Scalar(value) => writer.field(name, value),
            Parameter::FilePayload { file_name, content } => {
                writer.file(name, file_name, content)
            }
        }
    }

    let body = writer.finish();
    tracing::trace!(
        section,
        action,
        parameters = parameters.len(),
        bytes = body.body.len(),
        "encoded multipart request"
    );
    body
}

/// Generates a fresh boundary. 32 hex digits make a collision with part
/// content vanishingly unlikely.
fn new_boundary() -> String {
    format!("codereadr-{}", Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Part writer
// ---------------------------------------------------------------------------

struct FormWriter {
    boundary: String,
    body: Vec<u8>,
}

impl FormWriter {
    fn new(boundary: String) -> Self {
        Self {
            boundary,
            body: Vec::new(),
        }
    }

    fn field(&mut self, name: &str, value: &str) {
        self.open_part();
        self.header(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quotes(name)
        ));
        self.content(value);
    }

    fn file(&mut self, name: &str, file_name: &str, content: &str) {
        self.open_part();
        self.header(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(name),
            escape_quotes(file_name)
        ));
        self.header(&format!("Content-Type: {FILE_CONTENT_TYPE}"));
        self.content(content);
    }

    fn open_part(&mut self) {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    fn header(&mut self, line: &str) {
        self.body.extend_from_slice(line.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    fn content(&mut self, value: &str) {
        self.body.extend_from_slice(b"\r\n");
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    fn finish(mut self) -> MultipartBody {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--\r\n");
        MultipartBody {
            boundary: self.boundary,
            body: self.body,
        }
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
