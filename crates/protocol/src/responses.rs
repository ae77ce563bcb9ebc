//! Typed result shapes for the known actions.
//!
//! Each shape holds only its action-specific fields; the envelope is checked
//! by a separate decoding pass (see [`crate::decoder`]). List results are
//! repeated sibling elements alongside a `count` element. Record identifiers
//! are carried as `id` attributes.

use serde::Deserialize;

use crate::Timestamp;

/// Result of any `create` action: the identifier of the new record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateResult {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// Result of `users` / `retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsersRetrieve {
    pub count: u32,
    #[serde(rename = "user", default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(default)]
    pub username: String,
}

// ---------------------------------------------------------------------------
// databases
// ---------------------------------------------------------------------------

/// Result of `databases` / `retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabasesRetrieve {
    pub count: u32,
    #[serde(rename = "database", default)]
    pub databases: Vec<Database>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Database {
    #[serde(rename = "@id")]
    pub id: i64,
}

/// Result of `databases` / `showvalues`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseValues {
    pub count: u32,
    #[serde(rename = "value", default)]
    pub values: Vec<DatabaseValue>,
}

/// One stored database value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseValue {
    /// The response text associated with the value.
    #[serde(default)]
    pub response: String,
}

// ---------------------------------------------------------------------------
// services
// ---------------------------------------------------------------------------

/// Result of `services` / `retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServicesRetrieve {
    pub count: u32,
    #[serde(rename = "service", default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "descriptionFromDb", default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// scans
// ---------------------------------------------------------------------------

/// Result of `scans` / `retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScansRetrieve {
    pub count: u32,
    #[serde(rename = "scan", default)]
    pub scans: Vec<Scan>,
}

/// One recorded scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scan {
    #[serde(rename = "@id")]
    pub id: i64,

    /// The service the scan was recorded against.
    pub service: ScanService,

    /// Device-assigned transaction identifier.
    #[serde(default)]
    pub tid: String,

    /// The scanned value.
    #[serde(default)]
    pub result: String,

    /// Server wall-clock time of the scan.
    pub timestamp: Timestamp,

    #[serde(default)]
    pub answer: String,
}

/// `<service id="...">name</service>` inside a scan record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanService {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "$text", default)]
    pub name: String,
}
