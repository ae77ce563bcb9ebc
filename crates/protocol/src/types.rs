//! Value types shared by the encoder and decoder.
//!
//! [`Parameter`] and [`Parameters`] carry caller input into the request
//! encoder; [`Timestamp`] is the custom date/time scalar found inside typed
//! results.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// One caller-supplied request parameter.
///
/// The variant decides how the parameter is written into the multipart body:
/// a plain form field, or a named file part whose content is the given text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// Sent as an ordinary form field.
    Scalar(String),

    /// Sent as a file part. Used by actions that take file-shaped input,
    /// e.g. bulk value uploads.
    FilePayload {
        /// The `filename` reported in the part's `Content-Disposition`.
        file_name: String,
        /// The file content.
        content: String,
    },
}

impl Parameter {
    /// Creates a scalar parameter from any value's textual form.
    pub fn scalar(value: impl std::fmt::Display) -> Self {
        Parameter::Scalar(value.to_string())
    }

    /// Creates a file payload parameter.
    pub fn file_payload(file_name: impl Into<String>, content: impl std::fmt::Display) -> Self {
        Parameter::FilePayload {
            file_name: file_name.into(),
            content: content.to_string(),
        }
    }

    /// Returns `true` for [`Parameter::FilePayload`].
    pub fn is_file(&self) -> bool {
        matches!(self, Parameter::FilePayload { .. })
    }
}

// ---------------------------------------------------------------------------

/// The named parameters of a single call.
///
/// Field names are unique: inserting an existing name replaces its value.
/// Iteration order is by name; the protocol assigns no meaning to order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, Parameter>);

impl Parameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar field, consuming and returning `self` for chaining.
    #[must_use]
    pub fn scalar(mut self, name: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.insert(name, Parameter::scalar(value));
        self
    }

    /// Adds a file part whose file name equals the field name.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, content: impl std::fmt::Display) -> Self {
        let name = name.into();
        let parameter = Parameter::file_payload(name.clone(), content);
        self.insert(name, parameter);
        self
    }

    /// Inserts a parameter, returning the value it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, parameter: Parameter) -> Option<Parameter> {
        self.0.insert(name.into(), parameter)
    }

    /// Returns the parameter stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.get(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field name, parameter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.0.iter().map(|(name, p)| (name.as_str(), p))
    }
}

impl<K: Into<String>> FromIterator<(K, Parameter)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, Parameter)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (name, parameter) in iter {
            params.insert(name, parameter);
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Wire layout of [`Timestamp`] values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Byte offsets of the separators in `YYYY-MM-DD HH:MM:SS`.
const TIMESTAMP_SEPARATORS: [(usize, u8); 5] =
    [(4, b'-'), (7, b'-'), (10, b' '), (13, b':'), (16, b':')];

const TIMESTAMP_LEN: usize = 19;

const SECONDS_RANGE: std::ops::Range<usize> = 17..19;

/// A `YYYY-MM-DD HH:MM:SS` string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid timestamp '{input}': expected YYYY-MM-DD HH:MM:SS")]
pub struct TimestampParseError {
    /// The rejected input.
    pub input: String,
}

/// A zone-naive wall-clock time as reported by the server.
///
/// The server sends no zone indicator, so the value is kept exactly as
/// presented and never converted to UTC or local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parses exactly `YYYY-MM-DD HH:MM:SS` (24-hour clock, zero-padded,
    /// no fractional seconds, no zone).
    pub fn parse(input: &str) -> Result<Self, TimestampParseError> {
        let invalid = || TimestampParseError {
            input: input.to_string(),
        };

        // chrono tolerates unpadded fields and signed years; the layout check
        // pins every width before handing over for range validation.
        let bytes = input.as_bytes();
        if bytes.len() != TIMESTAMP_LEN {
            return Err(invalid());
        }
        for (i, b) in bytes.iter().enumerate() {
            let ok = match TIMESTAMP_SEPARATORS.iter().find(|(pos, _)| *pos == i) {
                Some((_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            };
            if !ok {
                return Err(invalid());
            }
        }

        // chrono reads second 60 as a leap second; the wire format has none.
        if &input[SECONDS_RANGE] > "59" {
            return Err(invalid());
        }

        NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Creates a [`Timestamp`] from a [`NaiveDateTime`].
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`NaiveDateTime`].
    pub fn as_datetime(self) -> NaiveDateTime {
        self.0
    }

    /// Calendar year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month of the year, `1..=12`.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day of the month, `1..=31`.
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Hour of the day, `0..=23`.
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    /// Minute of the hour, `0..=59`.
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Second of the minute, `0..=59`.
    pub fn second(self) -> u32 {
        self.0.second()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_server_layout() {
        let ts = Timestamp::parse("2021-03-04 13:45:09").unwrap();
        assert_eq!(ts.year(), 2021);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.day(), 4);
        assert_eq!(ts.hour(), 13);
        assert_eq!(ts.minute(), 45);
        assert_eq!(ts.second(), 9);
        assert_eq!(ts.to_string(), "2021-03-04 13:45:09");
    }

    #[test]
    fn rejects_other_layouts() {
        for input in [
            "2021-03-04T13:45:09Z",
            "03/04/2021 13:45:09",
            "2021-3-4 13:45:09",
            "2021-03-04 13:45:09.123",
            "2021-03-04 13:45",
            " 2021-03-04 13:45:09",
            "",
        ] {
            let err = Timestamp::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(Timestamp::parse("2021-13-04 13:45:09").is_err());
        assert!(Timestamp::parse("2021-02-30 13:45:09").is_err());
        assert!(Timestamp::parse("2021-03-04 24:00:00").is_err());
        assert!(Timestamp::parse("2021-03-04 13:60:09").is_err());
        assert!(Timestamp::parse("2021-03-04 13:45:60").is_err());
        assert!(Timestamp::parse("2016-12-31 23:59:60").is_err());
        assert!(Timestamp::parse("2021-03-04 13:45:59").is_ok());
    }

    #[test]
    fn later_insert_replaces_earlier_value() {
        let mut params = Parameters::new().scalar("name", "first");
        let replaced = params.insert("name", Parameter::scalar("second"));

        assert_eq!(replaced, Some(Parameter::Scalar("first".into())));
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("name"), Some(&Parameter::Scalar("second".into())));
    }

    #[test]
    fn file_helper_uses_field_name_as_file_name() {
        let params = Parameters::new().file("upload", 42);
        assert_eq!(
            params.get("upload"),
            Some(&Parameter::FilePayload {
                file_name: "upload".into(),
                content: "42".into(),
            })
        );
        assert!(params.get("upload").unwrap().is_file());
    }
}
