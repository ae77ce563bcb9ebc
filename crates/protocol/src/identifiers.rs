//! Protocol identifiers: the credential newtype and the closed sets of
//! section, action, and service-validation identifiers the API recognises.
//!
//! The request encoder is parametric over `&str` and never validates these;
//! the enums exist so typed call sites cannot misspell a wire identifier.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Macro for wire-identifier enums.
// Generates: enum (Copy), ALL, as_str(), Display, FromStr.
// ---------------------------------------------------------------------------
macro_rules! wire_enum {
    (
        $(#[$attr:meta])*
        $name:ident, $kind:literal {
            $(
                $(#[$vattr:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vattr])*
                $variant,
            )+
        }

        impl $name {
            /// Every identifier in this set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the identifier exactly as it is sent on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownIdentifier {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// A string did not name any member of an identifier set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} identifier: '{value}'")]
pub struct UnknownIdentifier {
    /// Which identifier set was searched (`"section"`, `"action"`, ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// The static API key attached to every call as the `api_key` field.
///
/// Held by value inside each client's configuration; it is never shared
/// through global state. `Debug` redacts the key material.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new key, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() { None } else { Some(Self(v)) }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Action catalog
// ---------------------------------------------------------------------------

wire_enum! {
    /// Resource section a call is addressed to (the `section` field).
    Section, "section" {
        Databases => "databases",
        Scans => "scans",
        Services => "services",
        Users => "users",
    }
}

wire_enum! {
    /// Operation requested within a section (the `action` field).
    ///
    /// Not every action is meaningful for every section; the remote side is
    /// the arbiter of which pairs are legal.
    Action, "action" {
        AddQuestion => "addquestion",
        AddUserPermission => "adduserpermission",
        AddValue => "addvalue",
        Create => "create",
        Delete => "delete",
        RemoveQuestion => "removequestion",
        Retrieve => "retrieve",
        ShowValues => "showvalues",
        Update => "update",
        Upload => "upload",
    }
}

wire_enum! {
    /// How a service validates scanned values.
    ///
    /// Sent as a scalar parameter value when creating or updating services.
    ServiceValidationMethod, "validation method" {
        Record => "record",
        OnDeviceRecord => "ondevicerecord",
        Database => "database",
        OnDeviceDatabase => "ondevicedatabase",
        Postback => "postback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_and_action_parse_their_own_wire_form() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>(), Ok(*section));
        }
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(*action));
        }
    }

    #[test]
    fn unknown_identifier_names_the_set() {
        let err = "purge".parse::<Action>().unwrap_err();
        assert_eq!(err.kind, "action");
        assert_eq!(err.to_string(), "Unknown action identifier: 'purge'");
    }

    #[test]
    fn wire_identifiers_are_lowercase_concatenations() {
        assert_eq!(Action::AddUserPermission.as_str(), "adduserpermission");
        assert_eq!(Action::ShowValues.as_str(), "showvalues");
        assert_eq!(
            ServiceValidationMethod::OnDeviceDatabase.to_string(),
            "ondevicedatabase"
        );
    }

    #[test]
    fn api_key_rejects_empty_and_redacts_debug() {
        assert!(ApiKey::new("").is_none());

        let key = ApiKey::new("secret-123").unwrap();
        assert_eq!(key.as_str(), "secret-123");
        assert!(!format!("{key:?}").contains("secret-123"));
    }
}
