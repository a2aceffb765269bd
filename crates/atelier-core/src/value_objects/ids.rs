//! Opaque identifiers for messages and users
//!
//! Both are UUIDs on the wire and in storage. They are distinct types so a
//! user id can never be passed where a message id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error when parsing an identifier from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID
            #[inline]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the inner UUID
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Unique identifier of a direct message
    MessageId
}

uuid_id! {
    /// Opaque identifier of a platform user, as asserted by the identity layer
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = MessageId::generate();
        let parsed: MessageId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let raw = "  6f1c2a9e-8d55-4c6b-9f0e-3b7a1d2c4e5f ";
        assert!(UserId::parse(raw).is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(MessageId::parse("m1"), Err(IdParseError::InvalidFormat));
        assert_eq!(UserId::parse(""), Err(IdParseError::InvalidFormat));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(MessageId::generate(), MessageId::generate());
    }
}
