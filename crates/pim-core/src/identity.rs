//! # Record Name Newtypes
//!
//! Documents in the host framework are addressed by an opaque string name.
//! Each kind of record gets a distinct type so a [`VendorAttributeId`] cannot
//! be passed where a [`PimAttributeId`] is expected.
//!
//! ## Validation
//!
//! Names are trimmed and must be non-empty. Deserialization routes through
//! the same constructor, so a blank name in a response is rejected rather
//! than silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Defines a validated, string-backed record name type.
macro_rules! record_name {
    ($(#[$meta:meta])* $ty:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $ty(String);

        impl $ty {
            /// Create a name, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] for blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Access the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

record_name!(
    /// Name of a `PIM Vendor` record.
    VendorId,
    "vendor"
);

record_name!(
    /// Name of a `PIM Vendor Attribute` record (one row of the mapping table).
    VendorAttributeId,
    "vendor attribute"
);

record_name!(
    /// Name of a canonical `PIM Attribute` record (a mapping target).
    PimAttributeId,
    "PIM attribute"
);

record_name!(
    /// Name of a `PIM Item` record.
    ItemName,
    "item"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        let id = VendorId::new("  ACME  ").unwrap();
        assert_eq!(id.as_str(), "ACME");
        assert_eq!(id.to_string(), "ACME");
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = PimAttributeId::new("   ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyIdentifier {
                kind: "PIM attribute"
            }
        );
        assert_eq!(err.to_string(), "PIM attribute must not be empty");
    }

    #[test]
    fn deserialize_routes_through_validation() {
        let ok: VendorAttributeId = serde_json::from_str("\"VA-0001\"").unwrap();
        assert_eq!(ok.as_str(), "VA-0001");
        assert!(serde_json::from_str::<VendorAttributeId>("\"\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ItemName::new("ACME-001").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ACME-001\"");
    }

    #[test]
    fn from_str_parses() {
        let id: VendorId = "globex".parse().unwrap();
        assert_eq!(id.as_ref(), "globex");
    }
}
