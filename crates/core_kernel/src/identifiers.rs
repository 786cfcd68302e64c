//! Strongly-typed identifiers and catalogue codes
//!
//! Quote records get UUID-backed identifiers. Product, occupancy and add-on
//! codes are short strings from the rate tables; wrapping them in newtypes
//! keeps a product code from ever being passed where an occupancy code is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

/// Defines a string code newtype.
///
/// `$upper` controls whether the code is upper-cased on parse. Product and
/// add-on codes are case-insensitive in the tables; occupancy codes such as
/// `1001_2` are kept verbatim apart from trimming.
macro_rules! define_code {
    ($name:ident, $label:literal, $upper:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses and normalises a code
            pub fn parse(raw: &str) -> Result<Self, CoreError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::validation(concat!($label, " must not be empty")));
                }
                if $upper {
                    Ok(Self(trimmed.to_ascii_uppercase()))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> String {
                code.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(QuoteId, "QTE");

define_code!(ProductCode, "product code", true);
define_code!(OccupancyCode, "occupancy code", false);
define_code!(AddOnCode, "add-on code", true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_id_display() {
        let id = QuoteId::new();
        assert!(id.to_string().starts_with("QTE-"));
    }

    #[test]
    fn test_quote_id_parsing() {
        let original = QuoteId::new_v7();
        let parsed: QuoteId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_product_code_is_normalised() {
        let code = ProductCode::parse("  ubgr ").unwrap();
        assert_eq!(code.as_str(), "UBGR");
    }

    #[test]
    fn test_occupancy_code_keeps_case() {
        let code = OccupancyCode::parse(" 1001_2 ").unwrap();
        assert_eq!(code.as_str(), "1001_2");
    }

    #[test]
    fn test_empty_code_rejected() {
        assert!(AddOnCode::parse("   ").is_err());
    }

    #[test]
    fn test_code_serde_roundtrip_normalises() {
        let code: AddOnCode = serde_json::from_str("\"pa_proposer\"").unwrap();
        assert_eq!(code.as_str(), "PA_PROPOSER");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"PA_PROPOSER\"");
    }
}
