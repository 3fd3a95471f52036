//! Strongly-typed identifiers used across the domain.
//!
//! Catalog ids are short human-readable slugs (`"a4"`, `"matte-300gsm"`)
//! rather than generated keys, so every identifier wraps a `String`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a size option within a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeId(String);

/// Identifier of a paper-type option within a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaperTypeId(String);

/// Identifier of a finishing option within a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinishingId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw id without validation.
            ///
            /// Use `str::parse` when the value comes from untrusted input.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_string_newtype!(ProductId, "ProductId");
impl_string_newtype!(SizeId, "SizeId");
impl_string_newtype!(PaperTypeId, "PaperTypeId");
impl_string_newtype!(FinishingId, "FinishingId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        let id: SizeId = " a4 ".parse().unwrap();
        assert_eq!(id.as_str(), "a4");

        let err = "   ".parse::<ProductId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidId("ProductId: empty".to_string()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FinishingId::new("round-corners");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"round-corners\"");

        let back: FinishingId = serde_json::from_str("\"round-corners\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_trims_and_rejects_blank() {
        let id: SizeId = serde_json::from_str("\" a4 \"").unwrap();
        assert_eq!(id, SizeId::new("a4"));

        for raw in ["\"\"", "\"   \""] {
            let err = serde_json::from_str::<ProductId>(raw).unwrap_err();
            assert!(err.to_string().contains("ProductId: empty"), "{err}");
        }
    }
}
