//! Account address domain model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// An Ethereum account address
///
/// Stored lowercased so that equality is case-insensitive: providers deliver
/// lowercase hex strings while users may paste checksummed (mixed-case) ones,
/// and both must compare equal when deciding whether a balance result is
/// still current.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address string
    ///
    /// Accepts `0x` followed by exactly 40 hex digits, in any case.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| Error::InvalidAddress(format!("missing 0x prefix: {}", raw)))?;

        if hex_part.len() != 40 {
            return Err(Error::InvalidAddress(format!(
                "expected 40 hex digits, got {}: {}",
                hex_part.len(),
                raw
            )));
        }
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidAddress(format!(
                "non-hex character in address: {}",
                raw
            )));
        }

        Ok(Self(format!("0x{}", hex_part.to_lowercase())))
    }

    /// The normalized (lowercase) string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened display form, e.g. `0x1234…abcd`
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase() {
        let addr = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap();
        assert_eq!(addr.as_str(), "0xdadb0d80178819f2319190d340ce9a924f783711");
    }

    #[test]
    fn test_parse_normalizes_checksummed() {
        let checksummed = Address::parse("0xdadB0d80178819F2319190D340ce9A924f783711").unwrap();
        let lowercase = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap();
        assert_eq!(checksummed, lowercase);
    }

    #[test]
    fn test_reject_missing_prefix() {
        let result = Address::parse("dadb0d80178819f2319190d340ce9a924f783711");
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_reject_wrong_length() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xdadb0d80178819f2319190d340ce9a924f78371100").is_err());
    }

    #[test]
    fn test_reject_non_hex() {
        let result = Address::parse("0xzzzb0d80178819f2319190d340ce9a924f783711");
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_short_form() {
        let addr = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap();
        assert_eq!(addr.short(), "0xdadb…3711");
    }
}
