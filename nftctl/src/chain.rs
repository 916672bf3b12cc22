//! Canonical chain identifiers.
//!
//! Wallet providers report chain ids in whatever encoding suits them:
//! `wallet_switchEthereumChain` wants 0x-prefixed hex, configuration files
//! and explorers use decimal. [`ChainId`] normalizes both to a numeric value
//! on parse so comparisons never depend on the source encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A numeric EIP-155 chain identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Creates a chain id from its numeric value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Renders the 0x-prefixed hex form wallet RPC methods expect.
    #[must_use]
    pub fn as_hex(self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Error returned when parsing an invalid chain id string.
#[derive(Debug, thiserror::Error)]
#[error("invalid chain id {0:?}")]
pub struct ChainIdFormatError(String);

impl FromStr for ChainId {
    type Err = ChainIdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse(),
        };
        parsed.map(Self).map_err(|_| ChainIdFormatError(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_to_the_same_value() {
        let dec: ChainId = "183".parse().unwrap();
        let hex: ChainId = "0xB7".parse().unwrap();
        assert_eq!(dec, hex);
        assert_eq!(dec.get(), 183);
    }

    #[test]
    fn displays_decimal_and_hex() {
        let id = ChainId::new(183);
        assert_eq!(id.to_string(), "183");
        assert_eq!(id.as_hex(), "0xb7");
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<ChainId>().is_err());
        assert!("0x".parse::<ChainId>().is_err());
        assert!("seven".parse::<ChainId>().is_err());
        assert!("-1".parse::<ChainId>().is_err());
    }

    #[test]
    fn serializes_as_a_number() {
        let id = ChainId::new(11_155_111);
        assert_eq!(serde_json::to_string(&id).unwrap(), "11155111");
        let back: ChainId = serde_json::from_str("11155111").unwrap();
        assert_eq!(back, id);
    }
}
