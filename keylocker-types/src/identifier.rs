use std::{fmt, str::FromStr};

use alloy_primitives::{B256, hex, keccak256};
use serde::{Deserialize, Serialize};

/// Opaque 32-byte identifier under which a key sequence is stored.
///
/// Identifiers are normally derived from a human-readable string via
/// [`Identifier::derive`]; uniqueness of the input string is the caller's
/// responsibility.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Identifier(B256);

impl Identifier {
    /// Derive an identifier as the keccak-256 digest of the given string.
    pub fn derive(uuid: &str) -> Self {
        Self(keccak256(uuid.as_bytes()))
    }
}

impl From<B256> for Identifier {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<[u8; 32]> for Identifier {
    fn from(value: [u8; 32]) -> Self {
        Self(B256::from(value))
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 32] = hex::decode_to_array(s)?;
        Ok(Self::from(bytes))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("malformed identifier: {0}")]
pub struct InvalidIdentifier(#[from] hex::FromHexError);
