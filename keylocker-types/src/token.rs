use std::{fmt, str::FromStr};

use alloy_primitives::{Address, hex};
use serde::{Deserialize, Serialize};

/// A single stored key: a 20-byte address-like token, rendered as 0x-hex.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct KeyToken(Address);

impl From<Address> for KeyToken {
    fn from(value: Address) -> Self {
        Self(value)
    }
}

impl From<[u8; 20]> for KeyToken {
    fn from(value: [u8; 20]) -> Self {
        Self(Address::from(value))
    }
}

impl FromStr for KeyToken {
    type Err = InvalidKeyToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 20] = hex::decode_to_array(s)?;
        Ok(Self::from(bytes))
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("malformed key token: {0}")]
pub struct InvalidKeyToken(#[from] hex::FromHexError);
