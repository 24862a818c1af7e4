//! Fixed-width 32-byte ABI word

use alloy::primitives::{Address, U256};
use std::fmt;

use crate::shared::errors::EncodingError;

pub const WORD_BYTES: usize = 32;
pub const WORD_HEX_CHARS: usize = WORD_BYTES * 2;

/// A single left-padded, big-endian 32-byte word
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word([u8; WORD_BYTES]);

impl Word {
    pub const ZERO: Word = Word([0u8; WORD_BYTES]);

    pub fn from_u256(value: U256) -> Self {
        Self(value.to_be_bytes::<WORD_BYTES>())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_u256(U256::from(value))
    }

    /// 12 zero bytes followed by the 20 address bytes
    pub fn from_address(address: Address) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 20..].copy_from_slice(address.as_slice());
        Self(bytes)
    }

    /// Left-pad an arbitrary-length big-endian integer.
    ///
    /// Leading zero bytes are ignored; more than 32 significant bytes is an error.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, EncodingError> {
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let significant = &bytes[first..];
        if significant.len() > WORD_BYTES {
            return Err(EncodingError::WordOverflow(significant.len()));
        }
        let mut out = [0u8; WORD_BYTES];
        out[WORD_BYTES - significant.len()..].copy_from_slice(significant);
        Ok(Self(out))
    }

    /// Parse a hex integer of any length ("8ca0", "0x18b37", odd lengths allowed)
    pub fn from_hex(value: &str) -> Result<Self, EncodingError> {
        let digits = value.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        let significant = digits.trim_start_matches('0');
        if significant.len() > WORD_HEX_CHARS {
            return Err(EncodingError::WordOverflow(significant.len().div_ceil(2)));
        }
        let padded = format!("{:0>width$}", significant, width = WORD_HEX_CHARS);
        let bytes = hex::decode(&padded)
            .map_err(|e| EncodingError::InvalidHex(value.to_string(), e.to_string()))?;
        Self::from_be_slice(&bytes)
    }

    pub fn to_u256(&self) -> U256 {
        U256::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    /// 64 lowercase hex characters, no prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
