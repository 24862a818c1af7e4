//! Payload domain - fixed-layout calldata for the Ambient swap entry point

mod word;
mod user_cmd;

pub use word::{Word, WORD_BYTES, WORD_HEX_CHARS};
pub use user_cmd::{
    command_fields, DirectionConstants, Field, PayloadTemplate, UserCmdPayload, AMOUNT_WORD,
    ARG_HEX_LEN, ARG_WORDS, CMD_WORDS,
};

use alloy::primitives::U256;
use std::str::FromStr;

use crate::shared::errors::EncodingError;

/// Parse a decimal (or 0x-hex) base-unit amount that must fit one word
pub fn parse_amount(value: &str) -> Result<U256, EncodingError> {
    U256::from_str(value.trim())
        .map_err(|e| EncodingError::InvalidAmount(value.to_string(), e.to_string()))
}
