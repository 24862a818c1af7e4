//! Calldata builder for the Ambient `userCmd(uint16 callpath, bytes cmd)` entry point

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use super::word::{Word, WORD_BYTES, WORD_HEX_CHARS};
use crate::infrastructure::blockchain::contracts::ICrocSwapDex;
use crate::shared::types::Direction;

/// Words in the `cmd` byte string
pub const CMD_WORDS: usize = 10;

/// Words in the ABI argument block: callpath, offset, length, then `cmd`
pub const ARG_WORDS: usize = 3 + CMD_WORDS;

/// `"0x"` + 13 words of hex
pub const ARG_HEX_LEN: usize = 2 + ARG_WORDS * WORD_HEX_CHARS;

/// Offset of the dynamic `cmd` argument: two head words
const CMD_OFFSET: u64 = (2 * WORD_BYTES) as u64;

/// Position of the trade amount inside `cmd`
pub const AMOUNT_WORD: usize = 5;

/// Protocol constants for one (token, direction) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionConstants {
    pub param5: Word,
    pub param10: Word,
    pub param11: Word,
}

/// Per-token constants for both directions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadTemplate {
    pub native_to_token: DirectionConstants,
    pub token_to_native: DirectionConstants,
}

impl PayloadTemplate {
    pub fn constants(&self, direction: Direction) -> &DirectionConstants {
        match direction {
            Direction::NativeToToken => &self.native_to_token,
            Direction::TokenToNative => &self.token_to_native,
        }
    }
}

/// One fixed-width slot of the command layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Zero,
    Address(Address),
    Uint(U256),
    Flag(bool),
    Constant(Word),
}

impl Field {
    pub fn word(&self) -> Word {
        match self {
            Field::Zero => Word::ZERO,
            Field::Address(address) => Word::from_address(*address),
            Field::Uint(value) => Word::from_u256(*value),
            Field::Flag(flag) => Word::from_u64(u64::from(*flag)),
            Field::Constant(word) => *word,
        }
    }
}

/// Ordered field list of a swap command
pub fn command_fields(
    token: Address,
    amount: U256,
    direction: Direction,
    constants: &DirectionConstants,
) -> [Field; CMD_WORDS] {
    let is_buy = direction == Direction::NativeToToken;
    [
        Field::Zero,
        Field::Address(token),
        Field::Constant(constants.param5),
        Field::Flag(is_buy),
        Field::Flag(is_buy),
        Field::Uint(amount),
        Field::Zero,
        Field::Constant(constants.param10),
        Field::Constant(constants.param11),
        Field::Zero,
    ]
}

/// Immutable, fully laid-out `userCmd` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCmdPayload {
    callpath: u16,
    words: [Word; CMD_WORDS],
}

impl UserCmdPayload {
    pub fn build(
        callpath: u16,
        token: Address,
        amount: U256,
        direction: Direction,
        constants: &DirectionConstants,
    ) -> Self {
        let words = command_fields(token, amount, direction, constants).map(|f| f.word());
        Self { callpath, words }
    }

    pub fn callpath(&self) -> u16 {
        self.callpath
    }

    pub fn cmd_word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn amount(&self) -> U256 {
        self.words[AMOUNT_WORD].to_u256()
    }

    /// The raw `cmd` bytes (10 words)
    pub fn cmd_bytes(&self) -> Bytes {
        let mut out = Vec::with_capacity(CMD_WORDS * WORD_BYTES);
        for word in &self.words {
            out.extend_from_slice(word.as_bytes());
        }
        Bytes::from(out)
    }

    /// ABI argument block: callpath, cmd offset, cmd length, cmd words
    pub fn argument_words(&self) -> [Word; ARG_WORDS] {
        let mut out = [Word::ZERO; ARG_WORDS];
        out[0] = Word::from_u64(u64::from(self.callpath));
        out[1] = Word::from_u64(CMD_OFFSET);
        out[2] = Word::from_u64((CMD_WORDS * WORD_BYTES) as u64);
        out[3..].copy_from_slice(&self.words);
        out
    }

    /// `"0x"` followed by the 13 argument words
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(ARG_HEX_LEN);
        out.push_str("0x");
        for word in self.argument_words() {
            out.push_str(&word.to_hex());
        }
        debug_assert_eq!(out.len(), ARG_HEX_LEN);
        out
    }

    /// Selector followed by the argument block, ready to submit
    pub fn calldata(&self) -> Bytes {
        let mut out = Vec::with_capacity(4 + ARG_WORDS * WORD_BYTES);
        out.extend_from_slice(&ICrocSwapDex::userCmdCall::SELECTOR);
        for word in self.argument_words() {
            out.extend_from_slice(word.as_bytes());
        }
        Bytes::from(out)
    }
}
