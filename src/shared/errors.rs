//! Error handling for the application

use thiserror::Error;

/// Calldata encoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Value does not fit in a 32-byte word ({0} significant bytes)")]
    WordOverflow(usize),

    #[error("Invalid hex word {0:?}: {1}")]
    InvalidHex(String, String),

    #[error("Invalid amount {0:?}: {1}")]
    InvalidAmount(String, String),

    #[error("Invalid percentage {0:?}: {1}")]
    InvalidPercent(String, String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(String, String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Missing config section [{0}]")]
    MissingSection(&'static str),

    #[error("Invalid address for {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Invalid amount for {0}: {1}")]
    InvalidAmount(String, String),

    #[error("Invalid range for {0}: {1}")]
    InvalidRange(String, String),

    #[error("Invalid payload constants for {0}: {1}")]
    InvalidPayload(String, EncodingError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Wallet / credential errors. Never carries key material.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Failed to read private key file {0}: {1}")]
    Unreadable(String, String),

    #[error("Private key in {0} is malformed")]
    Malformed(String),
}

/// Blockchain access errors
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("RPC request failed ({0}): {1}")]
    Rpc(&'static str, String),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Unexpected contract response: {0}")]
    Decode(String),
}

/// Errors of a single swap attempt. Never escape the iteration boundary.
#[derive(Error, Debug, Clone)]
pub enum SwapError {
    #[error("Approval failed: {0}")]
    Approval(ChainError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Insufficient {symbol} balance for swap: need {needed}, have {available}")]
    InsufficientBalance {
        symbol: String,
        needed: String,
        available: String,
    },

    #[error("Token {0} is not configured for this venue")]
    UnknownToken(String),

    #[error("Quote failed: {0}")]
    Quote(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Blockchain error: {0}")]
    Blockchain(#[from] ChainError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Swap error: {0}")]
    Swap(#[from] SwapError),

    #[error("Stage {0} failed: {1}")]
    Stage(String, String),
}
