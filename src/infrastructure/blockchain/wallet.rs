//! Private key loading

use alloy::signers::local::PrivateKeySigner;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::shared::errors::WalletError;

/// Read a hex private key from `path`, trimming surrounding whitespace.
pub fn load_signer<P: AsRef<Path>>(path: P) -> Result<PrivateKeySigner, WalletError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let contents = fs::read_to_string(path)
        .map_err(|e| WalletError::Unreadable(display.clone(), e.to_string()))?;
    PrivateKeySigner::from_str(contents.trim()).map_err(|_| WalletError::Malformed(display))
}
