//! Utility functions and helpers

use alloy::primitives::utils::format_units;
use alloy::primitives::U256;

/// Format a base-unit amount with two decimals, truncating the rest
pub fn format_amount(amount: U256, decimals: u8) -> String {
    match format_units(amount, decimals) {
        Ok(formatted) => truncate_decimals(&formatted, 2),
        Err(_) => amount.to_string(),
    }
}

fn truncate_decimals(value: &str, places: usize) -> String {
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    let mut frac: String = frac.chars().take(places).collect();
    while frac.len() < places {
        frac.push('0');
    }
    format!("{}.{}", whole, frac)
}

/// Format parts-per-million as a percentage with two decimals ("0.20%")
pub fn format_ppm(ppm: u32) -> String {
    format!("{}.{:02}%", ppm / 10_000, (ppm % 10_000) / 100)
}

/// Block explorer link for a transaction hash
pub fn explorer_link(base_url: &str, tx_hash: &str) -> String {
    format!("{}{}", base_url, tx_hash)
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
