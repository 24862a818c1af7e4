// src/math.rs
//! Exact integer arithmetic on base-unit amounts. No floating point.

use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;

use crate::shared::errors::EncodingError;

/// Parts-per-million denominator: 1% = 10_000 ppm
pub const PPM_DENOMINATOR: u32 = 1_000_000;

/// Basis-points denominator: 1% = 100 bps
pub const BPS_DENOMINATOR: u32 = 10_000;

/// floor(amount * ppm / 1_000_000), exact for every 256-bit `amount`
///
/// Split into quotient and remainder so the multiplication can never overflow.
pub fn apply_ppm(amount: U256, ppm: u32) -> U256 {
    let denominator = U256::from(PPM_DENOMINATOR);
    let ppm = U256::from(ppm);
    let whole = amount / denominator;
    let rem = amount % denominator;
    whole * ppm + rem * ppm / denominator
}

/// Parse a decimal percentage string ("0.1", "88") into ppm
pub fn percent_to_ppm(percent: &str) -> Result<u32, EncodingError> {
    let trimmed = percent.trim();
    let invalid = |reason: String| EncodingError::InvalidPercent(trimmed.to_string(), reason);
    if trimmed.starts_with('-') {
        return Err(invalid("negative".to_string()));
    }
    // 1% = 10^4 ppm, so percent with 4 implied decimals is ppm
    let parsed = parse_units(trimmed, 4u8)
        .map_err(|e| invalid(e.to_string()))?
        .get_absolute();
    if parsed > U256::from(PPM_DENOMINATOR) {
        return Err(invalid("exceeds 100".to_string()));
    }
    Ok(parsed.to::<u32>())
}

/// Minimum output after `slippage_bps` of slippage, exact for every 256-bit quote
pub fn calculate_min_out(amount_out: U256, slippage_bps: u32) -> U256 {
    let denominator = U256::from(BPS_DENOMINATOR);
    let keep = U256::from(BPS_DENOMINATOR.saturating_sub(slippage_bps));
    let whole = amount_out / denominator;
    let rem = amount_out % denominator;
    whole * keep + rem * keep / denominator
}
