//! Decimal-string <-> 18-decimal fixed point conversion for donation
//! amounts.

use crate::error::DonationError;
use alloy_primitives::{
    U256,
    utils::{ParseUnits, Unit},
};

/// Parses a user-entered decimal string into base units (wei).
///
/// Rejects empty, non-numeric and negative input, and input carrying more
/// fractional digits than the unit can represent; precision is never
/// silently truncated.
pub fn parse_donation(input: &str) -> Result<U256, DonationError> {
    let amount = input.trim();
    if amount.is_empty() {
        return Err(DonationError::InvalidAmount("amount is empty".to_string()));
    }
    // `parse_units` drops fractional digits past the unit's 18, so an
    // over-precise amount has to be rejected before parsing.
    if let Some((_, fraction)) = amount.split_once('.') {
        if fraction.len() > usize::from(Unit::ETHER.get()) {
            return Err(DonationError::InvalidAmount(format!(
                "amount carries more than {} fractional digits: {amount}",
                Unit::ETHER.get()
            )));
        }
    }
    match ParseUnits::parse_units(amount, Unit::ETHER) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => {
            Err(DonationError::InvalidAmount(format!("amount may not be negative: {amount}")))
        }
        Err(err) => Err(DonationError::InvalidAmount(err.to_string())),
    }
}

/// Formats base units back into a decimal string, with trailing zeros (and a
/// bare trailing `.`) trimmed.
pub fn format_donation(value: U256) -> String {
    let formatted = ParseUnits::U256(value).format_units(Unit::ETHER);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}
