//! Display helpers for the presentation layer.

use crate::config::Config;
use alloy_primitives::Address;

/// Shortens a checksummed address to the `0x1234…cdef` display form.
pub fn shorten_address(address: Address) -> String {
    let hex = address.to_string();
    format!("{}…{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Block-explorer link for an account page.
pub fn explorer_address_url(config: &Config, address: Address) -> String {
    format!("{}/address/{address}", config.explorer_url.trim_end_matches('/'))
}
