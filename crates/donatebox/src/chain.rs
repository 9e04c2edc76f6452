//! Network guard: keeps the wallet on the expected chain.

use crate::{
    config::{Config, NativeCurrency},
    error::DonationError,
    provider::WalletProvider,
};
use alloy_primitives::ChainId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `wallet_switchEthereumChain` parameters (EIP-3326).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainRequest {
    /// Target chain id, `0x`-prefixed hex.
    pub chain_id: String,
}

impl SwitchChainRequest {
    pub fn new(chain_id: ChainId) -> Self {
        Self { chain_id: format!("0x{chain_id:x}") }
    }
}

/// `wallet_addEthereumChain` parameters (EIP-3085).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainRequest {
    pub chain_name: String,
    /// Target chain id, `0x`-prefixed hex.
    pub chain_id: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
}

impl AddChainRequest {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chain_name: config.chain_name.clone(),
            chain_id: config.chain_id_hex(),
            native_currency: config.native_currency.clone(),
            rpc_urls: config.rpc_urls.clone(),
        }
    }
}

/// Ensures the wallet's active network is the expected one.
///
/// A no-op when `current_chain_id` already matches. Otherwise issues exactly
/// one switch request; if the wallet answers that the chain has not been
/// added (code 4902), follows up with exactly one add request. Any other
/// wallet error surfaces as [`DonationError::NetworkSwitchFailed`] without a
/// local retry; wallet prompts and timeouts stay the wallet's business.
pub async fn ensure_expected_network<P>(
    provider: &P,
    current_chain_id: ChainId,
    config: &Config,
) -> Result<(), DonationError>
where
    P: WalletProvider + ?Sized,
{
    if current_chain_id == config.chain_id {
        return Ok(());
    }

    debug!(
        current = current_chain_id,
        expected = config.chain_id,
        "wallet on wrong chain, requesting switch"
    );

    match provider.switch_chain(&SwitchChainRequest::new(config.chain_id)).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_unrecognized_chain() => {
            debug!(chain = %config.chain_name, "chain unknown to wallet, requesting registration");
            provider
                .add_chain(&AddChainRequest::from_config(config))
                .await
                .map_err(DonationError::NetworkSwitchFailed)
        }
        Err(err) => Err(DonationError::NetworkSwitchFailed(err)),
    }
}
