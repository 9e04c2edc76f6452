//! The donation box contract boundary.
//!
//! The contract is a thin RPC-backed proxy bound to one fixed address and
//! ABI. The submit side goes through the connected wallet and is reached via
//! the [`DonationBox`] trait; the read side needs no wallet at all and is
//! served by [`HttpDonationReader`] against the public endpoint.

use crate::{
    config::Config,
    error::{DonationError, RpcError},
};
use alloy_primitives::{B256, Log, U256};
use alloy_provider::RootProvider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use url::Url;

sol! {
    #[sol(rpc)]
    interface IDonationBox {
        /// Emitted once per recorded donation.
        #[derive(Debug)]
        event DonationTransferred(address donor, uint256 amount);

        function donate() external payable;
        function getTotalDonations() external view returns (uint256);
    }
}

/// Explicit transaction parameters for one donate call.
///
/// Derived immediately before submission from live chain reads plus the
/// encoded donation value, and never reused: nonce and gas price go stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOverrides {
    /// Gas price in wei, already scaled by the configured safety multiplier.
    pub gas_price: u128,
    /// Fixed gas limit for the call.
    pub gas_limit: u64,
    /// Donated value in base units.
    pub value: U256,
    /// Fresh transaction count of the sender.
    pub nonce: u64,
}

/// A mined donate transaction, as the wallet boundary reports it.
#[derive(Clone, Debug)]
pub struct MinedDonation {
    pub tx_hash: B256,
    /// Raw receipt logs; the first one is expected to decode as
    /// [`IDonationBox::DonationTransferred`].
    pub logs: Vec<Log>,
}

/// Submit side of the contract, reached through the connected wallet.
/// Submits the value transfer and waits for it to be mined.
#[async_trait]
pub trait DonationBox: Send + Sync + 'static {
    async fn donate(&self, overrides: &TransactionOverrides) -> Result<MinedDonation, RpcError>;
}

/// Read-only side of the contract. Works without any wallet session.
#[async_trait]
pub trait DonationReader: Send + Sync + 'static {
    /// The all-time aggregate donation total in base units.
    async fn total_donations(&self) -> Result<U256, RpcError>;
}

/// [`DonationReader`] over an independent HTTP connection to the configured
/// public endpoint.
#[derive(Clone, Debug)]
pub struct HttpDonationReader {
    contract: IDonationBox::IDonationBoxInstance<RootProvider>,
}

impl HttpDonationReader {
    /// Connects to the first configured RPC URL.
    pub fn new(config: &Config) -> Result<Self, DonationError> {
        let url: Url = config
            .read_rpc_url()
            .parse()
            .map_err(|err| DonationError::ReadOnlyQueryFailed(RpcError::internal(format!(
                "invalid rpc url {:?}: {err}",
                config.read_rpc_url()
            ))))?;
        let provider = RootProvider::new_http(url);
        Ok(Self { contract: IDonationBox::new(config.contract_address, provider) })
    }
}

#[async_trait]
impl DonationReader for HttpDonationReader {
    async fn total_donations(&self) -> Result<U256, RpcError> {
        self.contract.getTotalDonations().call().await.map_err(RpcError::from)
    }
}
