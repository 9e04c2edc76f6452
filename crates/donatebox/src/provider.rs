//! The wallet provider boundary.
//!
//! The wallet is an external agent (key custody, signing, user prompts)
//! reached through JSON-RPC style requests. This trait is the whole surface
//! the core needs; tests substitute mock implementations, a real deployment
//! plugs in an EIP-1193 bridge.

use crate::{
    chain::{AddChainRequest, SwitchChainRequest},
    error::RpcError,
};
use alloy_primitives::{Address, ChainId, U256};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Wallet-originated events. Both re-run the full connect sequence: the
/// session is rebuilt from scratch rather than patched incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    /// The selected accounts changed (including disconnect-from-wallet).
    AccountsChanged(Vec<Address>),
    /// The active chain changed.
    ChainChanged(ChainId),
}

/// External wallet agent, specified at its boundary only.
///
/// All calls may prompt the user through the wallet UI; any timeout is the
/// wallet's own and is never retried locally.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Request account access, prompting the user if necessary. Returns the
    /// exposed accounts with the active signer first.
    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError>;

    /// Native-token balance of `account`.
    async fn balance(&self, account: Address) -> Result<U256, RpcError>;

    /// Chain id of the wallet's active network.
    async fn chain_id(&self) -> Result<ChainId, RpcError>;

    /// Transaction count (next nonce) for `account`. Read fresh before
    /// every submission, never cached.
    async fn transaction_count(&self, account: Address) -> Result<u64, RpcError>;

    /// Current gas price in wei. Read fresh before every submission, never
    /// cached.
    async fn gas_price(&self) -> Result<u128, RpcError>;

    /// `wallet_switchEthereumChain`.
    async fn switch_chain(&self, request: &SwitchChainRequest) -> Result<(), RpcError>;

    /// `wallet_addEthereumChain`.
    async fn add_chain(&self, request: &AddChainRequest) -> Result<(), RpcError>;

    /// Whether a cached provider handle exists, enabling a silent
    /// reconnect without a user prompt.
    fn has_cached_provider(&self) -> bool;

    /// Drop the cached provider handle. Part of disconnect.
    fn clear_cached_provider(&self);

    /// Subscribe to account/chain change events.
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
