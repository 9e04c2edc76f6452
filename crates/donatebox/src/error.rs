//! Error taxonomy for the connect/donate/refresh flow.

use serde::{Deserialize, Serialize};

/// JSON-RPC error code wallets report when the requested chain has not been
/// added yet (EIP-3085 / MetaMask).
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// A JSON-RPC shaped fault reported by a wallet or RPC boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct RpcError {
    /// Numeric JSON-RPC / EIP-1193 error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
}

impl RpcError {
    /// New [`RpcError`] with the given code and message.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// An internal (`-32603`) error carrying only a message, used when the
    /// underlying transport does not expose a structured code.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }

    /// Whether the wallet reported the target chain as not added.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN_CODE
    }
}

impl From<alloy_contract::Error> for RpcError {
    fn from(err: alloy_contract::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// All user-visible failures of the donation core.
///
/// Validation failures ([`InvalidAmount`](Self::InvalidAmount),
/// [`NotConnected`](Self::NotConnected)) are raised before any boundary call
/// is made. Transaction-level failures surface only after the `submitting`
/// flag has been cleared and are never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    /// The entered amount is empty, non-numeric, negative, or carries more
    /// than 18 fractional digits.
    #[error("invalid donation amount: {0}")]
    InvalidAmount(String),

    /// No wallet session is established.
    #[error("no wallet connected; connect a wallet before donating")]
    NotConnected,

    /// No wallet provider could be obtained from the wallet boundary.
    #[error("wallet provider unavailable")]
    WalletUnavailable(#[source] RpcError),

    /// A provider was obtained but no signer address could be derived.
    #[error("wallet returned no signer address")]
    SignerUnavailable,

    /// The wallet rejected the chain switch or registration request.
    #[error("failed to switch wallet to the expected network")]
    NetworkSwitchFailed(#[source] RpcError),

    /// The transaction could not be submitted or mined.
    #[error("donation transaction failed")]
    TransactionFailed(#[source] RpcError),

    /// The transaction was mined but its receipt does not carry the expected
    /// domain event, so the donation is not acknowledged.
    #[error("mined receipt not recognized as a donation: {0}")]
    UnrecognizedReceipt(String),

    /// The read-only aggregate query failed; the cached total stays stale.
    #[error("read-only totals query failed")]
    ReadOnlyQueryFailed(#[source] RpcError),
}
