//! Fixed deployment constants for the donation box.
//!
//! The contract is pre-deployed at one immutable address on the Goerli test
//! network; nothing here is user-configurable at runtime. The gas knobs are
//! heuristic safety margins against underpriced or out-of-gas rejection, not
//! correctness-critical bounds.

use alloy_primitives::{Address, ChainId, address};
use serde::{Deserialize, Serialize};

/// The fixed, pre-deployed donation box contract.
pub const DONATION_BOX_ADDRESS: Address = address!("0x0c7d4b2b6f07c178eb9c7e655bbd29d33a9d1e4f");

/// Chain id of the required network (Goerli).
pub const EXPECTED_CHAIN_ID: ChainId = 5;

/// Intrinsic gas cost of a plain value transfer.
pub const BASE_TRANSFER_GAS: u64 = 21_000;

/// Native currency descriptor used when registering the chain with a wallet
/// (EIP-3085 `nativeCurrency`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Deployment configuration for the donation core.
///
/// [`Config::default`] reproduces the production deployment; tests override
/// individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain id every session's reported network is compared against.
    pub chain_id: ChainId,
    /// Display name of the expected chain, sent with add-chain requests.
    pub chain_name: String,
    /// Native currency metadata, sent with add-chain requests.
    pub native_currency: NativeCurrency,
    /// Public RPC endpoints: the first is used for read-only totals queries,
    /// all are advertised in add-chain requests.
    pub rpc_urls: Vec<String>,
    /// The donation box contract address.
    pub contract_address: Address,
    /// Block explorer base URL for account links.
    pub explorer_url: String,
    /// Multiplier applied to the freshly read gas price. Tunable headroom
    /// against repricing between read and submission.
    pub gas_price_multiplier: u128,
    /// Fixed gas limit for the donate call. Tunable; defaults to
    /// 10 x [`BASE_TRANSFER_GAS`] rather than dynamic estimation.
    pub gas_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_id: EXPECTED_CHAIN_ID,
            chain_name: "Goerli Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "Goerli".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://rpc.ankr.com/eth_goerli".to_string()],
            contract_address: DONATION_BOX_ADDRESS,
            explorer_url: "https://etherscan.io".to_string(),
            gas_price_multiplier: 2,
            gas_limit: 10 * BASE_TRANSFER_GAS,
        }
    }
}

impl Config {
    /// The endpoint used for read-only queries.
    pub fn read_rpc_url(&self) -> &str {
        self.rpc_urls.first().map(String::as_str).unwrap_or_default()
    }

    /// The expected chain id in the `0x`-prefixed hex form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}
