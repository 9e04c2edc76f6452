//! # DonationBox core
//!
//! The wallet-session and transaction-submission state machine behind a
//! donation dApp: connect a wallet, keep it on the expected network, submit
//! a value-transfer donation with explicit gas parameters, wait for it to be
//! mined, decode the domain event out of the receipt, and reconcile the
//! locally published state (session, cached total, submitting flag) with
//! chain state.
//!
//! ## Architecture
//!
//! State is published as immutable [`Snapshot`]s over a watch channel; the
//! presentation layer subscribes to snapshot changes and raises intents
//! (connect, disconnect, amount entered, submit) against:
//!
//! - [`SessionManager`]: connect/resume/disconnect lifecycle; rebuilds the
//!   session from scratch on every wallet account/chain change event.
//! - [`DonationSubmitter`]: validates, builds, submits and acknowledges one
//!   donation per invocation, with fresh nonce and gas price every time.
//! - [`TotalsReader`]: read-only aggregate total over the public endpoint,
//!   cached, stale-but-available on failure.
//!
//! The external wallet and contract are out-of-scope collaborators reached
//! only through the [`WalletProvider`], [`DonationBox`] and
//! [`DonationReader`] boundary traits. Rendering is someone else's problem.

pub mod chain;
pub mod config;
pub mod contract;
pub mod donate;
pub mod error;
pub mod fmt;
pub mod provider;
pub mod session;
pub mod state;
pub mod totals;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{AddChainRequest, SwitchChainRequest, ensure_expected_network};
pub use config::{Config, DONATION_BOX_ADDRESS, EXPECTED_CHAIN_ID, NativeCurrency};
pub use contract::{
    DonationBox, DonationReader, HttpDonationReader, MinedDonation, TransactionOverrides,
};
pub use donate::{
    DonationReceipt, DonationRequest, DonationSubmitter, SettledDonation, decode_donation_receipt,
};
pub use error::{DonationError, RpcError, UNRECOGNIZED_CHAIN_CODE};
pub use provider::{WalletEvent, WalletProvider};
pub use session::SessionManager;
pub use state::{Session, Snapshot, StateHandle};
pub use totals::TotalsReader;
