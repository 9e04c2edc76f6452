//! Donation submission: build, submit, await, and acknowledge the
//! value-transfer transaction.

use crate::{
    config::Config,
    contract::{DonationBox, DonationReader, IDonationBox, MinedDonation, TransactionOverrides},
    error::DonationError,
    provider::WalletProvider,
    state::StateHandle,
    totals::TotalsReader,
    units,
};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The user's donation intent, owned by the form and consumed on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonationRequest {
    /// Amount in the human unit, as entered.
    pub amount: String,
}

/// The decoded domain event of a mined donate transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationReceipt {
    pub donor: Address,
    /// Donor-contributed amount in base units.
    pub settled_amount: U256,
}

/// A fully acknowledged donation, reported back for UI confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettledDonation {
    pub donor: Address,
    /// Settled amount in base units.
    pub amount: U256,
    /// Settled amount as a decimal string in the human unit.
    pub formatted: String,
    pub tx_hash: B256,
}

/// Decodes the first receipt log as the donation domain event.
///
/// The transaction being mined is not enough to acknowledge a donation: the
/// log must decode as `DonationTransferred` with the expected field count
/// and types, otherwise the whole receipt is treated as unrecognized.
pub fn decode_donation_receipt(mined: &MinedDonation) -> Result<DonationReceipt, DonationError> {
    let log = mined
        .logs
        .first()
        .ok_or_else(|| DonationError::UnrecognizedReceipt("receipt carries no logs".to_string()))?;
    let event = IDonationBox::DonationTransferred::decode_log(log)
        .map_err(|err| DonationError::UnrecognizedReceipt(err.to_string()))?;
    Ok(DonationReceipt { donor: event.data.donor, settled_amount: event.data.amount })
}

/// Builds and submits donate transactions against the wallet and contract
/// boundaries captured at construction.
///
/// Concurrent submissions are not serialized here: the published
/// `submitting` flag is an advisory lock the presentation layer honors by
/// disabling the submit action, not an enforced mutex.
#[derive(Debug)]
pub struct DonationSubmitter<P, C, R>
where
    P: WalletProvider,
    C: DonationBox,
    R: DonationReader,
{
    provider: Arc<P>,
    contract: Arc<C>,
    totals: TotalsReader<R>,
    state: StateHandle,
    config: Config,
}

impl<P, C, R> DonationSubmitter<P, C, R>
where
    P: WalletProvider,
    C: DonationBox,
    R: DonationReader,
{
    pub fn new(
        provider: Arc<P>,
        contract: Arc<C>,
        totals: TotalsReader<R>,
        state: StateHandle,
        config: Config,
    ) -> Self {
        Self { provider, contract, totals, state, config }
    }

    /// Submits one donation.
    ///
    /// Preconditions are checked in order before any boundary call: a
    /// connected session ([`DonationError::NotConnected`]), then a valid
    /// amount ([`DonationError::InvalidAmount`]). On success the cached
    /// total is refreshed and the amount input cleared. Nothing is retried
    /// automatically: a failed attempt must be re-submitted whole so nonce
    /// and gas price are read fresh.
    pub async fn submit(&self, request: &DonationRequest) -> Result<SettledDonation, DonationError> {
        let session = self.state.snapshot().session;
        if !session.connected {
            return Err(DonationError::NotConnected);
        }
        let from = session.account.ok_or(DonationError::NotConnected)?;
        let value = units::parse_donation(&request.amount)?;

        // surfaced to the UI as the loading indicator; cleared on every path
        self.state.set_submitting(true);
        let result = self.submit_inner(from, value).await;
        self.state.set_submitting(false);

        let settled = result?;
        self.state.clear_amount_input();
        if let Err(err) = self.totals.refresh_total().await {
            // non-critical: the cached total stays stale until the next refresh
            warn!(%err, "totals refresh after donation failed");
        }
        Ok(settled)
    }

    async fn submit_inner(
        &self,
        from: Address,
        value: U256,
    ) -> Result<SettledDonation, DonationError> {
        let nonce = self
            .provider
            .transaction_count(from)
            .await
            .map_err(DonationError::TransactionFailed)?;
        let gas_price =
            self.provider.gas_price().await.map_err(DonationError::TransactionFailed)?;

        let overrides = TransactionOverrides {
            gas_price: gas_price.saturating_mul(self.config.gas_price_multiplier),
            gas_limit: self.config.gas_limit,
            value,
            nonce,
        };
        trace!(?overrides, %from, "submitting donation");

        let mined =
            self.contract.donate(&overrides).await.map_err(DonationError::TransactionFailed)?;
        let receipt = decode_donation_receipt(&mined)?;
        debug!(tx_hash = %mined.tx_hash, donor = %receipt.donor, amount = %receipt.settled_amount, "donation acknowledged");

        Ok(SettledDonation {
            donor: receipt.donor,
            amount: receipt.settled_amount,
            formatted: units::format_donation(receipt.settled_amount),
            tx_hash: mined.tx_hash,
        })
    }
}
