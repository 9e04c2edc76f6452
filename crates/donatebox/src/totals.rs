//! Read-only aggregate total, cached and refreshed.

use crate::{contract::DonationReader, error::DonationError, state::StateHandle, units};
use alloy_primitives::U256;
use std::sync::Arc;
use tracing::{debug, warn};

/// Queries the all-time donation total and keeps the cached copy in the
/// published snapshot fresh. Works with no wallet session at all; the read
/// side goes through the public endpoint.
#[derive(Clone, Debug)]
pub struct TotalsReader<R: DonationReader> {
    source: Arc<R>,
    state: StateHandle,
}

impl<R: DonationReader> TotalsReader<R> {
    pub fn new(source: Arc<R>, state: StateHandle) -> Self {
        Self { source, state }
    }

    /// Replaces the cached total with a fresh read.
    ///
    /// On failure the previously cached value is retained and
    /// [`DonationError::ReadOnlyQueryFailed`] is returned; a background
    /// refresh degrading to stale data beats blocking on it.
    pub async fn refresh_total(&self) -> Result<U256, DonationError> {
        match self.source.total_donations().await {
            Ok(total) => {
                debug!(total = %units::format_donation(total), "donation total refreshed");
                self.state.set_total_donations(total);
                Ok(total)
            }
            Err(err) => {
                warn!(%err, "totals query failed, keeping cached value");
                Err(DonationError::ReadOnlyQueryFailed(err))
            }
        }
    }
}
