//! Process-wide state published as immutable snapshots.
//!
//! Every mutation swaps in a whole new [`Snapshot`] through a
//! [`tokio::sync::watch`] channel, so subscribers (the presentation layer)
//! always observe a consistent value and torn reads are impossible.
//! Concurrent writers are last-write-wins, which is acceptable for the only
//! multi-writer field (the cached read-only total).

use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tokio::sync::watch;

/// Local record of whether a wallet is usable right now, and for which
/// account. Exactly one exists process-wide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// The connected signer address, if any.
    pub account: Option<Address>,
    /// Whether a wallet session is established.
    pub connected: bool,
    /// Whether the wallet boundary holds a cached provider handle that
    /// allows a silent reconnect.
    pub cached_provider_present: bool,
}

impl Session {
    /// A connected session. Connectedness always carries an account, which
    /// keeps the `connected => account present` invariant in the
    /// constructor.
    pub fn connected(account: Address, cached_provider_present: bool) -> Self {
        Self { account: Some(account), connected: true, cached_provider_present }
    }

    /// The empty, disconnected session.
    pub fn disconnected() -> Self {
        Self::default()
    }
}

/// One immutable published state value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// The wallet session.
    pub session: Session,
    /// Cached all-time donation total in base units. Stale-but-available:
    /// kept across failed refreshes.
    pub total_donations: U256,
    /// Advisory flag: a donation submission is in flight. The presentation
    /// layer is expected to disable the submit action while set.
    pub submitting: bool,
    /// The donation amount form input, cleared after an acknowledged
    /// donation.
    pub amount_input: String,
}

/// Shared handle over the published state.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone, Debug)]
pub struct StateHandle {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHandle {
    /// Creates a handle over the empty initial state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self { tx: Arc::new(tx) }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Publish a new session.
    pub fn set_session(&self, session: Session) {
        self.tx.send_modify(|snapshot| snapshot.session = session);
    }

    /// Publish the submitting flag.
    pub fn set_submitting(&self, submitting: bool) {
        self.tx.send_modify(|snapshot| snapshot.submitting = submitting);
    }

    /// Publish a freshly read donation total.
    pub fn set_total_donations(&self, total: U256) {
        self.tx.send_modify(|snapshot| snapshot.total_donations = total);
    }

    /// Publish the current form input.
    pub fn set_amount_input(&self, amount: impl Into<String>) {
        let amount = amount.into();
        self.tx.send_modify(|snapshot| snapshot.amount_input = amount);
    }

    /// Clear the form input after an acknowledged donation.
    pub fn clear_amount_input(&self) {
        self.tx.send_modify(|snapshot| snapshot.amount_input.clear());
    }
}
