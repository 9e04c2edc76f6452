//! Wallet session lifecycle: connect, silent resume, disconnect.

use crate::{
    chain::ensure_expected_network,
    config::Config,
    error::DonationError,
    provider::WalletProvider,
    state::{Session, StateHandle},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::{Mutex, broadcast::error::RecvError};
use tracing::{debug, warn};

/// Owns the connect/disconnect lifecycle and keeps the published [`Session`]
/// in sync with the wallet.
///
/// Account-changed and chain-changed events both re-run the full connect
/// sequence, rebuilding the session from scratch. Connect sequences are
/// serialized by an async mutex, so an event arriving mid-connect queues a
/// complete re-run after the in-flight one finishes: at-least-once, with the
/// final state always reflecting the latest event.
///
/// Cheap to clone; clones share the same lifecycle.
#[derive(Debug)]
pub struct SessionManager<P: WalletProvider> {
    inner: Arc<Inner<P>>,
}

impl<P: WalletProvider> Clone for SessionManager<P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

#[derive(Debug)]
struct Inner<P> {
    provider: Arc<P>,
    state: StateHandle,
    config: Config,
    connect_lock: Mutex<()>,
    listener_started: AtomicBool,
}

impl<P: WalletProvider> SessionManager<P> {
    pub fn new(provider: Arc<P>, state: StateHandle, config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                state,
                config,
                connect_lock: Mutex::new(()),
                listener_started: AtomicBool::new(false),
            }),
        }
    }

    /// The shared state handle this manager publishes into.
    pub fn state(&self) -> &StateHandle {
        &self.inner.state
    }

    /// Establishes a wallet session: request accounts, derive the signer
    /// address and balance, read the active chain, publish the session, and
    /// enforce the expected network if the wallet is elsewhere.
    pub async fn connect(&self) -> Result<Session, DonationError> {
        self.spawn_listener();
        let _guard = self.inner.connect_lock.lock().await;
        self.inner.connect_once().await
    }

    /// Reconnects silently when the wallet boundary holds a cached provider
    /// handle; a no-op otherwise. Returns whether a session was established.
    pub async fn resume(&self) -> Result<bool, DonationError> {
        if !self.inner.provider.has_cached_provider() {
            return Ok(false);
        }
        debug!("cached provider present, reconnecting silently");
        self.connect().await?;
        Ok(true)
    }

    /// Clears the cached provider handle and publishes the empty session.
    /// Idempotent: disconnecting while disconnected is a no-op.
    pub fn disconnect(&self) {
        self.inner.provider.clear_cached_provider();
        self.inner.state.set_session(Session::disconnected());
        debug!("wallet disconnected");
    }

    /// Registers the wallet event listener exactly once. The task holds the
    /// manager weakly and exits once every handle is dropped.
    fn spawn_listener(&self) {
        if self.inner.listener_started.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut events = self.inner.provider.subscribe();
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        // fine to skip: every event triggers a full rebuild
                        debug!(skipped, "wallet event stream lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let Some(inner) = weak.upgrade() else { break };
                debug!(?event, "wallet event, rebuilding session");
                let _guard = inner.connect_lock.lock().await;
                if let Err(err) = inner.connect_once().await {
                    warn!(%err, "session rebuild after wallet event failed");
                }
            }
        });
    }
}

impl<P: WalletProvider> Inner<P> {
    async fn connect_once(&self) -> Result<Session, DonationError> {
        let accounts =
            self.provider.request_accounts().await.map_err(DonationError::WalletUnavailable)?;
        let account = accounts.first().copied().ok_or(DonationError::SignerUnavailable)?;
        let balance =
            self.provider.balance(account).await.map_err(DonationError::WalletUnavailable)?;
        let chain_id =
            self.provider.chain_id().await.map_err(DonationError::WalletUnavailable)?;
        debug!(%account, %balance, chain_id, "wallet session established");

        let session = Session::connected(account, self.provider.has_cached_provider());
        self.state.set_session(session.clone());

        if chain_id != self.config.chain_id {
            ensure_expected_network(&*self.provider, chain_id, &self.config).await?;
        }
        Ok(session)
    }
}
