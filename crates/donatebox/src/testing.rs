//! Shared test doubles for the wallet and contract boundaries.

use crate::{
    chain::{AddChainRequest, SwitchChainRequest},
    contract::{DonationBox, DonationReader, IDonationBox, MinedDonation, TransactionOverrides},
    error::RpcError,
    provider::{WalletEvent, WalletProvider},
};
use alloy_primitives::{Address, B256, ChainId, Log, U256, address};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::sync::broadcast;

/// The signer address every mock session uses.
pub const TEST_ACCOUNT: Address = address!("0x00000000000000000000000000000000deadbeef");

/// Builds a `DonationTransferred` receipt log.
pub fn donation_log(donor: Address, amount: U256) -> Log {
    let data = IDonationBox::DonationTransferred { donor, amount }.encode_log_data();
    Log { address: crate::config::DONATION_BOX_ADDRESS, data }
}

/// Polls `predicate` until it holds, failing the test after one second.
pub async fn wait_until(predicate: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !predicate() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached within 1s");
}

/// Programmable [`WalletProvider`] with per-method call counters.
#[derive(Debug)]
pub struct MockWallet {
    accounts: Mutex<Vec<Address>>,
    chain_id: Mutex<ChainId>,
    nonce: Mutex<u64>,
    gas_price: Mutex<u128>,
    cached_provider: AtomicBool,

    request_accounts_error: Mutex<Option<RpcError>>,
    gas_price_error: Mutex<Option<RpcError>>,
    switch_chain_error: Mutex<Option<RpcError>>,

    request_accounts_calls: AtomicUsize,
    balance_calls: AtomicUsize,
    chain_id_calls: AtomicUsize,
    transaction_count_calls: AtomicUsize,
    gas_price_calls: AtomicUsize,
    switch_chain_calls: AtomicUsize,
    add_chain_calls: AtomicUsize,

    last_add_chain: Mutex<Option<AddChainRequest>>,
    events: broadcast::Sender<WalletEvent>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    /// A wallet already on the expected chain, holding one account, with
    /// nonce 5 and gas price 10 (the canonical mocked boundary
    /// responses the happy-path tests use).
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(vec![TEST_ACCOUNT]),
            chain_id: Mutex::new(crate::config::EXPECTED_CHAIN_ID),
            nonce: Mutex::new(5),
            gas_price: Mutex::new(10),
            cached_provider: AtomicBool::new(false),
            request_accounts_error: Mutex::new(None),
            gas_price_error: Mutex::new(None),
            switch_chain_error: Mutex::new(None),
            request_accounts_calls: AtomicUsize::new(0),
            balance_calls: AtomicUsize::new(0),
            chain_id_calls: AtomicUsize::new(0),
            transaction_count_calls: AtomicUsize::new(0),
            gas_price_calls: AtomicUsize::new(0),
            switch_chain_calls: AtomicUsize::new(0),
            add_chain_calls: AtomicUsize::new(0),
            last_add_chain: Mutex::new(None),
            events,
        }
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    pub fn set_chain_id(&self, chain_id: ChainId) {
        *self.chain_id.lock().unwrap() = chain_id;
    }

    pub fn set_cached_provider(&self, cached: bool) {
        self.cached_provider.store(cached, Ordering::SeqCst);
    }

    pub fn fail_request_accounts(&self, error: RpcError) {
        *self.request_accounts_error.lock().unwrap() = Some(error);
    }

    pub fn fail_gas_price(&self, error: RpcError) {
        *self.gas_price_error.lock().unwrap() = Some(error);
    }

    pub fn fail_switch_chain(&self, error: RpcError) {
        *self.switch_chain_error.lock().unwrap() = Some(error);
    }

    pub fn emit(&self, event: WalletEvent) {
        self.events.send(event).expect("no live event subscriber");
    }

    pub fn request_accounts_calls(&self) -> usize {
        self.request_accounts_calls.load(Ordering::SeqCst)
    }

    pub fn switch_chain_calls(&self) -> usize {
        self.switch_chain_calls.load(Ordering::SeqCst)
    }

    pub fn add_chain_calls(&self) -> usize {
        self.add_chain_calls.load(Ordering::SeqCst)
    }

    pub fn last_add_chain_request(&self) -> Option<AddChainRequest> {
        self.last_add_chain.lock().unwrap().clone()
    }

    /// Total calls across every network-touching method, for the
    /// zero-network-call assertions.
    pub fn network_calls(&self) -> usize {
        self.request_accounts_calls.load(Ordering::SeqCst)
            + self.balance_calls.load(Ordering::SeqCst)
            + self.chain_id_calls.load(Ordering::SeqCst)
            + self.transaction_count_calls.load(Ordering::SeqCst)
            + self.gas_price_calls.load(Ordering::SeqCst)
            + self.switch_chain_calls.load(Ordering::SeqCst)
            + self.add_chain_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        self.request_accounts_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.request_accounts_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn balance(&self, _account: Address) -> Result<U256, RpcError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(U256::from(10).pow(U256::from(18)))
    }

    async fn chain_id(&self) -> Result<ChainId, RpcError> {
        self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(*self.chain_id.lock().unwrap())
    }

    async fn transaction_count(&self, _account: Address) -> Result<u64, RpcError> {
        self.transaction_count_calls.fetch_add(1, Ordering::SeqCst);
        Ok(*self.nonce.lock().unwrap())
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        self.gas_price_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.gas_price_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(*self.gas_price.lock().unwrap())
    }

    async fn switch_chain(&self, _request: &SwitchChainRequest) -> Result<(), RpcError> {
        self.switch_chain_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.switch_chain_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }

    async fn add_chain(&self, request: &AddChainRequest) -> Result<(), RpcError> {
        self.add_chain_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_add_chain.lock().unwrap() = Some(request.clone());
        Ok(())
    }

    fn has_cached_provider(&self) -> bool {
        self.cached_provider.load(Ordering::SeqCst)
    }

    fn clear_cached_provider(&self) {
        self.cached_provider.store(false, Ordering::SeqCst);
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

/// Scripted [`DonationBox`] + [`DonationReader`] double.
#[derive(Debug)]
pub struct MockDonationBox {
    mined: Mutex<Result<MinedDonation, RpcError>>,
    total: Mutex<Result<U256, RpcError>>,
    donate_calls: AtomicUsize,
    total_calls: AtomicUsize,
    last_overrides: Mutex<Option<TransactionOverrides>>,
}

impl Default for MockDonationBox {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDonationBox {
    pub fn new() -> Self {
        Self {
            mined: Mutex::new(Err(RpcError::internal("donate not scripted"))),
            total: Mutex::new(Ok(U256::ZERO)),
            donate_calls: AtomicUsize::new(0),
            total_calls: AtomicUsize::new(0),
            last_overrides: Mutex::new(None),
        }
    }

    /// Scripts the next donate calls to succeed with a receipt carrying
    /// `logs`.
    pub fn script_mined(&self, logs: Vec<Log>) {
        *self.mined.lock().unwrap() = Ok(MinedDonation { tx_hash: B256::with_last_byte(1), logs });
    }

    pub fn script_total(&self, total: Result<U256, RpcError>) {
        *self.total.lock().unwrap() = total;
    }

    pub fn donate_calls(&self) -> usize {
        self.donate_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn last_overrides(&self) -> Option<TransactionOverrides> {
        self.last_overrides.lock().unwrap().clone()
    }
}

#[async_trait]
impl DonationBox for MockDonationBox {
    async fn donate(&self, overrides: &TransactionOverrides) -> Result<MinedDonation, RpcError> {
        self.donate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_overrides.lock().unwrap() = Some(overrides.clone());
        self.mined.lock().unwrap().clone()
    }
}

#[async_trait]
impl DonationReader for MockDonationBox {
    async fn total_donations(&self) -> Result<U256, RpcError> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.total.lock().unwrap().clone()
    }
}
