//! Scriptable wallet provider for tests and demos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::ProviderError;

use super::provider::{AccountsChanged, WalletProvider};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wallet provider whose answers are set up front.
#[derive(Debug)]
pub struct MockWalletProvider {
    /// Returned by `request_accounts`.
    selectable: Mutex<Vec<String>>,
    /// Returned by `accounts`.
    authorized: Mutex<Vec<String>>,
    /// Error returned by every request while set.
    failure: Mutex<Option<ProviderError>>,
    /// `(message, address)` pairs passed to `personal_sign`.
    signed: Mutex<Vec<(String, String)>>,
    account_requests: AtomicUsize,
    account_queries: AtomicUsize,
    events: Option<broadcast::Sender<AccountsChanged>>,
}

impl MockWalletProvider {
    /// Provider that offers `accounts` when asked and has nothing authorized yet.
    pub fn new<S: Into<String>>(accounts: impl IntoIterator<Item = S>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            selectable: Mutex::new(accounts.into_iter().map(Into::into).collect()),
            authorized: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            signed: Mutex::new(Vec::new()),
            account_requests: AtomicUsize::new(0),
            account_queries: AtomicUsize::new(0),
            events: Some(events),
        }
    }

    /// Set the accounts already authorized for the page.
    pub fn with_authorized<S: Into<String>>(self, accounts: impl IntoIterator<Item = S>) -> Self {
        *lock(&self.authorized) = accounts.into_iter().map(Into::into).collect();
        self
    }

    /// Provider without an accounts-changed subscription.
    pub fn without_events(mut self) -> Self {
        self.events = None;
        self
    }

    /// Fail every subsequent request with `error`.
    pub fn fail_with(&self, error: ProviderError) {
        *lock(&self.failure) = Some(error);
    }

    /// Stop failing requests.
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Emit an accounts-changed notification. Returns the number of receivers.
    pub fn emit_accounts_changed<S: Into<String>>(&self, accounts: impl IntoIterator<Item = S>) -> usize {
        let accounts: Vec<String> = accounts.into_iter().map(Into::into).collect();
        *lock(&self.authorized) = accounts.clone();
        self.events
            .as_ref()
            .and_then(|tx| tx.send(accounts).ok())
            .unwrap_or(0)
    }

    /// Messages signed so far.
    pub fn signed_messages(&self) -> Vec<(String, String)> {
        lock(&self.signed).clone()
    }

    /// Number of `request_accounts` calls made.
    pub fn account_requests(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    /// Number of `accounts` calls made.
    pub fn account_queries(&self) -> usize {
        self.account_queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProviderError> {
        match lock(&self.failure).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let accounts = lock(&self.selectable).clone();
        *lock(&self.authorized) = accounts.clone();
        Ok(accounts)
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.account_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(lock(&self.authorized).clone())
    }

    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        self.check()?;
        lock(&self.signed).push((message.to_string(), address.to_string()));
        Ok(format!("0x{}", hex::encode(message.as_bytes())))
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<AccountsChanged>> {
        self.events.as_ref().map(broadcast::Sender::subscribe)
    }
}
