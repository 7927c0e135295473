//! Wallet session manager.
//!
//! Tracks the single account connected through a [`WalletProvider`],
//! persists it through a [`SessionStore`], and publishes every change to
//! subscribers over a `watch` channel.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::WalletError;
use crate::metrics;

use super::address::{is_valid_address, same_address};
use super::provider::WalletProvider;
use super::storage::SessionStore;

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Connected address.
    pub address: Option<String>,
    /// A connect call is in flight.
    pub is_connecting: bool,
    /// Message from the last failed connect.
    pub error: Option<String>,
}

impl WalletSession {
    /// Whether an address is connected.
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Options for [`WalletSessionManager::connect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOptions {
    /// Also sign an origin-bound message to prove key possession.
    #[serde(default)]
    pub sign_message: bool,
}

/// Owns the session state and the persisted address.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct WalletSessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    store: Arc<dyn SessionStore>,
    origin: Arc<str>,
    state: Arc<watch::Sender<WalletSession>>,
}

impl fmt::Debug for WalletSessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSessionManager")
            .field("has_provider", &self.provider.is_some())
            .field("origin", &self.origin)
            .field("session", &*self.state.borrow())
            .finish()
    }
}

impl WalletSessionManager {
    /// Create a manager. `provider` is `None` when no wallet is injected.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        store: Arc<dyn SessionStore>,
        origin: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(WalletSession::default());
        Self {
            provider,
            store,
            origin: Arc::from(origin.into()),
            state: Arc::new(state),
        }
    }

    /// Whether a wallet provider is available.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> WalletSession {
        self.state.borrow().clone()
    }

    /// Connected address, if any.
    pub fn address(&self) -> Option<String> {
        self.state.borrow().address.clone()
    }

    /// Observe session changes.
    pub fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.state.subscribe()
    }

    /// Message signed on connect when requested.
    pub fn sign_in_message(&self) -> String {
        format!("Sign in to PredictX at {}", self.origin)
    }

    /// Connect the first account offered by the provider.
    ///
    /// On failure the error message is also stored on the session. Overlapping
    /// calls are not deduplicated; each one issues its own provider request.
    #[instrument(skip(self))]
    pub async fn connect(&self, options: ConnectOptions) -> Result<String, WalletError> {
        let Some(provider) = self.provider.clone() else {
            let err = WalletError::ProviderMissing;
            warn!("Connect requested without a wallet provider");
            self.state.send_modify(|s| s.error = Some(err.to_string()));
            metrics::inc_wallet_connect_failures();
            return Err(err);
        };

        self.state.send_modify(|s| {
            s.is_connecting = true;
            s.error = None;
        });

        let result = self.authorize(provider.as_ref(), options).await;

        match &result {
            Ok(account) => {
                info!(address = %account, "Wallet connected");
                self.state.send_modify(|s| {
                    s.address = Some(account.clone());
                    s.is_connecting = false;
                });
                self.persist(account);
                metrics::inc_wallet_connects();
            }
            Err(WalletError::NoAccountSelected) => {
                warn!("Wallet returned no accounts");
                self.state.send_modify(|s| {
                    s.error = Some(WalletError::NoAccountSelected.to_string());
                    s.is_connecting = false;
                });
                metrics::inc_wallet_connect_failures();
            }
            Err(err) => {
                warn!(error = %err, "Wallet connect failed");
                self.state.send_modify(|s| {
                    s.error = Some(err.to_string());
                    s.address = None;
                    s.is_connecting = false;
                });
                metrics::inc_wallet_connect_failures();
            }
        }

        result
    }

    async fn authorize(
        &self,
        provider: &dyn WalletProvider,
        options: ConnectOptions,
    ) -> Result<String, WalletError> {
        let accounts = provider.request_accounts().await?;
        let account = accounts
            .into_iter()
            .next()
            .filter(|a| !a.is_empty())
            .ok_or(WalletError::NoAccountSelected)?;
        if !is_valid_address(&account) {
            return Err(WalletError::InvalidAccount(account));
        }

        if options.sign_message {
            // Signature only proves key possession; it is not kept.
            provider
                .personal_sign(&self.sign_in_message(), &account)
                .await?;
            debug!("Sign-in message signed");
        }

        Ok(account)
    }

    /// Forget the session locally. The provider is not contacted.
    pub fn disconnect(&self) {
        self.state.send_modify(|s| {
            s.address = None;
            s.error = None;
        });
        self.forget();
        info!("Wallet disconnected");
    }

    /// Restore a persisted session if the provider still authorizes it.
    ///
    /// A persisted address that no longer matches the provider's first
    /// account is erased. Without a provider nothing happens.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<String> {
        let stored = match self.store.load() {
            Ok(Some(address)) => address,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted wallet address");
                return None;
            }
        };

        let provider = self.provider.as_ref()?;

        match provider.accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(current) if same_address(&current, &stored) => {
                    info!(address = %current, "Wallet session restored");
                    self.state.send_modify(|s| s.address = Some(current.clone()));
                    metrics::inc_sessions_restored();
                    Some(current)
                }
                _ => {
                    debug!(stored = %stored, "Persisted address no longer authorized");
                    self.forget();
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to query authorized accounts");
                self.forget();
                None
            }
        }
    }

    /// React to an accounts-changed notification from the provider.
    pub fn handle_accounts_changed(&self, accounts: &[String]) {
        let Some(next) = accounts.first() else {
            info!("Wallet reported no accounts");
            self.disconnect();
            return;
        };

        if !is_valid_address(next) {
            warn!(account = %next, "Ignoring malformed account change");
            return;
        }

        let Some(current) = self.address() else {
            return;
        };

        if !same_address(&current, next) {
            info!(from = %current, to = %next, "Wallet account switched");
            self.state.send_modify(|s| s.address = Some(next.clone()));
            self.persist(next);
        }
    }

    /// Start consuming the provider's account-change notifications.
    ///
    /// Returns `None` when there is no provider or it emits no events. The
    /// subscription lasts until the returned guard is dropped.
    pub fn listen(&self) -> Option<AccountsListener> {
        let mut events = self.provider.as_ref()?.subscribe()?;
        let manager = self.clone();

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(accounts) => manager.handle_accounts_changed(&accounts),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed account change notifications");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Account change channel closed");
                        break;
                    }
                }
            }
        });

        Some(AccountsListener { handle })
    }

    fn persist(&self, address: &str) {
        if let Err(e) = self.store.save(address) {
            warn!(error = %e, "Failed to persist wallet address");
        }
    }

    fn forget(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted wallet address");
        }
    }
}

/// Guard for an account-change subscription.
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct AccountsListener {
    handle: JoinHandle<()>,
}

impl AccountsListener {
    /// Stop listening.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the listener task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for AccountsListener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
