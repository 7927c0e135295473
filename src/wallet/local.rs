//! Wallet provider backed by a local private key.
//!
//! Behaves like an injected browser wallet holding a single account: the
//! account is authorized on the first `request_accounts` call and stays
//! authorized until [`LocalWalletProvider::revoke`].

use std::sync::atomic::{AtomicBool, Ordering};

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use crate::error::ProviderError;

use super::address::same_address;
use super::provider::{AccountsChanged, WalletProvider};

/// Capacity of the accounts-changed channel.
const EVENT_CAPACITY: usize = 16;

/// Single-account wallet provider using an in-process signer.
#[derive(Debug)]
pub struct LocalWalletProvider {
    signer: PrivateKeySigner,
    authorized: AtomicBool,
    events: broadcast::Sender<AccountsChanged>,
}

/// Create a signer from a hex-encoded private key.
///
/// The private key can be with or without the "0x" prefix.
pub fn create_signer(private_key: &str) -> Result<PrivateKeySigner, ProviderError> {
    let key = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(key)
        .map_err(|e| ProviderError::Signing(format!("Invalid private key hex: {}", e)))?;

    if bytes.len() != 32 {
        return Err(ProviderError::Signing(format!(
            "Private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&bytes);

    PrivateKeySigner::from_bytes(&key_bytes.into())
        .map_err(|e| ProviderError::Signing(format!("Failed to create signer: {}", e)))
}

impl LocalWalletProvider {
    /// Create a provider from a hex-encoded private key.
    pub fn from_private_key(private_key: &str) -> Result<Self, ProviderError> {
        let signer = create_signer(private_key)?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            signer,
            authorized: AtomicBool::new(false),
            events,
        })
    }

    /// Treat the account as already authorized for the page, as a browser
    /// wallet does for a site it has connected to before.
    pub fn preauthorized(self) -> Self {
        self.authorized.store(true, Ordering::SeqCst);
        self
    }

    /// Checksummed account address.
    pub fn address(&self) -> String {
        self.signer.address().to_checksum(None)
    }

    /// Whether the account has been authorized for the page.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Withdraw authorization and notify listeners with an empty account list.
    pub fn revoke(&self) {
        self.authorized.store(false, Ordering::SeqCst);
        // No subscribers is fine.
        let _ = self.events.send(Vec::new());
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let was_authorized = self.authorized.swap(true, Ordering::SeqCst);
        if !was_authorized {
            let _ = self.events.send(vec![self.address()]);
        }
        Ok(vec![self.address()])
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        if self.is_authorized() {
            Ok(vec![self.address()])
        } else {
            Ok(Vec::new())
        }
    }

    #[instrument(skip(self, message))]
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        if !self.is_authorized() || !same_address(address, &self.address()) {
            return Err(ProviderError::Unauthorized);
        }

        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ProviderError::Signing(e.to_string()))?;

        debug!("Signed personal message");
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<AccountsChanged>> {
        Some(self.events.subscribe())
    }
}
