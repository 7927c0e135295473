//! Injected wallet provider interface.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::ProviderError;

/// Account list carried by an accounts-changed notification.
pub type AccountsChanged = Vec<String>;

/// A wallet able to expose accounts and sign messages for the page.
///
/// Only the calls the session manager needs: request accounts, list the
/// currently authorized accounts, sign a personal message, and notify on
/// account changes.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to authorize accounts. May prompt.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Accounts already authorized for this origin. Never prompts.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Sign `message` with `address` (EIP-191 personal message).
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError>;

    /// Subscribe to account changes, if the provider emits them.
    fn subscribe(&self) -> Option<broadcast::Receiver<AccountsChanged>> {
        None
    }
}
