//! Unified error types for PredictX.

use thiserror::Error;

/// Unified error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Wallet session error.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Data service error.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

/// Errors surfaced by the wallet session manager.
///
/// The `Display` output is the user-facing message stored on the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No injected wallet provider is available.
    #[error("No wallet provider detected. Install a browser wallet to continue.")]
    ProviderMissing,

    /// The provider returned an empty account list.
    #[error("No account selected.")]
    NoAccountSelected,

    /// The provider rejected or failed the request.
    #[error("{0}")]
    Provider(String),

    /// The provider offered something that is not an account address.
    #[error("Wallet returned an invalid address: {0}")]
    InvalidAccount(String),
}

impl WalletError {
    /// Generic message used when the provider gives no reason.
    pub const FALLBACK_MESSAGE: &'static str = "Failed to connect wallet.";
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            WalletError::Provider(Self::FALLBACK_MESSAGE.to_string())
        } else {
            WalletError::Provider(message)
        }
    }
}

/// Errors returned by a wallet provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user rejected the request in the wallet.
    #[error("User rejected the request.")]
    UserRejected,

    /// The page is not authorized for the requested account.
    #[error("The requested account has not been authorized.")]
    Unauthorized,

    /// Signing the message failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Any other provider failure, carrying its raw message.
    #[error("{0}")]
    Other(String),
}

/// Errors from the market/portfolio data service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The backend answered with a non-success status.
    #[error("request to {endpoint} failed: HTTP {status}")]
    Http {
        /// Endpoint path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// Transport-level failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid backend base URL or endpoint.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Simulated backend outage.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the session storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying file IO failed.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored contents were not valid JSON.
    #[error("storage contents corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Lock over the in-memory store was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
