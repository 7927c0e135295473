//! Wallet module.
//!
//! This module handles:
//! - The injected wallet provider interface and its implementations
//! - One-key persistence of the connected address
//! - The session manager tying both together

pub mod address;
pub mod local;
pub mod mock;
pub mod provider;
pub mod session;
pub mod storage;

pub use address::{is_valid_address, same_address, short_address};
pub use local::LocalWalletProvider;
pub use mock::MockWalletProvider;
pub use provider::{AccountsChanged, WalletProvider};
pub use session::{AccountsListener, ConnectOptions, WalletSession, WalletSessionManager};
pub use storage::{FileStore, MemoryStore, SessionStore, WALLET_STORAGE_KEY};
