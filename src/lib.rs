//! PredictX prediction-market client.
//!
//! Browse binary and multi-outcome markets by category, quote fair-odds
//! payouts, place simulated bets and follow a portfolio, with an
//! Ethereum-style wallet as the only identity.
//!
//! # Payouts
//!
//! A stake on an outcome priced at `p` percent pays `stake / (p / 100)`:
//!
//! ```text
//! Stake:        $50.00
//! Probability:  25%
//! ─────────────────────
//! Payout:       $200.00
//! Profit:       +$150.00
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Market and category types, fixture catalogue
//! - [`portfolio`]: Bets, stats and account activity
//! - [`betting`]: Payout math and bet placement
//! - [`service`]: Async data service, mock and HTTP backed
//! - [`wallet`]: Wallet provider, persistence and session manager
//! - [`api`]: HTTP API for the pages and the wallet session
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod betting;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod portfolio;
pub mod service;
pub mod utils;
pub mod wallet;

pub use config::Config;
pub use error::{AppError, Result};
