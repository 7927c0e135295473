//! Market module for PredictX prediction markets.
//!
//! This module handles:
//! - Market, outcome and category types
//! - The static market catalogue and its lookup helpers

pub mod fixtures;
pub mod types;

pub use fixtures::{all_markets, featured_markets, market_by_id, markets_by_category, search_markets};
pub use types::{Category, Market, Outcome};
