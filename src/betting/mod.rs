//! Betting module.
//!
//! This module handles:
//! - Fair-odds payout calculation and bet quotes
//! - Bet placement requests, validation and simulated results

pub mod payout;
pub mod placement;

pub use payout::{calculate_payout, BetQuote, QUICK_AMOUNTS};
pub use placement::{
    bet_id_at, simulate_placement, PlaceBetRequest, PlaceBetResult, ACCEPTED_MESSAGE,
    INVALID_AMOUNT_MESSAGE,
};
