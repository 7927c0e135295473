//! Bet placement request and result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Message returned when the stake is not positive.
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid bet amount";
/// Message returned for an accepted bet.
pub const ACCEPTED_MESSAGE: &str = "Bet placed successfully!";

/// A bet to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceBetRequest {
    /// Market identifier.
    pub market_id: String,
    /// Outcome identifier within the market.
    pub outcome_id: String,
    /// Stake.
    pub amount: Decimal,
}

impl PlaceBetRequest {
    /// Create a new request.
    pub fn new(market_id: impl Into<String>, outcome_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            market_id: market_id.into(),
            outcome_id: outcome_id.into(),
            amount,
        }
    }

    /// Validate request parameters.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.amount <= Decimal::ZERO {
            return Err(INVALID_AMOUNT_MESSAGE);
        }
        Ok(())
    }
}

/// Outcome of a placement attempt.
///
/// Validation failures are reported here with `success == false` rather
/// than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBetResult {
    /// Whether the bet was accepted.
    pub success: bool,
    /// Identifier of the accepted bet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<String>,
    /// Message for the user.
    pub message: String,
}

impl PlaceBetResult {
    /// An accepted bet.
    pub fn accepted(bet_id: impl Into<String>) -> Self {
        Self {
            success: true,
            bet_id: Some(bet_id.into()),
            message: ACCEPTED_MESSAGE.to_string(),
        }
    }

    /// A rejected bet.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            bet_id: None,
            message: message.into(),
        }
    }
}

/// Time-based bet identifier, `bet_<unix millis>`.
pub fn bet_id_at(at: OffsetDateTime) -> String {
    format!("bet_{}", at.unix_timestamp_nanos() / 1_000_000)
}

/// Simulate placement: reject non-positive stakes, accept everything else.
///
/// Nothing is recorded; the portfolio is left untouched.
pub fn simulate_placement(request: &PlaceBetRequest, at: OffsetDateTime) -> PlaceBetResult {
    match request.validate() {
        Ok(()) => PlaceBetResult::accepted(bet_id_at(at)),
        Err(message) => PlaceBetResult::rejected(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    #[test]
    fn non_positive_amounts_are_rejected() {
        let now = OffsetDateTime::now_utc();
        for amount in [dec!(0), dec!(-1), dec!(-0.01)] {
            let result = simulate_placement(&PlaceBetRequest::new("c1", "c1-1", amount), now);
            assert!(!result.success);
            assert!(result.bet_id.is_none());
            assert_eq!(result.message, INVALID_AMOUNT_MESSAGE);
        }
    }

    #[test]
    fn positive_amounts_are_accepted() {
        let now = OffsetDateTime::now_utc();
        for amount in [dec!(0.01), dec!(10), dec!(250)] {
            let result = simulate_placement(&PlaceBetRequest::new("c1", "c1-1", amount), now);
            assert!(result.success);
            assert!(!result.bet_id.unwrap().is_empty());
            assert_eq!(result.message, ACCEPTED_MESSAGE);
        }
    }

    #[test]
    fn unknown_market_is_still_accepted() {
        let result = simulate_placement(
            &PlaceBetRequest::new("nope", "nope-1", dec!(5)),
            OffsetDateTime::now_utc(),
        );
        assert!(result.success);
    }

    #[test]
    fn bet_id_uses_unix_millis() {
        let at = datetime!(2026-01-15 14:30:00.250 UTC);
        assert_eq!(bet_id_at(at), "bet_1768487400250");
    }
}
