//! Payout calculations for bets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Preset stake amounts offered by the bet form.
pub const QUICK_AMOUNTS: [u32; 5] = [10, 25, 50, 100, 250];

/// Fair-odds payout for staking `amount` on an outcome priced at
/// `probability` percent.
///
/// Returns `amount / (probability / 100)`, unrounded. Odds are undefined at
/// the edges, so any probability `<= 0` or `>= 100` yields zero. A quote
/// that cannot be represented also yields zero: a probability so small its
/// implied price rounds to nothing, or a payout beyond `Decimal::MAX`.
pub fn calculate_payout(amount: Decimal, probability: Decimal) -> Decimal {
    if probability <= Decimal::ZERO || probability >= Decimal::ONE_HUNDRED {
        return Decimal::ZERO;
    }
    probability
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|price| amount.checked_div(price))
        .unwrap_or(Decimal::ZERO)
}

/// Quote shown before placing a bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetQuote {
    /// Stake.
    pub amount: Decimal,
    /// Outcome probability in percent.
    pub probability: Decimal,
    /// Payout if the outcome wins.
    pub payout: Decimal,
    /// Payout minus stake.
    pub profit: Decimal,
}

impl BetQuote {
    /// Quote a stake against an outcome probability.
    ///
    /// Profit is zero when `payout - amount` overflows.
    pub fn new(amount: Decimal, probability: Decimal) -> Self {
        let payout = calculate_payout(amount, probability);
        Self {
            amount,
            probability,
            payout,
            profit: payout.checked_sub(amount).unwrap_or(Decimal::ZERO),
        }
    }

    /// Payout rounded to cents for display.
    pub fn display_payout(&self) -> Decimal {
        self.payout.round_dp(2)
    }

    /// Return on stake in percent, or zero for an empty stake or when the
    /// ratio is not representable.
    pub fn return_pct(&self) -> Decimal {
        self.profit
            .checked_div(self.amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }
}
