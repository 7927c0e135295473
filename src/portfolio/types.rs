//! Portfolio types: bets, aggregate stats and account activity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::{Date, PrimitiveDateTime};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    local_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// Lifecycle state of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BetStatus {
    /// Market has not resolved yet.
    Active,
    /// Resolved in the bettor's favour.
    Won,
    /// Resolved against the bettor.
    Lost,
}

/// Dashboard tab selecting which bets to list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BetFilter {
    /// Only open bets.
    #[default]
    Active,
    /// Won or lost bets.
    Closed,
    /// Everything.
    All,
}

impl BetFilter {
    /// Whether a bet with `status` is listed under this filter.
    pub fn includes(&self, status: BetStatus) -> bool {
        match self {
            BetFilter::Active => status == BetStatus::Active,
            BetFilter::Closed => status != BetStatus::Active,
            BetFilter::All => true,
        }
    }
}

/// A bet held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBet {
    /// Bet identifier.
    pub id: String,
    /// Market the bet was placed on.
    pub market_id: String,
    /// Market title at the time of placement.
    pub market_title: String,
    /// Name of the chosen outcome.
    pub selected_outcome: String,
    /// Stake.
    pub bet_amount: Decimal,
    /// Implied odds as a 0-1 fraction.
    pub odds: Decimal,
    /// Payout if the outcome resolves in favour.
    pub potential_payout: Decimal,
    /// Current status.
    pub status: BetStatus,
    /// Placement date.
    #[serde(with = "calendar_date")]
    pub placed_at: Date,
}

impl ActiveBet {
    /// Profit if the bet wins.
    pub fn potential_profit(&self) -> Decimal {
        self.potential_payout - self.bet_amount
    }
}

/// Aggregate portfolio figures shown on the dashboard.
///
/// These are fixture values and are not derived from the bet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Total amount staked.
    pub total_invested: Decimal,
    /// Current marked value.
    pub current_value: Decimal,
    /// Current value minus invested.
    pub total_profit_loss: Decimal,
    /// Number of open bets.
    pub active_bets_count: u32,
    /// Win rate in percent.
    pub win_rate: Decimal,
}

/// Kind of account activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityKind {
    /// A bet was placed.
    BetPlaced,
    /// A bet paid out.
    BetWon,
    /// A bet expired worthless.
    BetLost,
    /// Funds added.
    Deposit,
    /// Funds removed.
    Withdrawal,
}

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    /// Activity identifier.
    pub id: String,
    /// What happened.
    pub kind: ActivityKind,
    /// Human-readable description.
    pub description: String,
    /// Signed amount; negative for outflows.
    pub amount: Decimal,
    /// When it happened (local time, no offset).
    #[serde(with = "local_timestamp")]
    pub timestamp: PrimitiveDateTime,
}

impl RecentActivity {
    /// Whether the entry credited the account.
    pub fn is_credit(&self) -> bool {
        self.amount >= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use time::macros::{date, datetime};

    #[test]
    fn bet_filter_includes() {
        assert!(BetFilter::Active.includes(BetStatus::Active));
        assert!(!BetFilter::Active.includes(BetStatus::Won));
        assert!(BetFilter::Closed.includes(BetStatus::Lost));
        assert!(!BetFilter::Closed.includes(BetStatus::Active));
        assert!(BetFilter::All.includes(BetStatus::Won));
    }

    #[test]
    fn bet_filter_parses_case_insensitively() {
        assert_eq!(BetFilter::from_str("Closed").unwrap(), BetFilter::Closed);
        assert_eq!(BetFilter::default(), BetFilter::Active);
    }

    #[test]
    fn potential_profit() {
        let bet = ActiveBet {
            id: "bet1".to_string(),
            market_id: "c1".to_string(),
            market_title: "Bitcoin Above $150K by 2026".to_string(),
            selected_outcome: "Yes".to_string(),
            bet_amount: dec!(500),
            odds: dec!(0.45),
            potential_payout: dec!(1111.11),
            status: BetStatus::Active,
            placed_at: date!(2026 - 01 - 15),
        };
        assert_eq!(bet.potential_profit(), dec!(611.11));
    }

    #[test]
    fn activity_wire_format() {
        let activity = RecentActivity {
            id: "act1".to_string(),
            kind: ActivityKind::BetPlaced,
            description: "Placed bet on Bitcoin Above $150K".to_string(),
            amount: dec!(-500),
            timestamp: datetime!(2026 - 01 - 15 14:30:00),
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["kind"], "bet_placed");
        assert_eq!(json["timestamp"], "2026-01-15T14:30:00");
        assert!(!activity.is_credit());
    }
}
