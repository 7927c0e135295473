//! Static portfolio fixtures backing the dashboard.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::{date, datetime};

use super::types::{ActiveBet, ActivityKind, BetFilter, BetStatus, PortfolioStats, RecentActivity};

static BETS: Lazy<Vec<ActiveBet>> = Lazy::new(|| {
    vec![
        ActiveBet {
            id: "bet1".to_string(),
            market_id: "c1".to_string(),
            market_title: "Bitcoin Above $150K by 2026".to_string(),
            selected_outcome: "Yes".to_string(),
            bet_amount: dec!(500),
            odds: dec!(0.45),
            potential_payout: dec!(1111.11),
            status: BetStatus::Active,
            placed_at: date!(2026 - 01 - 15),
        },
        ActiveBet {
            id: "bet2".to_string(),
            market_id: "p1".to_string(),
            market_title: "US Presidential Election 2028".to_string(),
            selected_outcome: "Republican".to_string(),
            bet_amount: dec!(250),
            odds: dec!(0.52),
            potential_payout: dec!(480.77),
            status: BetStatus::Active,
            placed_at: date!(2026 - 01 - 10),
        },
        ActiveBet {
            id: "bet3".to_string(),
            market_id: "s1".to_string(),
            market_title: "Super Bowl LXII Champion".to_string(),
            selected_outcome: "Kansas City Chiefs".to_string(),
            bet_amount: dec!(100),
            odds: dec!(0.28),
            potential_payout: dec!(357.14),
            status: BetStatus::Active,
            placed_at: date!(2026 - 01 - 08),
        },
        ActiveBet {
            id: "bet4".to_string(),
            market_id: "t2".to_string(),
            market_title: "AGI Announcement by 2027".to_string(),
            selected_outcome: "No".to_string(),
            bet_amount: dec!(200),
            odds: dec!(0.78),
            potential_payout: dec!(256.41),
            status: BetStatus::Active,
            placed_at: date!(2026 - 01 - 05),
        },
        ActiveBet {
            id: "bet5".to_string(),
            market_id: "f2".to_string(),
            market_title: "S&P 500 Above 6500 EOY 2026".to_string(),
            selected_outcome: "Yes".to_string(),
            bet_amount: dec!(300),
            odds: dec!(0.58),
            potential_payout: dec!(517.24),
            status: BetStatus::Won,
            placed_at: date!(2025 - 12 - 20),
        },
        ActiveBet {
            id: "bet6".to_string(),
            market_id: "c3".to_string(),
            market_title: "Solana All-Time High".to_string(),
            selected_outcome: "Yes".to_string(),
            bet_amount: dec!(150),
            odds: dec!(0.38),
            potential_payout: dec!(394.74),
            status: BetStatus::Lost,
            placed_at: date!(2025 - 12 - 15),
        },
    ]
});

static STATS: Lazy<PortfolioStats> = Lazy::new(|| PortfolioStats {
    total_invested: dec!(1500),
    current_value: dec!(2205.43),
    total_profit_loss: dec!(705.43),
    active_bets_count: 4,
    win_rate: dec!(62.5),
});

static ACTIVITY: Lazy<Vec<RecentActivity>> = Lazy::new(|| {
    vec![
        activity(
            "act1",
            ActivityKind::BetPlaced,
            "Placed bet on Bitcoin Above $150K",
            dec!(-500),
            datetime!(2026 - 01 - 15 14:30:00),
        ),
        activity(
            "act2",
            ActivityKind::BetWon,
            "Won bet on S&P 500 Above 6500",
            dec!(517.24),
            datetime!(2026 - 01 - 14 09:00:00),
        ),
        activity(
            "act3",
            ActivityKind::BetPlaced,
            "Placed bet on US Presidential Election",
            dec!(-250),
            datetime!(2026 - 01 - 10 16:45:00),
        ),
        activity(
            "act4",
            ActivityKind::Deposit,
            "Deposited funds",
            dec!(1000),
            datetime!(2026 - 01 - 08 10:00:00),
        ),
        activity(
            "act5",
            ActivityKind::BetLost,
            "Lost bet on Solana All-Time High",
            dec!(-150),
            datetime!(2026 - 01 - 05 18:20:00),
        ),
    ]
});

fn activity(
    id: &str,
    kind: ActivityKind,
    description: &str,
    amount: Decimal,
    timestamp: time::PrimitiveDateTime,
) -> RecentActivity {
    RecentActivity {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        amount,
        timestamp,
    }
}

/// Every bet in the portfolio, newest first.
pub fn all_bets() -> &'static [ActiveBet] {
    &BETS
}

/// Bets selected by a dashboard tab.
pub fn bets(filter: BetFilter) -> Vec<ActiveBet> {
    BETS.iter()
        .filter(|b| filter.includes(b.status))
        .cloned()
        .collect()
}

/// Open bets.
pub fn active_bets() -> Vec<ActiveBet> {
    bets(BetFilter::Active)
}

/// Won or lost bets.
pub fn closed_bets() -> Vec<ActiveBet> {
    bets(BetFilter::Closed)
}

/// Aggregate dashboard figures.
pub fn portfolio_stats() -> PortfolioStats {
    STATS.clone()
}

/// Recent account activity, newest first.
pub fn recent_activity() -> &'static [RecentActivity] {
    &ACTIVITY
}
