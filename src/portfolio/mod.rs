//! Portfolio module: bets, stats and activity for the dashboard.

pub mod fixtures;
pub mod types;

pub use fixtures::{active_bets, all_bets, bets, closed_bets, portfolio_stats, recent_activity};
pub use types::{ActiveBet, ActivityKind, BetFilter, BetStatus, PortfolioStats, RecentActivity};
