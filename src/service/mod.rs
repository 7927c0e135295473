//! Market and portfolio data access.
//!
//! Callers depend on the [`MarketService`] trait only, so the in-process
//! mock can be swapped for a real backend without touching them.

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::betting::{PlaceBetRequest, PlaceBetResult};
use crate::error::ServiceError;
use crate::market::{Category, Market};
use crate::portfolio::{ActiveBet, PortfolioStats, RecentActivity};

pub use http::HttpMarketService;
pub use mock::{MockMarketService, MockServiceConfig};

/// Asynchronous façade over markets, portfolio and bet placement.
#[async_trait]
pub trait MarketService: Send + Sync {
    /// Every market.
    async fn fetch_all_markets(&self) -> Result<Vec<Market>, ServiceError>;

    /// Markets in one category, catalogue order preserved.
    async fn fetch_markets_by_category(&self, category: Category)
        -> Result<Vec<Market>, ServiceError>;

    /// Markets shown on the home page.
    async fn fetch_featured_markets(&self) -> Result<Vec<Market>, ServiceError>;

    /// A single market, or `None` if the id is unknown.
    async fn fetch_market_by_id(&self, id: &str) -> Result<Option<Market>, ServiceError>;

    /// Case-insensitive search over title and description.
    async fn search_markets(&self, query: &str) -> Result<Vec<Market>, ServiceError>;

    /// Open bets.
    async fn fetch_active_bets(&self) -> Result<Vec<ActiveBet>, ServiceError>;

    /// Won or lost bets.
    async fn fetch_closed_bets(&self) -> Result<Vec<ActiveBet>, ServiceError>;

    /// Every bet.
    async fn fetch_all_bets(&self) -> Result<Vec<ActiveBet>, ServiceError>;

    /// Aggregate dashboard figures.
    async fn fetch_portfolio_stats(&self) -> Result<PortfolioStats, ServiceError>;

    /// Recent account activity.
    async fn fetch_recent_activity(&self) -> Result<Vec<RecentActivity>, ServiceError>;

    /// Place a bet. An invalid amount is reported in the result, not as an error.
    async fn place_bet(&self, request: PlaceBetRequest) -> Result<PlaceBetResult, ServiceError>;

    /// Markets for a listing filtered by an optional category and query.
    ///
    /// Without a category the query goes through [`search_markets`]; with
    /// one, that category's markets are filtered locally.
    ///
    /// [`search_markets`]: MarketService::search_markets
    async fn browse_markets(
        &self,
        category: Option<Category>,
        query: Option<&str>,
    ) -> Result<Vec<Market>, ServiceError> {
        match (category, query) {
            (Some(category), query) => {
                let mut markets = self.fetch_markets_by_category(category).await?;
                if let Some(query) = query {
                    markets.retain(|m| m.matches(query));
                }
                Ok(markets)
            }
            (None, Some(query)) => self.search_markets(query).await,
            (None, None) => self.fetch_all_markets().await,
        }
    }
}
