//! Mock market service over the static fixtures.
//!
//! Each call waits a fixed artificial delay before answering from the
//! in-memory fixtures, standing in for a future network API.

use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::betting::{simulate_placement, PlaceBetRequest, PlaceBetResult};
use crate::error::ServiceError;
use crate::market::{self, Category, Market};
use crate::metrics::{self, LatencyTimer};
use crate::portfolio::{self, ActiveBet, PortfolioStats, RecentActivity};

use super::MarketService;

/// Artificial delays per kind of call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Listing markets, bets, stats or activity.
    pub list: Duration,
    /// Looking up a single market.
    pub lookup: Duration,
    /// Searching markets.
    pub search: Duration,
    /// Placing a bet.
    pub place_bet: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(100),
            lookup: Duration::from_millis(50),
            search: Duration::from_millis(150),
            place_bet: Duration::from_millis(500),
        }
    }
}

impl Latency {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
            search: Duration::ZERO,
            place_bet: Duration::ZERO,
        }
    }
}

/// Configuration for mock service behavior.
#[derive(Debug, Clone, Default)]
pub struct MockServiceConfig {
    /// Artificial delays.
    pub latency: Latency,
    /// Fail every call with `ServiceError::Unavailable`.
    pub fail_requests: bool,
}

impl MockServiceConfig {
    /// Configuration without delays, for tests and tooling.
    pub fn instant() -> Self {
        Self {
            latency: Latency::none(),
            fail_requests: false,
        }
    }
}

/// Fixture-backed implementation of [`MarketService`].
#[derive(Debug, Clone, Default)]
pub struct MockMarketService {
    config: MockServiceConfig,
}

impl MockMarketService {
    /// Create a mock service with the default delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service with custom configuration.
    pub fn with_config(config: MockServiceConfig) -> Self {
        Self { config }
    }

    /// Create a mock service, optionally without delays.
    pub fn with_latency(simulate: bool) -> Self {
        if simulate {
            Self::new()
        } else {
            Self::with_config(MockServiceConfig::instant())
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &MockServiceConfig {
        &self.config
    }

    async fn delay(&self, duration: Duration) -> Result<(), ServiceError> {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
        if self.config.fail_requests {
            return Err(ServiceError::Unavailable("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketService for MockMarketService {
    async fn fetch_all_markets(&self) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_all_markets");
        self.delay(self.config.latency.list).await?;
        Ok(market::all_markets().to_vec())
    }

    #[instrument(skip(self))]
    async fn fetch_markets_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_markets_by_category");
        self.delay(self.config.latency.list).await?;
        Ok(market::markets_by_category(category))
    }

    async fn fetch_featured_markets(&self) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_featured_markets");
        self.delay(self.config.latency.list).await?;
        Ok(market::featured_markets())
    }

    #[instrument(skip(self))]
    async fn fetch_market_by_id(&self, id: &str) -> Result<Option<Market>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_market_by_id");
        self.delay(self.config.latency.lookup).await?;
        Ok(market::market_by_id(id))
    }

    #[instrument(skip(self))]
    async fn search_markets(&self, query: &str) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("search_markets");
        self.delay(self.config.latency.search).await?;
        let results = market::search_markets(query);
        debug!(count = results.len(), "Search complete");
        Ok(results)
    }

    async fn fetch_active_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_active_bets");
        self.delay(self.config.latency.list).await?;
        Ok(portfolio::active_bets())
    }

    async fn fetch_closed_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_closed_bets");
        self.delay(self.config.latency.list).await?;
        Ok(portfolio::closed_bets())
    }

    async fn fetch_all_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_all_bets");
        self.delay(self.config.latency.list).await?;
        Ok(portfolio::all_bets().to_vec())
    }

    async fn fetch_portfolio_stats(&self) -> Result<PortfolioStats, ServiceError> {
        let _timer = LatencyTimer::new("fetch_portfolio_stats");
        self.delay(self.config.latency.list).await?;
        Ok(portfolio::portfolio_stats())
    }

    async fn fetch_recent_activity(&self) -> Result<Vec<RecentActivity>, ServiceError> {
        let _timer = LatencyTimer::new("fetch_recent_activity");
        self.delay(self.config.latency.list).await?;
        Ok(portfolio::recent_activity().to_vec())
    }

    #[instrument(skip(self), fields(market_id = %request.market_id, amount = %request.amount))]
    async fn place_bet(&self, request: PlaceBetRequest) -> Result<PlaceBetResult, ServiceError> {
        let _timer = LatencyTimer::new("place_bet");
        self.delay(self.config.latency.place_bet).await?;

        let result = simulate_placement(&request, OffsetDateTime::now_utc());
        if result.success {
            metrics::inc_bets_placed();
            debug!(bet_id = ?result.bet_id, "Bet accepted");
        } else {
            metrics::inc_bets_rejected();
            debug!(reason = %result.message, "Bet rejected");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn instant() -> MockMarketService {
        MockMarketService::with_config(MockServiceConfig::instant())
    }

    #[tokio::test]
    async fn category_fetch_returns_only_that_category() {
        let markets = instant()
            .fetch_markets_by_category(Category::Crypto)
            .await
            .unwrap();
        let ids: Vec<_> = markets.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4"]);
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let results = instant().search_markets("BITCOIN").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "c1");
    }

    #[tokio::test]
    async fn unknown_market_is_none() {
        assert!(instant().fetch_market_by_id("x9").await.unwrap().is_none());
        assert!(instant().fetch_market_by_id("t4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn place_bet_validates_amount() {
        let service = instant();

        let rejected = service
            .place_bet(PlaceBetRequest::new("c1", "c1-1", dec!(0)))
            .await
            .unwrap();
        assert!(!rejected.success);

        let accepted = service
            .place_bet(PlaceBetRequest::new("c1", "c1-1", dec!(25)))
            .await
            .unwrap();
        assert!(accepted.success);
        assert!(accepted.bet_id.unwrap().starts_with("bet_"));
    }

    #[tokio::test]
    async fn placing_a_bet_leaves_portfolio_untouched() {
        let service = instant();
        let before = service.fetch_all_bets().await.unwrap();
        service
            .place_bet(PlaceBetRequest::new("c2", "c2-1", dec!(40)))
            .await
            .unwrap();
        assert_eq!(service.fetch_all_bets().await.unwrap(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_wait_the_configured_delay() {
        let service = MockMarketService::new();
        let start = tokio::time::Instant::now();
        service
            .place_bet(PlaceBetRequest::new("c1", "c1-1", dec!(1)))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        service.fetch_market_by_id("c1").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn failure_mode() {
        let service = MockMarketService::with_config(MockServiceConfig {
            latency: Latency::none(),
            fail_requests: true,
        });
        assert!(matches!(
            tokio_test::block_on(service.fetch_portfolio_stats()),
            Err(ServiceError::Unavailable(_))
        ));
        tokio_test::assert_err!(tokio_test::block_on(service.fetch_all_markets()));
    }
}
