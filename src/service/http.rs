//! HTTP market service for a real backend.
//!
//! Speaks the JSON routes served by [`crate::api`], so any deployment of the
//! API can back another client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::betting::{PlaceBetRequest, PlaceBetResult};
use crate::error::ServiceError;
use crate::market::{Category, Market};
use crate::metrics::LatencyTimer;
use crate::portfolio::{ActiveBet, BetFilter, PortfolioStats, RecentActivity};

use super::MarketService;

/// [`MarketService`] backed by a remote PredictX API.
#[derive(Debug, Clone)]
pub struct HttpMarketService {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Backend base URL.
    base: Url,
}

impl HttpMarketService {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_millis(500))
            .build()?;
        Self::with_client(http, base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ServiceError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { http, base })
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Http {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_bets(&self, filter: BetFilter) -> Result<Vec<ActiveBet>, ServiceError> {
        let url = self.endpoint(&["api", "v1", "portfolio", "bets"])?;
        self.get_json(url, &[("status", filter.as_ref())]).await
    }
}

#[async_trait]
impl MarketService for HttpMarketService {
    async fn fetch_all_markets(&self) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_all_markets");
        let url = self.endpoint(&["api", "v1", "markets"])?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_markets_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_markets_by_category");
        let url = self.endpoint(&["api", "v1", "categories", category.as_ref(), "markets"])?;
        self.get_json(url, &[]).await
    }

    async fn fetch_featured_markets(&self) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_featured_markets");
        let url = self.endpoint(&["api", "v1", "markets", "featured"])?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_market_by_id(&self, id: &str) -> Result<Option<Market>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_market_by_id");
        let url = self.endpoint(&["api", "v1", "markets", id])?;

        let response = self.http.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("Market not found");
                Ok(None)
            }
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(ServiceError::Http {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
            }),
        }
    }

    #[instrument(skip(self))]
    async fn search_markets(&self, query: &str) -> Result<Vec<Market>, ServiceError> {
        let _timer = LatencyTimer::new("http_search_markets");
        let url = self.endpoint(&["api", "v1", "markets"])?;
        self.get_json(url, &[("q", query)]).await
    }

    async fn fetch_active_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_active_bets");
        self.fetch_bets(BetFilter::Active).await
    }

    async fn fetch_closed_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_closed_bets");
        self.fetch_bets(BetFilter::Closed).await
    }

    async fn fetch_all_bets(&self) -> Result<Vec<ActiveBet>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_all_bets");
        self.fetch_bets(BetFilter::All).await
    }

    async fn fetch_portfolio_stats(&self) -> Result<PortfolioStats, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_portfolio_stats");
        let url = self.endpoint(&["api", "v1", "portfolio", "stats"])?;
        self.get_json(url, &[]).await
    }

    async fn fetch_recent_activity(&self) -> Result<Vec<RecentActivity>, ServiceError> {
        let _timer = LatencyTimer::new("http_fetch_recent_activity");
        let url = self.endpoint(&["api", "v1", "portfolio", "activity"])?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self), fields(market_id = %request.market_id))]
    async fn place_bet(&self, request: PlaceBetRequest) -> Result<PlaceBetResult, ServiceError> {
        let _timer = LatencyTimer::new("http_place_bet");
        let url = self.endpoint(&["api", "v1", "bets"])?;

        let response = self.http.post(url.clone()).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Http {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}
