//! HTTP API handlers.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::betting::{BetQuote, PlaceBetRequest, PlaceBetResult};
use crate::error::{ServiceError, WalletError};
use crate::market::{Category, Market};
use crate::portfolio::{ActiveBet, BetFilter, PortfolioStats, RecentActivity};
use crate::service::MarketService;
use crate::wallet::{short_address, ConnectOptions, WalletSession, WalletSessionManager};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether the service is ready to answer requests.
    pub ready: Arc<AtomicBool>,
    /// Market and portfolio data.
    pub service: Arc<dyn MarketService>,
    /// Wallet session.
    pub wallet: WalletSessionManager,
    /// Prometheus handle when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("ready", &self.is_ready())
            .field("wallet", &self.wallet)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create new app state.
    pub fn new(service: Arc<dyn MarketService>, wallet: WalletSessionManager) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            service,
            wallet,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// Error response for API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Resource does not exist.
    NotFound(String),
    /// Malformed request.
    BadRequest(String),
    /// Data service failed.
    Service(ServiceError),
    /// Wallet session failed.
    Wallet(WalletError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError::Wallet(err)
    }
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => {
                warn!(error = %err, "Service call failed");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ApiError::Wallet(err) => {
                let status = match err {
                    WalletError::ProviderMissing => StatusCode::SERVICE_UNAVAILABLE,
                    WalletError::NoAccountSelected => StatusCode::BAD_REQUEST,
                    WalletError::Provider(_) => StatusCode::UNAUTHORIZED,
                    WalletError::InvalidAccount(_) => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Search parameters for the market list.
#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    /// Substring to search for.
    pub q: Option<String>,
}

/// Bet list parameters.
#[derive(Debug, Deserialize)]
pub struct BetsQuery {
    /// Dashboard tab; defaults to active.
    #[serde(default)]
    pub status: BetFilter,
}

/// Payout quote parameters.
#[derive(Debug, Deserialize)]
pub struct PayoutQuery {
    /// Stake.
    pub amount: Decimal,
    /// Outcome probability in percent.
    pub probability: Decimal,
}

/// Everything the dashboard page shows.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Aggregate figures.
    pub stats: PortfolioStats,
    /// Open bets.
    pub active_bets: Vec<ActiveBet>,
    /// Won or lost bets.
    pub closed_bets: Vec<ActiveBet>,
    /// Recent account activity.
    pub activity: Vec<RecentActivity>,
}

/// Category page payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Category key.
    pub category: Category,
    /// Page heading.
    pub label: String,
    /// Markets in the category.
    pub markets: Vec<Market>,
}

/// Wallet session as seen by the login page and navbar.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Whether an address is connected.
    pub connected: bool,
    /// Connected address.
    pub address: Option<String>,
    /// Address shortened for display.
    pub short_address: Option<String>,
    /// A connect call is in flight.
    pub is_connecting: bool,
    /// Last connect error.
    pub error: Option<String>,
    /// Whether a wallet provider is available.
    pub has_provider: bool,
}

impl SessionResponse {
    fn from_session(session: WalletSession, has_provider: bool) -> Self {
        Self {
            connected: session.is_connected(),
            short_address: session.address.as_deref().map(short_address),
            address: session.address,
            is_connecting: session.is_connecting,
            error: session.error,
            has_provider,
        }
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Prometheus exposition, 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ApiError::NotFound("metrics disabled".to_string()).into_response(),
    }
}

/// Home page: featured markets.
pub async fn home(State(state): State<AppState>) -> Result<Json<Vec<Market>>, ApiError> {
    Ok(Json(state.service.fetch_featured_markets().await?))
}

/// All markets, or search results when `q` is given.
pub async fn list_markets(
    State(state): State<AppState>,
    query: Result<Query<MarketQuery>, QueryRejection>,
) -> Result<Json<Vec<Market>>, ApiError> {
    let Query(query) = query?;
    let markets = match query.q {
        Some(q) => state.service.search_markets(&q).await?,
        None => state.service.fetch_all_markets().await?,
    };
    Ok(Json(markets))
}

/// Featured markets.
pub async fn featured_markets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Market>>, ApiError> {
    Ok(Json(state.service.fetch_featured_markets().await?))
}

/// Single market by id.
pub async fn get_market(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Market>, ApiError> {
    state
        .service
        .fetch_market_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("market {} not found", id)))
}

/// Markets in a category, as a bare list.
pub async fn category_markets(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Market>>, ApiError> {
    let category = parse_category(&category)?;
    Ok(Json(state.service.fetch_markets_by_category(category).await?))
}

/// Category page: heading plus markets.
pub async fn category_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = parse_category(&category)?;
    let markets = state.service.fetch_markets_by_category(category).await?;
    Ok(Json(CategoryResponse {
        category,
        label: category.label().to_string(),
        markets,
    }))
}

fn parse_category(raw: &str) -> Result<Category, ApiError> {
    Category::from_str(raw).map_err(|_| ApiError::BadRequest(format!("unknown category: {}", raw)))
}

/// Bets for a dashboard tab.
pub async fn portfolio_bets(
    State(state): State<AppState>,
    query: Result<Query<BetsQuery>, QueryRejection>,
) -> Result<Json<Vec<ActiveBet>>, ApiError> {
    let Query(query) = query?;
    let bets = match query.status {
        BetFilter::Active => state.service.fetch_active_bets().await?,
        BetFilter::Closed => state.service.fetch_closed_bets().await?,
        BetFilter::All => state.service.fetch_all_bets().await?,
    };
    Ok(Json(bets))
}

/// Aggregate portfolio figures.
pub async fn portfolio_stats(
    State(state): State<AppState>,
) -> Result<Json<PortfolioStats>, ApiError> {
    Ok(Json(state.service.fetch_portfolio_stats().await?))
}

/// Recent account activity.
pub async fn portfolio_activity(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentActivity>>, ApiError> {
    Ok(Json(state.service.fetch_recent_activity().await?))
}

/// Dashboard page: stats, both bet tabs and activity in one call.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let service = &state.service;
    let (stats, active_bets, closed_bets, activity) = tokio::try_join!(
        service.fetch_portfolio_stats(),
        service.fetch_active_bets(),
        service.fetch_closed_bets(),
        service.fetch_recent_activity(),
    )?;

    Ok(Json(DashboardResponse {
        stats,
        active_bets,
        closed_bets,
        activity,
    }))
}

/// Payout quote for a stake and probability.
pub async fn payout(
    query: Result<Query<PayoutQuery>, QueryRejection>,
) -> Result<Json<BetQuote>, ApiError> {
    let Query(query) = query?;
    Ok(Json(BetQuote::new(query.amount, query.probability)))
}

/// Place a bet. Validation failures still answer 200 with `success: false`.
pub async fn place_bet(
    State(state): State<AppState>,
    request: Result<Json<PlaceBetRequest>, JsonRejection>,
) -> Result<Json<PlaceBetResult>, ApiError> {
    let Json(request) = request?;
    debug!(market_id = %request.market_id, outcome_id = %request.outcome_id, "Placing bet");
    Ok(Json(state.service.place_bet(request).await?))
}

/// Current wallet session.
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from_session(
        state.wallet.session(),
        state.wallet.has_provider(),
    ))
}

/// Login/signup: connect the wallet.
pub async fn connect_session(
    State(state): State<AppState>,
    options: Result<Json<ConnectOptions>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(options) = options?;
    state.wallet.connect(options).await?;
    Ok(get_session(State(state)).await)
}

/// Logout: forget the wallet locally.
pub async fn disconnect_session(State(state): State<AppState>) -> Json<SessionResponse> {
    state.wallet.disconnect();
    get_session(State(state)).await
}

/// Catch-all for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
