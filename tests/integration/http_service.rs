//! `HttpMarketService` against a live API backed by the fixtures.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use predictx::betting::{PlaceBetRequest, ACCEPTED_MESSAGE, INVALID_AMOUNT_MESSAGE};
use predictx::error::ServiceError;
use predictx::market::{self, Category};
use predictx::portfolio::{self, BetStatus};
use predictx::service::{HttpMarketService, MarketService};
use predictx::wallet::MemoryStore;
use rust_decimal_macros::dec;

use super::{spawn_api, test_state};

async fn client() -> HttpMarketService {
    let addr = spawn_api(test_state(None, Arc::new(MemoryStore::new()))).await;
    HttpMarketService::new(&format!("http://{}/", addr)).unwrap()
}

#[tokio::test]
async fn markets_round_trip_through_the_api() {
    let service = client().await;

    let all = service.fetch_all_markets().await.unwrap();
    assert_eq!(all, market::all_markets().to_vec());

    let featured = service.fetch_featured_markets().await.unwrap();
    assert_eq!(featured, market::featured_markets());

    for category in Category::ALL {
        let markets = service.fetch_markets_by_category(category).await.unwrap();
        assert!(!markets.is_empty());
        assert!(markets.iter().all(|m| m.category == category));
    }
}

#[tokio::test]
async fn market_lookup_and_search() {
    let service = client().await;

    let market = service.fetch_market_by_id("t2").await.unwrap().unwrap();
    assert_eq!(market.category, Category::Tech);
    assert_eq!(service.fetch_market_by_id("nope").await.unwrap(), None);

    let hits = service.search_markets("Bitcoin").await.unwrap();
    assert_eq!(hits.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), vec!["c1"]);

    let everything = service.search_markets("").await.unwrap();
    assert_eq!(everything.len(), market::all_markets().len());
}

#[tokio::test]
async fn portfolio_round_trips_through_the_api() {
    let service = client().await;

    let active = service.fetch_active_bets().await.unwrap();
    assert!(active.iter().all(|b| b.status == BetStatus::Active));
    assert_eq!(active, portfolio::active_bets());

    let closed = service.fetch_closed_bets().await.unwrap();
    assert!(closed.iter().all(|b| b.status != BetStatus::Active));

    let all = service.fetch_all_bets().await.unwrap();
    assert_eq!(all.len(), active.len() + closed.len());

    let stats = service.fetch_portfolio_stats().await.unwrap();
    assert_eq!(stats, portfolio::portfolio_stats());

    let activity = service.fetch_recent_activity().await.unwrap();
    assert_eq!(activity, portfolio::recent_activity());
}

#[tokio::test]
async fn place_bet_through_the_api() {
    let service = client().await;

    let accepted = service
        .place_bet(PlaceBetRequest::new("c1", "c1-1", dec!(25)))
        .await
        .unwrap();
    assert!(accepted.success);
    assert_eq!(accepted.message, ACCEPTED_MESSAGE);
    assert!(accepted.bet_id.unwrap().starts_with("bet_"));

    let rejected = service
        .place_bet(PlaceBetRequest::new("c1", "c1-1", dec!(-5)))
        .await
        .unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.message, INVALID_AMOUNT_MESSAGE);
    assert_eq!(rejected.bet_id, None);
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    let service = HttpMarketService::new("http://127.0.0.1:1/").unwrap();
    let err = service.fetch_all_markets().await.unwrap_err();
    assert!(matches!(err, ServiceError::Request(_)));
}
