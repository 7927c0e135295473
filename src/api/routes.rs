//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    category_markets, category_page, connect_session, dashboard, disconnect_session,
    featured_markets, get_market, get_session, health, home, list_markets, metrics, not_found,
    payout, place_bet, portfolio_activity, portfolio_bets, portfolio_stats, ready, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        // Markets
        .route("/api/v1/home", get(home))
        .route("/api/v1/markets", get(list_markets))
        .route("/api/v1/markets/featured", get(featured_markets))
        .route("/api/v1/markets/:id", get(get_market))
        .route("/api/v1/categories/:category", get(category_page))
        .route("/api/v1/categories/:category/markets", get(category_markets))
        // Portfolio
        .route("/api/v1/portfolio/bets", get(portfolio_bets))
        .route("/api/v1/portfolio/stats", get(portfolio_stats))
        .route("/api/v1/portfolio/activity", get(portfolio_activity))
        .route("/api/v1/dashboard", get(dashboard))
        // Betting
        .route("/api/v1/payout", get(payout))
        .route("/api/v1/bets", post(place_bet))
        // Wallet session
        .route(
            "/api/v1/session",
            get(get_session).post(connect_session).delete(disconnect_session),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::service::{MockMarketService, MockServiceConfig};
    use crate::wallet::{MemoryStore, MockWalletProvider, WalletProvider, WalletSessionManager};

    const ADDR: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    fn state_with(provider: Option<Arc<dyn WalletProvider>>) -> AppState {
        let wallet =
            WalletSessionManager::new(provider, Arc::new(MemoryStore::new()), "http://localhost:8080");
        AppState::new(
            Arc::new(MockMarketService::with_config(MockServiceConfig::instant())),
            wallet,
        )
    }

    fn state() -> AppState {
        state_with(None)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read(response).await
    }

    async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ids(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = create_router(state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_503_when_not_ready() {
        let app = create_router(state());

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_200_when_ready() {
        let state = state();
        state.set_ready(true);
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_disabled_is_404() {
        let app = create_router(state());
        let (status, body) = get_json(app, "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "metrics disabled");
    }

    #[tokio::test]
    async fn home_lists_featured_markets() {
        let (status, body) = get_json(create_router(state()), "/api/v1/home").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["p1", "s1", "c1", "f1", "t2"]);
    }

    #[tokio::test]
    async fn market_search_is_case_insensitive() {
        let (status, body) = get_json(create_router(state()), "/api/v1/markets?q=BITCOIN").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["c1"]);

        let (_, body) = get_json(create_router(state()), "/api/v1/markets").await;
        assert_eq!(body.as_array().unwrap().len(), 18);
    }

    #[tokio::test]
    async fn featured_route_wins_over_id_capture() {
        let (status, body) = get_json(create_router(state()), "/api/v1/markets/featured").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn market_by_id() {
        let (status, body) = get_json(create_router(state()), "/api/v1/markets/c1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "crypto");

        let (status, body) = get_json(create_router(state()), "/api/v1/markets/zzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "market zzz not found");
    }

    #[tokio::test]
    async fn category_routes() {
        let (status, body) =
            get_json(create_router(state()), "/api/v1/categories/crypto/markets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["c1", "c2", "c3", "c4"]);

        let (status, body) = get_json(create_router(state()), "/api/v1/categories/Tech").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "tech");
        assert_eq!(body["markets"].as_array().unwrap().len(), 4);

        let (status, _) =
            get_json(create_router(state()), "/api/v1/categories/weather/markets").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn portfolio_tabs() {
        let (_, active) = get_json(create_router(state()), "/api/v1/portfolio/bets").await;
        assert_eq!(active.as_array().unwrap().len(), 4);

        let (_, closed) =
            get_json(create_router(state()), "/api/v1/portfolio/bets?status=closed").await;
        assert_eq!(ids(&closed), vec!["bet5", "bet6"]);

        let (_, all) = get_json(create_router(state()), "/api/v1/portfolio/bets?status=all").await;
        assert_eq!(all.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn dashboard_combines_everything() {
        let (status, body) = get_json(create_router(state()), "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["active_bets_count"], 4);
        assert_eq!(body["active_bets"].as_array().unwrap().len(), 4);
        assert_eq!(body["closed_bets"].as_array().unwrap().len(), 2);
        assert_eq!(body["activity"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn payout_quote() {
        let (status, body) =
            get_json(create_router(state()), "/api/v1/payout?amount=50&probability=25").await;
        assert_eq!(status, StatusCode::OK);
        let decimal = |v: &Value| v.as_str().unwrap().parse::<Decimal>().unwrap();
        assert_eq!(decimal(&body["payout"]), dec!(200));
        assert_eq!(decimal(&body["profit"]), dec!(150));
    }

    #[tokio::test]
    async fn place_bet_accepts_and_rejects() {
        let body = serde_json::json!({"market_id": "c1", "outcome_id": "c1-1", "amount": "25"});
        let (status, result) =
            send_json(create_router(state()), Method::POST, "/api/v1/bets", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["success"], true);
        assert!(result["bet_id"].as_str().unwrap().starts_with("bet_"));

        let body = serde_json::json!({"market_id": "c1", "outcome_id": "c1-1", "amount": "0"});
        let (status, result) =
            send_json(create_router(state()), Method::POST, "/api/v1/bets", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["success"], false);
        assert_eq!(result["message"], "Invalid bet amount");
        assert!(result.get("bet_id").is_none());
    }

    #[tokio::test]
    async fn malformed_query_is_json_400() {
        let (status, body) =
            get_json(create_router(state()), "/api/v1/payout?amount=abc&probability=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

        let (status, body) =
            get_json(create_router(state()), "/api/v1/portfolio/bets?status=pending").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_bet_body_is_json_400() {
        let body = serde_json::json!({"market_id": "c1", "outcome_id": "c1-1"});
        let (status, result) =
            send_json(create_router(state()), Method::POST, "/api/v1/bets", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(result["error"].is_string());

        let response = create_router(state())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/bets")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, result) = read(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(result["error"].is_string());
    }

    #[tokio::test]
    async fn session_without_provider() {
        let (status, body) = send_json(
            create_router(state()),
            Method::POST,
            "/api/v1/session",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["error"],
            "No wallet provider detected. Install a browser wallet to continue."
        );
    }

    #[tokio::test]
    async fn session_connect_and_disconnect() {
        let provider: Arc<dyn WalletProvider> = Arc::new(MockWalletProvider::new([ADDR]));
        let state = state_with(Some(provider));

        let (status, body) = send_json(
            create_router(state.clone()),
            Method::POST,
            "/api/v1/session",
            serde_json::json!({"sign_message": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], true);
        assert_eq!(body["address"], ADDR);
        assert_eq!(body["short_address"], "0x7E5F...5Bdf");

        let (_, body) = get_json(create_router(state.clone()), "/api/v1/session").await;
        assert_eq!(body["address"], ADDR);

        let (status, body) = send_json(
            create_router(state),
            Method::DELETE,
            "/api/v1/session",
            Value::Null,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], false);
        assert!(body["address"].is_null());
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = get_json(create_router(state()), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
    }
}
