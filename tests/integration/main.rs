//! Integration tests for PredictX.
//!
//! The API is served on an ephemeral local port and driven through the
//! public crate surface, so no external services are needed.
//! Run with: cargo test --test integration

mod http_service;
mod wallet_flow;

use std::net::SocketAddr;
use std::sync::Arc;

use predictx::api::{create_router, AppState};
use predictx::service::{MockMarketService, MockServiceConfig};
use predictx::wallet::{SessionStore, WalletProvider, WalletSessionManager};
use tokio::net::TcpListener;

/// Serve the API for `state` on 127.0.0.1 and return its address.
pub async fn spawn_api(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    addr
}

/// App state over the fixtures with no artificial delays.
pub fn test_state(
    provider: Option<Arc<dyn WalletProvider>>,
    store: Arc<dyn SessionStore>,
) -> AppState {
    let wallet = WalletSessionManager::new(provider, store, "http://localhost:8080");
    let state = AppState::new(
        Arc::new(MockMarketService::with_config(MockServiceConfig::instant())),
        wallet,
    );
    state.set_ready(true);
    state
}
