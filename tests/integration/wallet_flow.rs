//! Wallet session lifecycle over the HTTP API and across restarts.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use predictx::api::handlers::SessionResponse;
use predictx::wallet::{
    FileStore, LocalWalletProvider, SessionStore, WalletProvider, WalletSessionManager,
    WALLET_STORAGE_KEY,
};
use serde_json::json;

use super::{spawn_api, test_state};

const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";
const ADDR_ONE: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
const KEY_TWO: &str = "0x0000000000000000000000000000000000000000000000000000000000000002";

#[tokio::test]
async fn login_logout_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let provider: Arc<dyn WalletProvider> =
        Arc::new(LocalWalletProvider::from_private_key(KEY_ONE).unwrap());
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(&path));
    let addr = spawn_api(test_state(Some(provider), store.clone())).await;
    let http = reqwest::Client::new();
    let session_url = format!("http://{}/api/v1/session", addr);

    let session: SessionResponse = http
        .post(&session_url)
        .json(&json!({ "sign_message": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(session.connected);
    assert_eq!(session.address.as_deref(), Some(ADDR_ONE));
    assert_eq!(store.load().unwrap().as_deref(), Some(ADDR_ONE));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[WALLET_STORAGE_KEY], ADDR_ONE);

    let session: SessionResponse = http
        .delete(&session_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!session.connected);
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn session_survives_restart_with_same_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = WalletSessionManager::new(
        Some(Arc::new(LocalWalletProvider::from_private_key(KEY_ONE).unwrap())),
        Arc::new(FileStore::new(&path)),
        "http://localhost:8080",
    );
    first.connect(Default::default()).await.unwrap();

    let second = WalletSessionManager::new(
        Some(Arc::new(
            LocalWalletProvider::from_private_key(KEY_ONE)
                .unwrap()
                .preauthorized(),
        )),
        Arc::new(FileStore::new(&path)),
        "http://localhost:8080",
    );
    assert_eq!(second.restore().await.as_deref(), Some(ADDR_ONE));
    assert_eq!(second.address().as_deref(), Some(ADDR_ONE));
}

#[tokio::test]
async fn restart_with_different_key_erases_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = WalletSessionManager::new(
        Some(Arc::new(LocalWalletProvider::from_private_key(KEY_ONE).unwrap())),
        Arc::new(FileStore::new(&path)),
        "http://localhost:8080",
    );
    first.connect(Default::default()).await.unwrap();

    let store = Arc::new(FileStore::new(&path));
    let second = WalletSessionManager::new(
        Some(Arc::new(
            LocalWalletProvider::from_private_key(KEY_TWO)
                .unwrap()
                .preauthorized(),
        )),
        store.clone(),
        "http://localhost:8080",
    );
    assert_eq!(second.restore().await, None);
    assert_eq!(second.address(), None);
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn revoked_provider_disconnects_listening_session() {
    let provider = Arc::new(LocalWalletProvider::from_private_key(KEY_ONE).unwrap());
    let manager = WalletSessionManager::new(
        Some(provider.clone()),
        Arc::new(predictx::wallet::MemoryStore::new()),
        "http://localhost:8080",
    );
    let listener = manager.listen().unwrap();
    let mut updates = manager.subscribe();

    manager.connect(Default::default()).await.unwrap();
    assert!(manager.session().is_connected());

    provider.revoke();
    updates
        .wait_for(|s| s.address.is_none())
        .await
        .unwrap();
    assert!(!manager.session().is_connected());

    listener.unsubscribe();
}
