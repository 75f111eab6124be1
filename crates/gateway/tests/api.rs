//! End-to-end tests driving the gateway over real HTTP.
//!
//! Each test boots the full router on an ephemeral port with in-memory
//! collaborators and talks to it with a plain HTTP client, so the
//! middleware, extractors, and response mapping are all exercised as
//! deployed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use hashgate_authn::{
    Authorizer, now_millis,
    testutil::{TestKey, bearer},
};
use hashgate_gateway::{AppState, router};
use hashgate_market::{
    MarketData,
    testutil::{FailingMarketData, StaticMarketData},
};
use hashgate_registry::{
    MemoryTokenRegistry, RegistryError, TokenBinding, TokenHash, TokenRegistry,
};

// 2024-06-20T00:00:00Z
const DAY_START: i64 = 1_718_841_600_000;
const DAY_MILLIS: i64 = 86_400_000;

struct TestGateway {
    base_url: String,
    registry: MemoryTokenRegistry,
    client: reqwest::Client,
}

impl TestGateway {
    async fn start() -> Self {
        Self::start_with_market(Arc::new(sample_market())).await
    }

    async fn start_with_market(market: Arc<dyn MarketData>) -> Self {
        let registry = MemoryTokenRegistry::new();
        let authorizer = Authorizer::new(Arc::new(registry.clone()));
        Self::serve(AppState::with_collaborators(authorizer, market), registry).await
    }

    async fn serve(state: AppState, registry: MemoryTokenRegistry) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            registry,
            client: reqwest::Client::new(),
        }
    }

    fn authorized_header(&self, account_id: &str) -> String {
        let key = TestKey::generate();
        let token = key.mint_token(account_id, now_millis());
        self.registry.register(*token.hash(), account_id);
        bearer(&token)
    }

    async fn get(&self, path: &str, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{path}", self.base_url));
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }
        request.send().await.unwrap()
    }
}

fn sample_market() -> StaticMarketData {
    StaticMarketData::default()
        .with_price("usd", 3.21)
        .with_price("eur", 2.95)
        .with_sample(DAY_START + 3_600_000, 3.0)
        .with_sample(DAY_START + 7_200_000, 3.05)
        .with_sample(DAY_START + 2 * DAY_MILLIS, 3.2)
        .with_sample(DAY_START + 3 * DAY_MILLIS, 3.4)
}

#[tokio::test]
async fn test_non_api_path_is_open() {
    let gateway = TestGateway::start().await;

    let response = gateway.get("/", None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "nothing here");

    let response = gateway.get("/somewhere/else", None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "nothing here");
}

#[tokio::test]
async fn test_api_without_header_is_parse_failure() {
    let gateway = TestGateway::start().await;

    let response = gateway.get("/api", None).await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "failed to parse token");
}

#[tokio::test]
async fn test_api_with_garbage_token_is_parse_failure() {
    let gateway = TestGateway::start().await;

    let response = gateway.get("/api", Some("Bearer garbage")).await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "failed to parse token");
}

#[tokio::test]
async fn test_unregistered_token_is_opaque_unauthorized() {
    let gateway = TestGateway::start().await;
    let key = TestKey::generate();
    let token = key.mint_token("peter.near", now_millis());

    let response = gateway.get("/api", Some(&bearer(&token))).await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "Unauthorized");
}

#[tokio::test]
async fn test_expired_token_is_opaque_unauthorized() {
    let gateway = TestGateway::start().await;
    let key = TestKey::generate();
    let token = key.mint_token("peter.near", now_millis() - 6 * 60 * 1000);
    gateway.registry.register(*token.hash(), "peter.near");

    let response = gateway.get("/api", Some(&bearer(&token))).await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "Unauthorized");
}

#[tokio::test]
async fn test_identity_mismatch_is_opaque_unauthorized() {
    let gateway = TestGateway::start().await;
    let key = TestKey::generate();
    let token = key.mint_token("peter.near", now_millis());
    gateway.registry.register(*token.hash(), "mallory.near");

    let response = gateway.get("/api", Some(&bearer(&token))).await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "Unauthorized");
}

#[tokio::test]
async fn test_valid_token_reaches_identity_echo() {
    let gateway = TestGateway::start().await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway.get("/api", Some(&header)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "You are authenticated as peter.near");

    let response = gateway.get("/api/some/other/path", Some(&header)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "You are authenticated as peter.near");
}

#[tokio::test]
async fn test_currency_list_returns_spot_prices() {
    let gateway = TestGateway::start().await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway.get("/api/prices/currencylist", Some(&header)).await;
    assert_eq!(response.status(), 200);

    let prices: BTreeMap<String, f64> = response.json().await.unwrap();
    assert_eq!(prices.get("usd"), Some(&3.21));
    assert_eq!(prices.get("eur"), Some(&2.95));
}

#[tokio::test]
async fn test_currency_list_requires_token() {
    let gateway = TestGateway::start().await;

    let response = gateway.get("/api/prices/currencylist", None).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_history_returns_day_keyed_prices() {
    let gateway = TestGateway::start().await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway
        .get(
            "/api/prices/history?basetoken=near&currency=usd&todate=2024-06-23",
            Some(&header),
        )
        .await;
    assert_eq!(response.status(), 200);

    let daily: BTreeMap<String, f64> = response.json().await.unwrap();
    assert_eq!(daily.len(), 3);
    // Two intraday samples on the 20th; the later one wins.
    assert_eq!(daily.get("2024-06-20"), Some(&3.05));
    assert_eq!(daily.get("2024-06-22"), Some(&3.2));
    // The last entry is the provider's last sample on or before todate.
    assert_eq!(daily.iter().next_back(), Some((&"2024-06-23".to_string(), &3.4)));
}

#[tokio::test]
async fn test_history_excludes_samples_after_todate() {
    let gateway = TestGateway::start().await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway
        .get(
            "/api/prices/history?basetoken=near&currency=usd&todate=2024-06-22",
            Some(&header),
        )
        .await;
    assert_eq!(response.status(), 200);

    let daily: BTreeMap<String, f64> = response.json().await.unwrap();
    assert!(daily.contains_key("2024-06-22"));
    assert!(!daily.contains_key("2024-06-23"));
}

#[tokio::test]
async fn test_history_rejects_missing_and_invalid_parameters() {
    let gateway = TestGateway::start().await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway.get("/api/prices/history", Some(&header)).await;
    assert_eq!(response.status(), 400);

    let response = gateway
        .get("/api/prices/history?basetoken=near&currency=usd", Some(&header))
        .await;
    assert_eq!(response.status(), 400);

    let response = gateway
        .get(
            "/api/prices/history?basetoken=near&currency=usd&todate=yesterday",
            Some(&header),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_market_failure_maps_to_bad_gateway() {
    let gateway = TestGateway::start_with_market(Arc::new(FailingMarketData)).await;
    let header = gateway.authorized_header("peter.near");

    let response = gateway.get("/api/prices/currencylist", Some(&header)).await;
    assert_eq!(response.status(), 502);
}

/// Registry stand-in whose lookups always fail.
#[derive(Clone)]
struct BrokenRegistry;

#[async_trait]
impl TokenRegistry for BrokenRegistry {
    async fn resolve(
        &self,
        _hash: &TokenHash,
    ) -> Result<Option<TokenBinding>, RegistryError> {
        Err(RegistryError::Connection("connection refused".into()))
    }
}

#[tokio::test]
async fn test_registry_failure_reports_upstream_message() {
    let authorizer = Authorizer::new(Arc::new(BrokenRegistry));
    let state = AppState::with_collaborators(authorizer, Arc::new(sample_market()));
    let gateway = TestGateway::serve(state, MemoryTokenRegistry::new()).await;

    let key = TestKey::generate();
    let token = key.mint_token("peter.near", now_millis());

    let response = gateway.get("/api", Some(&bearer(&token))).await;
    assert_eq!(response.status(), 401);
    assert_eq!(
        response.text().await.unwrap(),
        "failed to connect to registry: connection refused"
    );
}
