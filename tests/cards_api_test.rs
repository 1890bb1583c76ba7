use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sixty_days::adapters::http_api::{seed_cards, serve_with_shutdown, TOTAL_COUNT_HEADER};
use sixty_days::config::toml_config::CardsConfig;
use sixty_days::domain::model::CardInput;
use sixty_days::domain::ports::CardStore;
use sixty_days::{CardsState, MemoryCardStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestServer {
    base: String,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(seed: &[CardInput]) -> Result<Self> {
        let store: Arc<dyn CardStore> = Arc::new(MemoryCardStore::new());
        seed_cards(store.as_ref(), seed).await?;

        let cards = CardsConfig {
            default_per_page: 2,
            max_per_page: 10,
            seed: Vec::new(),
        };
        let state = CardsState::new(store, &cards);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base = format!("http://{}", listener.local_addr()?);
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve_with_shutdown(listener, state, shutdown)
                .await
                .expect("server failed");
        });

        Ok(Self {
            base,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

#[tokio::test]
async fn test_card_lifecycle() -> Result<()> {
    let server = TestServer::start(&[]).await?;

    // POST
    let response = server
        .client
        .post(server.url("/cards"))
        .json(&json!({"name": "Ace of spades", "description": "the one", "url": "https://example.com/ace"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Ace of spades");

    // GET one
    let response = server.client.get(server.url("/cards/1")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("application/json"));

    // PUT replaces every field
    let response = server
        .client
        .put(server.url("/cards/1"))
        .json(&json!({"name": "Ace of hearts"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let replaced: Value = response.json().await?;
    assert_eq!(replaced["name"], "Ace of hearts");
    assert_eq!(replaced["description"], "");
    assert_eq!(replaced["url"], Value::Null);
    assert_eq!(replaced["created_at"], created["created_at"]);

    // PATCH touches only what is sent
    let response = server
        .client
        .patch(server.url("/cards/1"))
        .json(&json!({"description": "red"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let patched: Value = response.json().await?;
    assert_eq!(patched["name"], "Ace of hearts");
    assert_eq!(patched["description"], "red");

    // DELETE
    let response = server.client.delete(server.url("/cards/1")).send().await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await?.is_empty());

    let response = server.client.get(server.url("/cards/1")).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await?;
    assert_eq!(body["errors"], "card 1 not found");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_error_statuses() -> Result<()> {
    let server = TestServer::start(&[CardInput::new("King")]).await?;

    // 無法解析的 JSON -> 422
    let response = server
        .client
        .post(server.url("/cards"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await?;
    assert!(body["errors"].is_string());

    // 驗證失敗 -> 400
    let response = server
        .client
        .post(server.url("/cards"))
        .json(&json!({"description": "nameless", "url": "not a url"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    let errors = body["errors"].as_str().unwrap_or_default();
    assert!(errors.contains("name:"));
    assert!(errors.contains("url:"));

    // 名稱重複 -> 400
    let response = server
        .client
        .post(server.url("/cards"))
        .json(&json!({"name": "king"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // 非數字 id -> 400
    let response = server.client.get(server.url("/cards/abc")).send().await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // 不存在的 id
    for method in [reqwest::Method::PUT, reqwest::Method::PATCH] {
        let response = server
            .client
            .request(method, server.url("/cards/99"))
            .json(&json!({"name": "Queen"}))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
    let response = server.client.delete(server.url("/cards/99")).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.client.get(server.url("/nowhere")).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_list_and_paginate() -> Result<()> {
    let seed: Vec<CardInput> = (1..=5).map(|i| CardInput::new(format!("card {}", i))).collect();
    let server = TestServer::start(&seed).await?;

    let response = server.client.get(server.url("/cards")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[TOTAL_COUNT_HEADER], "5");
    let all: Vec<Value> = response.json().await?;
    assert_eq!(all.len(), 5);

    // per_page 預設為 2
    let response = server.client.get(server.url("/cards?page=3")).send().await?;
    assert_eq!(response.headers()[TOTAL_COUNT_HEADER], "5");
    let last: Vec<Value> = response.json().await?;
    assert_eq!(last.len(), 1);
    assert_eq!(last[0]["id"], 5);

    let response = server
        .client
        .get(server.url("/cards?page=1&per_page=4"))
        .send()
        .await?;
    let first: Vec<Value> = response.json().await?;
    let ids: Vec<i64> = first.iter().filter_map(|c| c["id"].as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    for query in ["page=0", "per_page=11", "page=abc"] {
        let response = server
            .client
            .get(server.url(&format!("/cards?{}", query)))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {}", query);
    }

    server.stop().await;
    Ok(())
}
