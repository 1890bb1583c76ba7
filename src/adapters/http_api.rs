//! JSON REST surface for cards.
//!
//! | Method | Path          | Success            |
//! |--------|---------------|--------------------|
//! | GET    | `/cards`      | 200 + array        |
//! | POST   | `/cards`      | 201 + card         |
//! | GET    | `/cards/{id}` | 200 + card         |
//! | PUT    | `/cards/{id}` | 200 + card         |
//! | PATCH  | `/cards/{id}` | 200 + card         |
//! | DELETE | `/cards/{id}` | 204                |
//!
//! Failures always answer `{"errors": "<message>"}`.

use crate::adapters::memory_store::MemoryCardStore;
use crate::config::toml_config::{AppConfig, CardsConfig};
use crate::domain::model::{Card, CardInput, CardPatch, PageRequest};
use crate::domain::ports::CardStore;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_positive_number, validate_range};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Clone)]
pub struct CardsState {
    pub store: Arc<dyn CardStore>,
    pub default_per_page: usize,
    pub max_per_page: usize,
}

impl CardsState {
    pub fn new(store: Arc<dyn CardStore>, cards: &CardsConfig) -> Self {
        Self {
            store,
            default_per_page: cards.default_per_page,
            max_per_page: cards.max_per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListParams {
    fn page_request(&self, state: &CardsState) -> Result<Option<PageRequest>> {
        if self.page.is_none() && self.per_page.is_none() {
            return Ok(None);
        }
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(state.default_per_page);
        validate_positive_number("page", page, 1)?;
        validate_range("per_page", per_page, 1, state.max_per_page)?;
        Ok(Some(PageRequest { page, per_page }))
    }
}

pub fn cards_router(state: CardsState) -> Router {
    Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route(
            "/cards/{id}",
            get(get_card)
                .put(replace_card)
                .patch(patch_card)
                .delete(delete_card),
        )
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "errors": "route not found" })),
            )
        })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_cards(
    State(state): State<CardsState>,
    query: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let page = params
        .page_request(&state)
        .map_err(|e| AppError::validation(e.to_string()))?;
    let listing = state.store.list(page).await?;

    Ok((
        [(HeaderName::from_static(TOTAL_COUNT_HEADER), listing.total.to_string())],
        Json(listing.items),
    )
        .into_response())
}

async fn create_card(
    State(state): State<CardsState>,
    payload: std::result::Result<Json<CardInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>)> {
    let Json(input) = payload.map_err(decode_error)?;
    let card = state.store.create(input).await?;
    tracing::info!("🃏 Card {} created", card.id);
    Ok((StatusCode::CREATED, Json(card)))
}

async fn get_card(
    State(state): State<CardsState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Card>> {
    let id = card_id(id)?;
    Ok(Json(state.store.get(id).await?))
}

async fn replace_card(
    State(state): State<CardsState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<CardInput>, JsonRejection>,
) -> Result<Json<Card>> {
    let id = card_id(id)?;
    let Json(input) = payload.map_err(decode_error)?;
    Ok(Json(state.store.replace(id, input).await?))
}

async fn patch_card(
    State(state): State<CardsState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<CardPatch>, JsonRejection>,
) -> Result<Json<Card>> {
    let id = card_id(id)?;
    let Json(patch) = payload.map_err(decode_error)?;
    Ok(Json(state.store.patch(id, patch).await?))
}

async fn delete_card(
    State(state): State<CardsState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = card_id(id)?;
    state.store.delete(id).await?;
    tracing::info!("🗑️ Card {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

fn card_id(id: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    id.map(|Path(id)| id)
        .map_err(|e| AppError::validation(format!("id: {}", e.body_text())))
}

fn decode_error(rejection: JsonRejection) -> AppError {
    AppError::DecodeError {
        message: rejection.body_text(),
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => StatusCode::BAD_REQUEST,
            AppError::DecodeError { .. } | AppError::SerializationError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::CardNotFound { .. } | AppError::PokemonNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
            "internal server error".to_string()
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
            self.to_string()
        };

        (status, Json(serde_json::json!({ "errors": message }))).into_response()
    }
}

/// 啟動時建立設定檔中的範例卡片
pub async fn seed_cards(store: &dyn CardStore, seed: &[CardInput]) -> Result<()> {
    for input in seed {
        let card = store.create(input.clone()).await?;
        tracing::debug!("Seeded card {} ({})", card.id, card.name);
    }
    if !seed.is_empty() {
        tracing::info!("🌱 Seeded {} cards", seed.len());
    }
    Ok(())
}

pub async fn serve_with_shutdown<F>(listener: TcpListener, state: CardsState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("🚀 Cards service listening on http://{}", listener.local_addr()?);
    axum::serve(listener, cards_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("👋 Cards service stopped");
    Ok(())
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let store: Arc<dyn CardStore> = Arc::new(MemoryCardStore::new());
    seed_cards(store.as_ref(), &config.cards.seed).await?;

    let listener = TcpListener::bind(addr).await?;
    let state = CardsState::new(store, &config.cards);
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        // 無法監聽訊號時持續運行
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
