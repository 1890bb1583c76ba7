use crate::domain::model::{Card, CardInput, CardPage, CardPatch, PageRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn create(&self, input: CardInput) -> Result<Card>;
    async fn list(&self, page: Option<PageRequest>) -> Result<CardPage>;
    async fn get(&self, id: i64) -> Result<Card>;
    async fn replace(&self, id: i64, input: CardInput) -> Result<Card>;
    async fn patch(&self, id: i64, patch: CardPatch) -> Result<Card>;
    async fn delete(&self, id: i64) -> Result<()>;
}
