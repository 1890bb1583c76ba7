use crate::domain::model::{Card, CardInput, CardPage, CardPatch, PageRequest};
use crate::domain::ports::CardStore;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    next_id: i64,
    cards: BTreeMap<i64, Card>,
}

/// Cards kept in memory, ordered by id. Lost on restart.
#[derive(Debug)]
pub struct MemoryCardStore {
    inner: RwLock<Inner>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                cards: BTreeMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.cards.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn find(&self, id: i64) -> Result<&Card> {
        self.cards.get(&id).ok_or(AppError::CardNotFound { id })
    }

    /// 名稱唯一 (忽略大小寫與前後空白)，`exclude` 為正在更新的卡片
    fn ensure_unique_name(&self, input: &CardInput, exclude: Option<i64>) -> Result<()> {
        let key = input.name_key();
        let taken = self
            .cards
            .values()
            .any(|c| Some(c.id) != exclude && c.name_key() == key);
        if taken {
            return Err(AppError::validation(format!(
                "name: a card named '{}' already exists",
                input.name
            )));
        }
        Ok(())
    }

    fn overwrite(&mut self, id: i64, input: CardInput) -> Result<Card> {
        input.validate()?;
        let input = input.normalized();
        self.ensure_unique_name(&input, Some(id))?;

        let card = self
            .cards
            .get_mut(&id)
            .ok_or(AppError::CardNotFound { id })?;
        card.name = input.name;
        card.description = input.description;
        card.url = input.url;
        card.updated_at = Utc::now();
        Ok(card.clone())
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn create(&self, input: CardInput) -> Result<Card> {
        input.validate()?;
        let input = input.normalized();

        let mut inner = self.inner.write().await;
        inner.ensure_unique_name(&input, None)?;

        let id = inner.next_id;
        inner.next_id += 1;
        let now = Utc::now();
        let card = Card {
            id,
            name: input.name,
            description: input.description,
            url: input.url,
            created_at: now,
            updated_at: now,
        };
        inner.cards.insert(id, card.clone());
        tracing::debug!("Created card {} ({})", card.id, card.name);
        Ok(card)
    }

    async fn list(&self, page: Option<PageRequest>) -> Result<CardPage> {
        let inner = self.inner.read().await;
        let total = inner.cards.len();
        let items = match page {
            Some(page) => inner
                .cards
                .values()
                .skip(page.offset())
                .take(page.per_page)
                .cloned()
                .collect(),
            None => inner.cards.values().cloned().collect(),
        };
        Ok(CardPage { items, total })
    }

    async fn get(&self, id: i64) -> Result<Card> {
        let inner = self.inner.read().await;
        inner.find(id).cloned()
    }

    async fn replace(&self, id: i64, input: CardInput) -> Result<Card> {
        let mut inner = self.inner.write().await;
        inner.find(id)?;
        inner.overwrite(id, input)
    }

    async fn patch(&self, id: i64, patch: CardPatch) -> Result<Card> {
        let mut inner = self.inner.write().await;
        let merged = patch.apply_to(inner.find(id)?);
        inner.overwrite(id, merged)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.cards.remove(&id) {
            Some(card) => {
                tracing::debug!("Deleted card {} ({})", card.id, card.name);
                Ok(())
            }
            None => Err(AppError::CardNotFound { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_ids_increase_and_are_not_reused() {
        let store = MemoryCardStore::new();
        let first = assert_ok!(store.create(CardInput::new("one")).await);
        let second = assert_ok!(store.create(CardInput::new("two")).await);
        assert_eq!((first.id, second.id), (1, 2));

        assert_ok!(store.delete(2).await);
        let third = assert_ok!(store.create(CardInput::new("three")).await);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_create_trims_and_stamps() {
        let store = MemoryCardStore::new();
        let card = assert_ok!(
            store
                .create(CardInput::new("  Joker ").with_url(""))
                .await
        );
        assert_eq!(card.name, "Joker");
        assert_eq!(card.url, None);
        assert_eq!(card.created_at, card.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_stored() {
        let store = MemoryCardStore::new();
        let err = assert_err!(store.create(CardInput::new("")).await);
        assert!(matches!(err, AppError::ValidationError { .. }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_names_rejected() {
        let store = MemoryCardStore::new();
        assert_ok!(store.create(CardInput::new("King")).await);
        let err = assert_err!(store.create(CardInput::new(" KING ")).await);
        assert!(err.to_string().contains("already exists"));

        // 更新自己的名稱不算重複
        assert_ok!(store.replace(1, CardInput::new("king")).await);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MemoryCardStore::new();
        assert!(matches!(store.get(9).await, Err(AppError::CardNotFound { id: 9 })));
        assert!(matches!(
            store.replace(9, CardInput::new("x")).await,
            Err(AppError::CardNotFound { id: 9 })
        ));
        assert!(matches!(
            store.patch(9, CardPatch::default()).await,
            Err(AppError::CardNotFound { id: 9 })
        ));
        assert!(matches!(store.delete(9).await, Err(AppError::CardNotFound { id: 9 })));
    }

    #[tokio::test]
    async fn test_patch_keeps_created_at() {
        let store = MemoryCardStore::new();
        let created = assert_ok!(
            store
                .create(CardInput::new("Ace").with_url("https://example.com"))
                .await
        );
        let patch = CardPatch {
            description: Some("high card".to_string()),
            ..CardPatch::default()
        };
        let patched = assert_ok!(store.patch(created.id, patch).await);
        assert_eq!(patched.created_at, created.created_at);
        assert!(patched.updated_at >= created.updated_at);
        assert_eq!(patched.description, "high card");
        assert_eq!(patched.url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_list_pages() {
        let store = MemoryCardStore::new();
        for i in 1..=5 {
            assert_ok!(store.create(CardInput::new(format!("card {}", i))).await);
        }

        let all = assert_ok!(store.list(None).await);
        assert_eq!(all.total, 5);
        assert_eq!(all.items.len(), 5);

        let page = assert_ok!(store.list(Some(PageRequest { page: 2, per_page: 2 })).await);
        let ids: Vec<i64> = page.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.total, 5);

        let past_end = assert_ok!(store.list(Some(PageRequest { page: 9, per_page: 2 })).await);
        assert!(past_end.items.is_empty());
    }
}
