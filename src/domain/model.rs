use crate::utils::error::Result;
use crate::utils::validation::{
    validate_max_chars, validate_non_empty_string, validate_url, FieldErrors, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_NAME_CHARS: usize = 80;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /cards` and `PUT /cards/{id}`.
///
/// Missing fields fall back to their defaults so that an absent `name` is
/// reported by validation instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardInput {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
}

/// Body of `PATCH /cards/{id}`. An empty `url` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl CardInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// 去除前後空白；空字串的 url 視為沒有
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            url: self
                .url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        }
    }

    /// Key used for the unique-name rule.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

impl Validate for CardInput {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();

        errors.check(validate_non_empty_string("name", &self.name));
        errors.check(validate_max_chars("name", self.name.trim(), MAX_NAME_CHARS));
        errors.check(validate_max_chars(
            "description",
            self.description.trim(),
            MAX_DESCRIPTION_CHARS,
        ));
        if let Some(url) = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            errors.check(validate_url("url", url));
        }

        errors.into_result()
    }
}

impl CardPatch {
    /// 把 patch 套到現有卡片上，產生完整的輸入以便重新驗證
    pub fn apply_to(self, card: &Card) -> CardInput {
        CardInput {
            name: self.name.unwrap_or_else(|| card.name.clone()),
            description: self.description.unwrap_or_else(|| card.description.clone()),
            url: match self.url {
                Some(url) => Some(url),
                None => card.url.clone(),
            },
        }
    }
}

impl Card {
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPage {
    pub items: Vec<Card>,
    pub total: usize,
}
