use crate::domain::pokemon::Pokemon;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        validate_url("pokeapi.base_url", base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sixty-days/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/pokemon/{name}`; the name is one escaped path segment
    pub fn pokemon_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| AppError::InvalidConfigValueError {
            field: "pokeapi.base_url".to_string(),
            value: self.base_url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        url.path_segments_mut()
            .map_err(|_| AppError::config("pokeapi.base_url cannot carry a path"))?
            .pop_if_empty()
            .push("pokemon")
            .push(name);
        Ok(url)
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        validate_non_empty_string("name", name).map_err(|_| {
            AppError::validation("name: pokemon name cannot be empty")
        })?;
        let name = name.trim().to_lowercase();
        // PokéAPI 的名稱只有小寫字母、數字與連字號
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::validation(format!(
                "name: '{}' may only contain letters, digits and '-'",
                name
            )));
        }
        let url = self.pokemon_url(&name)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::PokemonNotFound { name });
        }

        let pokemon = response.error_for_status()?.json::<Pokemon>().await?;
        tracing::info!("🎯 Fetched {} (#{})", pokemon.name, pokemon.id);
        Ok(pokemon)
    }
}
