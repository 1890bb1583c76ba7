use crate::adapters::pokeapi::DEFAULT_BASE_URL;
use crate::domain::model::CardInput;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cards: CardsConfig,
    pub pokeapi: PokeApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    pub default_per_page: usize,
    pub max_per_page: usize,
    pub seed: Vec<CardInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PokeApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: 100,
            seed: Vec::new(),
        }
    }
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CARDS_BIND})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| AppError::config(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用命令列覆蓋設定；驗證應在合併之後進行
    pub fn with_overrides(mut self, bind: Option<String>, base_url: Option<String>) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(base_url) = base_url {
            self.pokeapi.base_url = base_url;
        }
        self
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| AppError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: format!("Invalid socket address: {}", e),
            })
    }

    pub fn pokeapi_timeout(&self) -> Duration {
        Duration::from_secs(self.pokeapi.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        validate_positive_number("cards.default_per_page", self.cards.default_per_page, 1)?;
        validate_positive_number("cards.max_per_page", self.cards.max_per_page, 1)?;
        if self.cards.default_per_page > self.cards.max_per_page {
            return Err(AppError::InvalidConfigValueError {
                field: "cards.default_per_page".to_string(),
                value: self.cards.default_per_page.to_string(),
                reason: format!(
                    "Value must not exceed cards.max_per_page ({})",
                    self.cards.max_per_page
                ),
            });
        }
        for (index, seed) in self.cards.seed.iter().enumerate() {
            seed.validate().map_err(|e| AppError::ConfigValidationError {
                field: format!("cards.seed[{}]", index),
                message: e.to_string(),
            })?;
        }

        validate_url("pokeapi.base_url", &self.pokeapi.base_url)?;
        validate_positive_number(
            "pokeapi.timeout_seconds",
            self.pokeapi.timeout_seconds as usize,
            1,
        )?;

        validate_non_empty_string("logging.level", &self.logging.level)?;
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}
