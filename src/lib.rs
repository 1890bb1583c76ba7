pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http_api::{cards_router, serve, CardsState};
pub use adapters::memory_store::MemoryCardStore;
pub use adapters::pokeapi::PokeApiClient;
pub use config::AppConfig;
pub use crate::core::fizzbuzz::FizzBuzzWorker;
pub use crate::core::promotions::Promotion;
pub use utils::error::{AppError, Result};
