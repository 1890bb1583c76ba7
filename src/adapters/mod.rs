// Adapters layer: concrete implementations for external systems (files, http, storage).

pub mod cart_csv;
pub mod http_api;
pub mod memory_store;
pub mod pokeapi;
