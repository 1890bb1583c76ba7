pub mod fizzbuzz;
pub mod greeting;
pub mod pointers;
pub mod promotions;

pub use crate::domain::model::{Card, CardInput, CardPage, CardPatch, PageRequest};
pub use crate::domain::ports::CardStore;
pub use crate::utils::error::Result;
