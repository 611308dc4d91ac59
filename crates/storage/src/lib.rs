//! Storage layer for cdm-admin
//!
//! Async store traits for user profiles and the salesman listing, plus an
//! in-memory backend that can be seeded from a JSON file.

mod error;
mod memory;
pub mod traits;
mod types;

pub use error::StorageError;
pub use memory::{MemoryStorage, SALESMAN_SORT_KEYS};
pub use types::PaginatedResult;
