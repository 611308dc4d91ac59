//! Core types and rules for cdm-admin
//!
//! Listing query state, its address-bar encoding, the page-reset rule,
//! sort cycling, and pagination arithmetic. Everything here is pure and
//! shared by the storage, service and HTTP crates.

mod address_bar;
mod codec;
mod constants;
mod controller;
mod env_config;
mod error;
mod fetch;
mod pagination;
mod profile;
mod query_state;
mod report;
mod reset;
mod search;
mod sort;

pub use address_bar::*;
pub use codec::*;
pub use constants::*;
pub use controller::*;
pub use env_config::*;
pub use error::*;
pub use fetch::*;
pub use pagination::*;
pub use profile::*;
pub use query_state::*;
pub use report::*;
pub use reset::*;
pub use search::*;
pub use sort::*;
