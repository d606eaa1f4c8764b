//! Shared domain types, error taxonomy, configuration and collaborator
//! traits for the hybrid procurement-matching engine.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
