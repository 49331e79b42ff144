//! metabolab-common — Shared error types used across all Metabolab crates.

pub mod error;

pub use error::{MetabolabError, Result};
