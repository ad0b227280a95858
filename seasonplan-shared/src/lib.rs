//! # Seasonplan Shared Library
//!
//! This crate contains the shared types and business logic used across the
//! seasonplan API server and the chat-bot front-end.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, tasks) and their CRUD operations
//! - `auth`: Password hashing and the in-process session store
//! - `db`: Connection pool and migration runner
//! - `planner`: The use-case service composing gate + stores
//! - `export`: Plain-text report rendering
//! - `error`: The shared failure taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod planner;

/// Current version of the seasonplan shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
