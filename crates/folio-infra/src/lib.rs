//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//! This crate contains the database, object storage, and identity integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory stores only
//! - `postgres` - PostgreSQL post repository via SeaORM
//! - `s3` - S3-compatible (R2) media store

pub mod auth;
pub mod database;
pub mod memory;

#[cfg(feature = "s3")]
pub mod storage;

// Re-exports - In-Memory
pub use memory::{InMemoryMediaStore, InMemoryPostRepository};

// Re-exports - Auth
pub use auth::{AccessAuthenticator, AccessConfig, GitHubConfig, GitHubOAuth, SessionAuthenticator};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, SqlPostRepository};

#[cfg(feature = "s3")]
pub use storage::{S3Config, S3MediaStore};
