//! # Folio Core
//!
//! The domain layer of the Folio blog backend.
//! This crate contains the post and media model plus the ports the
//! infrastructure implements, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
