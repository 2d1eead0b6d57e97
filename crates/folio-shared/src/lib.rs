//! # Folio Shared
//!
//! Request and response bodies exchanged with the blog front-end.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
