//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod repository;

pub use auth::{AuthError, Authenticator, Credentials, IdentityProvider, Logout};
pub use media::MediaStore;
pub use repository::PostRepository;
