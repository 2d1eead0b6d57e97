//! Authentication implementations.

mod access;
mod github;
mod session;

pub use access::{
    ACCESS_COOKIE, ACCESS_EMAIL_HEADER, AccessAuthenticator, AccessClaims, AccessConfig,
    HttpKeySource, KeySource,
};
pub use github::{GitHubConfig, GitHubOAuth};
pub use session::{SESSION_COOKIE, SESSION_LIFETIME_DAYS, SessionAuthenticator, SessionClaims};
