//! Authentication ports.

use async_trait::async_trait;

/// Raw credential material lifted off a request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Value of the cookie named by [`Authenticator::cookie_name`].
    pub cookie: Option<String>,
    /// Identity asserted by a trusted upstream proxy header.
    pub verified_email: Option<String>,
}

/// Where to send a client after its credential cookie is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logout {
    pub redirect_to: String,
}

/// Decides whether a request belongs to the site owner.
///
/// One implementation is chosen at startup; handlers never branch on
/// the strategy.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Cookie carrying this strategy's credential.
    fn cookie_name(&self) -> &'static str;

    /// Verify credentials. Every failure collapses to `false`.
    async fn verify(&self, credentials: &Credentials) -> bool;

    /// Logout destination for this strategy.
    fn logout(&self) -> Logout;

    /// Strategy name for logs and health output.
    fn strategy(&self) -> &'static str;
}

/// External OAuth identity provider used for the session login flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is redirected to in order to start the login.
    fn authorize_url(&self, redirect_uri: &str) -> Result<String, AuthError>;

    /// Exchange an authorization code for the user's verified primary email.
    async fn resolve_email(&self, code: &str) -> Result<String, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Identity is not authorized: {0}")]
    NotAuthorized(String),

    #[error("Identity provider rejected the request: {0}")]
    Provider(String),

    #[error("Identity provider unreachable: {0}")]
    Upstream(String),

    #[error("Signing error: {0}")]
    Signing(String),
}
