//! Identity-proxy authentication (Cloudflare Access style).
//!
//! The proxy either forwards a verified email header, or leaves an RS256
//! JWT in the `CF_Authorization` cookie that is checked against the team's
//! published key set.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use folio_core::ports::{AuthError, Authenticator, Credentials, Logout};

/// Cookie the proxy stores its JWT in.
pub const ACCESS_COOKIE: &str = "CF_Authorization";

/// Header the proxy sets after authenticating a user.
pub const ACCESS_EMAIL_HEADER: &str = "Cf-Access-Authenticated-User-Email";

/// Proxy configuration.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// e.g. `myteam.cloudflareaccess.com`
    pub team_domain: String,
    /// Application audience tag expected in `aud`.
    pub audience: String,
}

impl AccessConfig {
    pub fn certs_url(&self) -> String {
        format!("https://{}/cdn-cgi/access/certs", self.team_domain)
    }

    pub fn logout_url(&self) -> String {
        format!("https://{}/cdn-cgi/access/logout", self.team_domain)
    }
}

/// Source of the issuer's current public keys.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches the key set over HTTPS on every call; keys rotate upstream.
pub struct HttpKeySource {
    http: reqwest::Client,
    url: String,
}

impl HttpKeySource {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        self.http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::Upstream(e.to_string()))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenHeader {
    kid: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, aud: &str) -> bool {
        match self {
            Audience::One(value) => value == aud,
            Audience::Many(values) => values.iter().any(|v| v == aud),
        }
    }
}

/// Claims read from the proxy token.
#[derive(Debug, Deserialize)]
pub struct AccessClaims {
    pub email: Option<String>,
    pub exp: Option<i64>,
    aud: Option<Audience>,
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// Proxy-mode authenticator.
pub struct AccessAuthenticator {
    config: AccessConfig,
    keys: Box<dyn KeySource>,
}

impl AccessAuthenticator {
    pub fn new(config: AccessConfig, keys: Box<dyn KeySource>) -> Self {
        Self { config, keys }
    }

    /// Authenticator fetching keys from the team's certs endpoint.
    pub fn with_http(config: AccessConfig, http: reqwest::Client) -> Self {
        let keys = HttpKeySource::new(http, config.certs_url());
        Self::new(config, Box::new(keys))
    }

    /// Validate a proxy JWT at `now`.
    ///
    /// Cheap claim checks run before the key set is fetched.
    pub async fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, AuthError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidToken("expected three segments".to_string()));
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(AuthError::InvalidToken("empty segment".to_string()));
        }

        let claims: AccessClaims = decode_segment(payload_b64)?;

        match claims.exp {
            Some(exp) if exp >= now.timestamp() => {}
            Some(_) => return Err(AuthError::TokenExpired),
            None => return Err(AuthError::InvalidToken("missing exp".to_string())),
        }

        if !claims
            .aud
            .as_ref()
            .is_some_and(|aud| aud.contains(&self.config.audience))
        {
            return Err(AuthError::InvalidToken("audience mismatch".to_string()));
        }

        let keys = self.keys.fetch().await?;
        let header: TokenHeader = decode_segment(header_b64)?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("missing kid".to_string()))?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown kid {kid}")))?;
        let key =
            DecodingKey::from_jwk(jwk).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let message = format!("{header_b64}.{payload_b64}");
        let valid =
            jsonwebtoken::crypto::verify(signature_b64, message.as_bytes(), &key, Algorithm::RS256)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidToken("signature mismatch".to_string()));
        }

        Ok(claims)
    }
}

#[async_trait]
impl Authenticator for AccessAuthenticator {
    fn cookie_name(&self) -> &'static str {
        ACCESS_COOKIE
    }

    async fn verify(&self, credentials: &Credentials) -> bool {
        if credentials
            .verified_email
            .as_deref()
            .is_some_and(|email| !email.is_empty())
        {
            return true;
        }

        let Some(token) = credentials.cookie.as_deref() else {
            return false;
        };

        match self.validate(token, Utc::now()).await {
            Ok(claims) => claims.email.is_some_and(|email| !email.is_empty()),
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                false
            }
        }
    }

    fn logout(&self) -> Logout {
        Logout {
            redirect_to: self.config.logout_url(),
        }
    }

    fn strategy(&self) -> &'static str {
        "access"
    }
}
