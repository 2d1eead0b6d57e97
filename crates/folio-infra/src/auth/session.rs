//! Self-issued session tokens signed with HMAC-SHA256.
//!
//! Token layout: `base64url(json) "." base64url(hmac_sha256(secret, json))`
//! where `json` is `{"email": ..., "expiry": <unix millis>}`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use folio_core::ports::{AuthError, Authenticator, Credentials, Logout};

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime in days.
pub const SESSION_LIFETIME_DAYS: i64 = 7;

/// Signed assertion carried inside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    /// Expiry as unix milliseconds.
    pub expiry: i64,
}

/// Cookie-mode authenticator: issues and verifies session tokens for the
/// single authorized identity.
pub struct SessionAuthenticator {
    secret: Vec<u8>,
    authorized_email: String,
    lifetime: TimeDelta,
}

impl SessionAuthenticator {
    pub fn new(secret: impl AsRef<[u8]>, authorized_email: impl Into<String>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            authorized_email: authorized_email.into(),
            lifetime: TimeDelta::days(SESSION_LIFETIME_DAYS),
        }
    }

    pub fn lifetime(&self) -> TimeDelta {
        self.lifetime
    }

    /// Whether `email` is the identity allowed to hold a session.
    pub fn is_authorized(&self, email: &str) -> bool {
        email == self.authorized_email
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Issue a token for `email` valid for the session lifetime from `now`.
    pub fn issue(&self, email: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = SessionClaims {
            email: email.to_string(),
            expiry: (now + self.lifetime).timestamp_millis(),
        };
        let json =
            serde_json::to_string(&claims).map_err(|e| AuthError::Signing(e.to_string()))?;

        let mut mac = self.mac()?;
        mac.update(json.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(json.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token at `now` and return its claims.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let (data_b64, sig_b64) = token
            .split_once('.')
            .ok_or_else(|| AuthError::InvalidToken("missing signature".to_string()))?;

        let json = URL_SAFE_NO_PAD
            .decode(data_b64)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let signature = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        // Constant-time comparison.
        let mut mac = self.mac()?;
        mac.update(&json);
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken("signature mismatch".to_string()))?;

        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if now.timestamp_millis() > claims.expiry {
            return Err(AuthError::TokenExpired);
        }

        if !self.is_authorized(&claims.email) {
            return Err(AuthError::NotAuthorized(claims.email));
        }

        Ok(claims)
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    fn cookie_name(&self) -> &'static str {
        SESSION_COOKIE
    }

    async fn verify(&self, credentials: &Credentials) -> bool {
        let Some(token) = credentials.cookie.as_deref() else {
            return false;
        };

        match self.validate(token, Utc::now()) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Session rejected");
                false
            }
        }
    }

    fn logout(&self) -> Logout {
        Logout {
            redirect_to: "/".to_string(),
        }
    }

    fn strategy(&self) -> &'static str {
        "session"
    }
}
