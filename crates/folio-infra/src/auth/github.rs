//! GitHub OAuth identity provider.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

use folio_core::ports::{AuthError, IdentityProvider};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const EMAILS_URL: &str = "https://api.github.com/user/emails";
const SCOPE: &str = "user:email";
const CLIENT_AGENT: &str = "folio-blog";

/// OAuth application credentials.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailEntry {
    email: String,
    primary: bool,
    verified: bool,
}

pub struct GitHubOAuth {
    config: GitHubConfig,
    http: reqwest::Client,
}

impl GitHubOAuth {
    pub fn new(config: GitHubConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_AGENT)
            .json(&serde_json::json!({
                "client_id": self.config.client_id,
                "client_secret": self.config.client_secret,
                "code": code,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        match (response.access_token, response.error) {
            (Some(token), None) => Ok(token),
            (_, Some(error)) => Err(AuthError::Provider(
                response.error_description.unwrap_or(error),
            )),
            (None, None) => Err(AuthError::Provider("no access token returned".to_string())),
        }
    }

    async fn primary_email(&self, access_token: &str) -> Result<String, AuthError> {
        let emails: Vec<EmailEntry> = self
            .http
            .get(EMAILS_URL)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::Upstream(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        select_primary(emails)
            .ok_or_else(|| AuthError::Provider("no verified primary email".to_string()))
    }
}

fn select_primary(emails: Vec<EmailEntry>) -> Option<String> {
    emails
        .into_iter()
        .find(|entry| entry.primary && entry.verified)
        .map(|entry| entry.email)
}

#[async_trait]
impl IdentityProvider for GitHubOAuth {
    fn authorize_url(&self, redirect_uri: &str) -> Result<String, AuthError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", SCOPE),
            ],
        )
        .map(String::from)
        .map_err(|e| AuthError::Provider(e.to_string()))
    }

    async fn resolve_email(&self, code: &str) -> Result<String, AuthError> {
        let token = self.exchange_code(code).await?;
        self.primary_email(&token).await
    }
}
