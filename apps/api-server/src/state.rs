//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use folio_core::ports::{Authenticator, IdentityProvider, MediaStore, PostRepository};
use folio_infra::{
    AccessAuthenticator, GitHubOAuth, InMemoryMediaStore, InMemoryPostRepository,
    SessionAuthenticator,
};

use crate::config::{AppConfig, AuthConfig};

#[cfg(feature = "postgres")]
use folio_infra::{DatabaseConnections, SqlPostRepository};

#[cfg(feature = "s3")]
use folio_infra::{S3Config, S3MediaStore};

/// OAuth login flow, present only in session mode.
pub struct LoginFlow {
    pub provider: Arc<dyn IdentityProvider>,
    pub sessions: Arc<SessionAuthenticator>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaStore>,
    pub auth: Arc<dyn Authenticator>,
    pub login: Option<Arc<LoginFlow>>,
}

impl AppState {
    /// Assemble state from already-built components.
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        media: Arc<dyn MediaStore>,
        auth: Arc<dyn Authenticator>,
        login: Option<Arc<LoginFlow>>,
    ) -> Self {
        Self {
            posts,
            media,
            auth,
            login,
        }
    }

    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached fails startup.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let posts = Self::post_repository(config).await?;
        let media = Self::media_store(config).await;
        let (auth, login) = Self::authentication(&config.auth);

        tracing::info!(
            posts = posts.backend(),
            media = media.backend(),
            auth = auth.strategy(),
            "Application state initialized"
        );

        Ok(Self::from_parts(posts, media, auth, login))
    }

    fn authentication(config: &AuthConfig) -> (Arc<dyn Authenticator>, Option<Arc<LoginFlow>>) {
        let http = reqwest::Client::new();

        match config {
            AuthConfig::Session {
                secret,
                admin_email,
                github,
            } => {
                let sessions = Arc::new(SessionAuthenticator::new(secret, admin_email.clone()));
                let login = LoginFlow {
                    provider: Arc::new(GitHubOAuth::new(github.clone(), http)),
                    sessions: sessions.clone(),
                };
                let auth: Arc<dyn Authenticator> = sessions;
                (auth, Some(Arc::new(login)))
            }
            AuthConfig::Access(access) => (
                Arc::new(AccessAuthenticator::with_http(access.clone(), http)),
                None,
            ),
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Arc::new(InMemoryPostRepository::new()));
        };

        let connections = DatabaseConnections::init(db_config)
            .await
            .context("failed to connect to database")?;
        Ok(Arc::new(SqlPostRepository::new(connections.main)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        if config.database.is_some() {
            anyhow::bail!("DATABASE_URL is set but this build has no postgres support");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Arc::new(InMemoryPostRepository::new()))
    }

    #[cfg(feature = "s3")]
    async fn media_store(config: &AppConfig) -> Arc<dyn MediaStore> {
        let Some(media) = config.media.as_ref() else {
            tracing::warn!("MEDIA_BUCKET not set. Uploads are kept in memory.");
            return Arc::new(InMemoryMediaStore::new());
        };

        let s3 = S3Config {
            bucket: media.bucket.clone(),
            endpoint: media.endpoint.clone(),
            region: media.region.clone(),
            access_key_id: media.access_key_id.clone(),
            secret_access_key: media.secret_access_key.clone(),
        };
        Arc::new(S3MediaStore::connect(&s3).await)
    }

    #[cfg(not(feature = "s3"))]
    async fn media_store(config: &AppConfig) -> Arc<dyn MediaStore> {
        if config.media.is_some() {
            tracing::warn!("MEDIA_BUCKET ignored: built without s3 feature");
        }
        Arc::new(InMemoryMediaStore::new())
    }
}
