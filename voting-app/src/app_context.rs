use crate::application::{AccountService, PollBackend, PollService};
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{create_connection, run_migrations, PostgresBackend};
use crate::infrastructure::memory::InMemoryBackend;
use crate::infrastructure::security::RateLimiter;
use std::sync::Arc;
use voting_errors::AppError;

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Settings read from the environment (`.env` is loaded first by the binary).
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub oauth: Option<OAuthConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let oauth = match (
            non_empty("GOOGLE_CLIENT_ID"),
            non_empty("GOOGLE_CLIENT_SECRET"),
            non_empty("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(OAuthConfig {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => None,
        };

        Self {
            database_url: non_empty("DATABASE_URL"),
            run_migrations: non_empty("RUN_MIGRATIONS")
                .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
            oauth,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub polls: Arc<PollService>,
    pub accounts: Arc<AccountService>,
    pub oauth: Option<Arc<GoogleOAuth>>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(backend: Arc<dyn PollBackend>, oauth: Option<GoogleOAuth>) -> Self {
        Self {
            polls: Arc::new(PollService::new(backend.clone())),
            accounts: Arc::new(AccountService::new(backend)),
            oauth: oauth.map(Arc::new),
            rate_limiter: RateLimiter::new(),
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let backend: Arc<dyn PollBackend> = match &config.database_url {
            Some(url) => {
                let db = create_connection(url)
                    .await
                    .map_err(|e| AppError::Backend(format!("Database connection failed: {}", e)))?;
                if config.run_migrations {
                    run_migrations(&db)
                        .await
                        .map_err(|e| AppError::Backend(format!("Migration failed: {}", e)))?;
                }
                tracing::info!("Using PostgreSQL backend");
                Arc::new(PostgresBackend::new(db))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, polls are kept in memory only");
                Arc::new(InMemoryBackend::new())
            }
        };

        let oauth = match &config.oauth {
            Some(oauth) => Some(GoogleOAuth::new(
                &oauth.client_id,
                &oauth.client_secret,
                &oauth.redirect_uri,
            )?),
            None => {
                tracing::warn!("Google OAuth is not configured, sign-in is disabled");
                None
            }
        };

        Ok(Self::new(backend, oauth))
    }
}
