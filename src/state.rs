use std::sync::Arc;

use anyhow::Context;
use time::{Date, OffsetDateTime};

use crate::config::{AppConfig, StoreBackend};
use crate::day::today_at;
use crate::store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.store_backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is not set")?;
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                let store = PgStore::new(db);

                sqlx::migrate!("./migrations")
                    .run(store.pool())
                    .await
                    .context("run migrations")?;

                Arc::new(store) as Arc<dyn Store>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Arc::new(MemoryStore::new()) as Arc<dyn Store>
            }
        };

        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn Store>) -> Self {
        Self { config, store }
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    /// Calendar day of `now` at the configured offset.
    pub fn today(&self) -> Date {
        today_at(self.now(), self.config.day_offset)
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            store_backend: StoreBackend::Memory,
            database_url: None,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
            },
            day_offset: time::UtcOffset::UTC,
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()))
    }
}
