use anyhow::Context;
use time::UtcOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    /// Offset that decides which calendar day "today" is.
    pub day_offset: UtcOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store_backend = match get("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => anyhow::bail!("unknown STORE_BACKEND {other:?}"),
        };

        let database_url = get("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required for the postgres store");
        }

        let jwt = JwtConfig {
            secret: get("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "dogfit".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "dogfit-users".into()),
        };

        let offset_minutes = get("DAY_UTC_OFFSET_MINUTES")
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);
        let day_offset = UtcOffset::from_whole_seconds(offset_minutes * 60)
            .with_context(|| format!("DAY_UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        Ok(Self {
            store_backend,
            database_url,
            jwt,
            day_offset,
        })
    }
}
