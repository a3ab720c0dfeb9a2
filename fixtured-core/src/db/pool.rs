//! Connection pool lifecycle
//!
//! The hosting environment reuses processes between invocations and may
//! evict idle connections in between, so the pool is built lazily and
//! revalidated on every acquisition: a closed or never-built pool is
//! reconstructed before a handle is returned. The slot mutex is held across
//! construction, so concurrent first-requests serialize on a single rebuild.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::error::Error;

/// Maximum pooled connections; also the bound on concurrent queries.
const MAX_CONNECTIONS: u32 = 5;

/// Connections kept warm between invocations.
const MIN_IDLE: u32 = 1;

/// Idle eviction after 10 minutes.
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Connections are recycled after 30 minutes regardless of use.
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Give up acquiring a connection after 30 seconds.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Prepared statements cached per connection.
const STATEMENT_CACHE_CAPACITY: usize = 250;

/// Connection parameters, captured from the environment once per process.
///
/// Absence of a variable is not an error at capture time; it surfaces as
/// [`Error::PoolInit`] at first pool construction, and on every request after
/// that until the environment is fixed.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl DbConfig {
    /// Read `DB_URL`, `DB_USER`, and `DB_PASSWORD`.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DB_URL").ok(),
            user: std::env::var("DB_USER").ok(),
            password: std::env::var("DB_PASSWORD").ok(),
        }
    }

    fn connect_options(&self) -> Result<PgConnectOptions, Error> {
        let url = require("DB_URL", &self.url)?;
        let user = require("DB_USER", &self.user)?;
        let password = require("DB_PASSWORD", &self.password)?;

        let options = PgConnectOptions::from_str(url).map_err(|err| Error::PoolInit {
            reason: format!("invalid DB_URL: {err}"),
        })?;

        Ok(options
            .username(user)
            .password(password)
            .statement_cache_capacity(STATEMENT_CACHE_CAPACITY))
    }
}

fn require<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, Error> {
    value.as_deref().ok_or_else(|| Error::PoolInit {
        reason: format!("{name} is not set"),
    })
}

/// Process-wide pool handle, cheap to clone and share across invocations.
#[derive(Clone)]
pub struct PoolManager {
    inner: Arc<PoolManagerInner>,
}

struct PoolManagerInner {
    config: DbConfig,
    pool: Mutex<Option<PgPool>>,
}

impl PoolManager {
    pub fn new(config: DbConfig) -> Self {
        Self {
            inner: Arc::new(PoolManagerInner {
                config,
                pool: Mutex::new(None),
            }),
        }
    }

    /// Capture connection parameters from the environment.
    pub fn from_env() -> Self {
        Self::new(DbConfig::from_env())
    }

    /// Return a live pool handle, building or rebuilding the pool first if
    /// it is absent or was closed since the last invocation.
    pub async fn acquire(&self) -> Result<PgPool, Error> {
        let mut slot = self.inner.pool.lock().await;

        if let Some(pool) = slot.as_ref() {
            if !pool.is_closed() {
                return Ok(pool.clone());
            }
            tracing::warn!("connection pool was closed externally, rebuilding");
        }

        let pool = self.build_pool().await?;
        *slot = Some(pool.clone());
        Ok(pool)
    }

    async fn build_pool(&self) -> Result<PgPool, Error> {
        let options = self.inner.config.connect_options()?;

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(MIN_IDLE)
            .idle_timeout(IDLE_TIMEOUT)
            .max_lifetime(MAX_LIFETIME)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|err| Error::PoolInit {
                reason: err.to_string(),
            })?;

        tracing::info!("connection pool initialized");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_config() -> DbConfig {
        let config = DbConfig::from_env();
        assert!(config.url.is_some(), "DB_URL required for this test");
        config
    }

    #[tokio::test]
    async fn missing_url_fails_at_acquire() {
        let manager = PoolManager::new(DbConfig::default());
        let err = manager.acquire().await.unwrap_err();
        assert!(matches!(err, Error::PoolInit { .. }));
        assert!(err.to_string().contains("DB_URL"));
    }

    #[tokio::test]
    async fn missing_credentials_name_the_variable() {
        let config = DbConfig {
            url: Some("postgres://localhost/fixtured".into()),
            user: None,
            password: None,
        };
        let err = PoolManager::new(config).acquire().await.unwrap_err();
        assert!(err.to_string().contains("DB_USER"));
    }

    // Integration tests require a real database:
    // DB_URL=postgres://... DB_USER=... DB_PASSWORD=... cargo test -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn acquire_returns_live_pool() {
        let manager = PoolManager::new(env_config());
        let pool = manager.acquire().await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn acquire_rebuilds_after_close() {
        let manager = PoolManager::new(env_config());

        let pool = manager.acquire().await.expect("first acquire failed");
        pool.close().await;
        assert!(pool.is_closed());

        let pool = manager.acquire().await.expect("reacquire failed");
        assert!(!pool.is_closed());

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query on rebuilt pool failed");
        assert_eq!(result.0, 1);
    }
}
