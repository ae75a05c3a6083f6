use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// How the quiz store pool is sized and how hard startup tries to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// Total connection attempts, at least one.
    pub connect_attempts: u32,
    pub initial_backoff: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_attempts: 6,
            initial_backoff: Duration::from_millis(500),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolConfig {
    /// Waits between consecutive attempts: doubling, capped at ten seconds.
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        let retries = self.connect_attempts.max(1) - 1;
        std::iter::successors(Some(self.initial_backoff), |delay| {
            Some((*delay * 2).min(MAX_BACKOFF))
        })
        .map(|delay| delay.min(MAX_BACKOFF))
        .take(retries as usize)
        .collect()
    }
}

#[instrument(skip(url), fields(max_connections = config.max_connections, attempts = config.connect_attempts))]
pub async fn connect_pool(url: &str, config: &PoolConfig) -> Result<PgPool, RepositoryError> {
    if url.trim().is_empty() {
        return Err(RepositoryError::ConnectionFailed(
            "database url is not configured".to_string(),
        ));
    }

    let mut backoff = config.backoff_schedule().into_iter();
    let mut attempt = 1u32;

    loop {
        let connected = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(url)
            .await;

        match (connected, backoff.next()) {
            (Ok(pool), _) => {
                info!(attempt, "PostgreSQL connection pool established");
                return Ok(pool);
            }
            (Err(e), Some(delay)) => {
                warn!(
                    error = %e,
                    attempt,
                    delay_ms = delay.as_millis(),
                    "PostgreSQL connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            (Err(e), None) => {
                return Err(RepositoryError::ConnectionFailed(format!(
                    "gave up after {attempt} attempt(s): {e}"
                )));
            }
        }
    }
}
