//! `StoreHealth` adapter for the PostgreSQL pool.

use std::time::Duration;

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tokio::time::timeout;
use tracing::warn;

use crate::domain::ports::{HealthReport, STATUS_DOWN, STATUS_KEY, STATUS_UP, StoreHealth};

use super::pool::{DbPool, PoolStats};

/// Upper bound on checkout plus ping.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

const HEALTHY: &str = "It's healthy";
const HEAVY_LOAD: &str = "The database is experiencing heavy load.";
const HIGH_WAIT: &str =
    "The database has a high number of wait events, indicating potential bottlenecks.";
const IDLE_CLOSED: &str = "Many idle connections are being closed, consider revising the \
                           connection pool settings (max idle, idle timeout).";
const LIFETIME_CLOSED: &str = "Many connections are being closed due to max lifetime, consider \
                               increasing the max lifetime or revising the connection usage \
                               pattern.";

fn down_report(error: String) -> HealthReport {
    HealthReport::from([
        (STATUS_KEY.to_owned(), STATUS_DOWN.to_owned()),
        ("error".to_owned(), error),
    ])
}

/// Summary line for an up store. The first matching condition wins.
fn up_message(stats: &PoolStats) -> &'static str {
    if stats.closes_many_expired() {
        LIFETIME_CLOSED
    } else if stats.closes_many_idle() {
        IDLE_CLOSED
    } else if stats.has_high_wait_count() {
        HIGH_WAIT
    } else if stats.is_heavily_loaded() {
        HEAVY_LOAD
    } else {
        HEALTHY
    }
}

fn up_report(stats: PoolStats) -> HealthReport {
    let message = up_message(&stats);
    HealthReport::from([
        (STATUS_KEY.to_owned(), STATUS_UP.to_owned()),
        ("message".to_owned(), message.to_owned()),
        (
            "open_connections".to_owned(),
            stats.open_connections.to_string(),
        ),
        ("in_use".to_owned(), stats.in_use.to_string()),
        ("idle".to_owned(), stats.idle.to_string()),
        (
            "max_open_connections".to_owned(),
            stats.max_open_connections.to_string(),
        ),
        ("wait_count".to_owned(), stats.wait_count.to_string()),
        (
            "wait_duration".to_owned(),
            format!("{:?}", stats.wait_duration),
        ),
        ("max_idle_closed".to_owned(), stats.max_idle_closed.to_string()),
        (
            "max_lifetime_closed".to_owned(),
            stats.max_lifetime_closed.to_string(),
        ),
    ])
}

impl DbPool {
    async fn ping(&self) -> Result<(), String> {
        let mut conn = self.get().await.map_err(|err| err.to_string())?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| err.to_string())
    }
}

#[async_trait]
impl StoreHealth for DbPool {
    async fn health(&self) -> HealthReport {
        let outcome = match timeout(PING_TIMEOUT, self.ping()).await {
            Ok(result) => result,
            Err(_) => Err(format!("ping timed out after {}s", PING_TIMEOUT.as_secs())),
        };

        match outcome {
            Ok(()) => up_report(self.stats()),
            Err(error) => {
                warn!(%error, "database health check failed");
                down_report(format!("db down: {error}"))
            }
        }
    }
}
