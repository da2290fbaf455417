//! Driven port reporting the health of the backing store.

use std::collections::BTreeMap;

use async_trait::async_trait;

/// Key holding the overall verdict in a health report.
pub const STATUS_KEY: &str = "status";
/// Value of [`STATUS_KEY`] when the store answered.
pub const STATUS_UP: &str = "up";
/// Value of [`STATUS_KEY`] when the store did not answer in time.
pub const STATUS_DOWN: &str = "down";

/// Flat string map describing store health.
///
/// Always carries [`STATUS_KEY`]. Other keys are adapter specific.
pub type HealthReport = BTreeMap<String, String>;

/// Whether a report says the store is down.
#[must_use]
pub fn is_down(report: &HealthReport) -> bool {
    report.get(STATUS_KEY).is_some_and(|status| status == STATUS_DOWN)
}

/// Port for probing store reachability and pool statistics.
///
/// Implementations must never fail: an unreachable store is reported through
/// the map, not through an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Check the store and summarise its state.
    async fn health(&self) -> HealthReport;
}

/// Fixture that always reports a healthy store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealth;

#[async_trait]
impl StoreHealth for FixtureStoreHealth {
    async fn health(&self) -> HealthReport {
        HealthReport::from([
            (STATUS_KEY.to_owned(), STATUS_UP.to_owned()),
            ("message".to_owned(), "It's healthy".to_owned()),
        ])
    }
}
