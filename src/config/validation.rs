use super::defaults::MAX_QUERY_TIMEOUT_MS;
use super::settings::AppConfig;
use anyhow::Result;

impl AppConfig {
    /// Validate configuration values are sane.
    pub(crate) fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.query_timeout_ms >= 1 && self.query_timeout_ms <= MAX_QUERY_TIMEOUT_MS,
            "query_timeout_ms must be between 1 and {MAX_QUERY_TIMEOUT_MS}"
        );
        anyhow::ensure!(
            self.concurrency >= 1 && self.concurrency <= 32,
            "concurrency must be between 1 and 32"
        );
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.warn_percent),
            "warn_percent must be between 0 and 100"
        );
        anyhow::ensure!(!self.mount_table.trim().is_empty(), "mount_table must not be empty");
        Ok(())
    }
}
