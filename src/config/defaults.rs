/// Prefix shared by every environment variable the tool reads.
pub(super) const ENV_PREFIX: &str = "VR_";

/// Default time budget for a single host query (classification or capacity).
pub(super) const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// Upper bound on the per-query timeout (10 minutes).
pub(super) const MAX_QUERY_TIMEOUT_MS: u64 = 600_000;

/// Default number of volumes inspected at once.
pub(super) const DEFAULT_CONCURRENCY: usize = 1;

/// Default mount table read on Unix hosts.
pub(super) const DEFAULT_MOUNT_TABLE: &str = "/proc/self/mounts";

/// Usage percentage at or above which a volume is highlighted.
pub(super) const DEFAULT_WARN_PERCENT: f64 = 90.0;
