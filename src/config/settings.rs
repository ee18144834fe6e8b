use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_MOUNT_TABLE, DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_WARN_PERCENT,
};
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ColorMode {
    /// Color only when stdout is a terminal.
    Auto,
    Always,
    Never,
}

impl TryFrom<&str> for ColorMode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "yes" | "true" | "1" => Ok(Self::Always),
            "never" | "no" | "false" | "0" => Ok(Self::Never),
            _ => Err(format!("invalid color mode: {s}")),
        }
    }
}

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OutputFormat {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AppConfig {
    /// Time budget for each host query, in milliseconds. A capacity query that
    /// runs past it is reported as unavailable.
    pub query_timeout_ms: u64,
    /// Number of volumes inspected concurrently. Output order is unaffected.
    pub concurrency: usize,
    /// Mount table listing the volumes on Unix hosts. Ignored on Windows.
    pub mount_table: String,
    /// Keep kernel pseudo filesystems (proc, sysfs, cgroup...) in the report.
    pub include_pseudo: bool,
    pub color: ColorMode,
    pub output: OutputFormat,
    /// Usage percentage at or above which a row is highlighted.
    pub warn_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
            mount_table: DEFAULT_MOUNT_TABLE.to_string(),
            include_pseudo: false,
            color: ColorMode::Auto,
            output: OutputFormat::Table,
            warn_percent: DEFAULT_WARN_PERCENT,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults overridden by `VR_*` environment variables.
    pub(crate) fn load() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}
