use super::defaults::ENV_PREFIX;
use super::settings::{AppConfig, ColorMode, OutputFormat};
use anyhow::{anyhow, Context, Result};

impl AppConfig {
    /// Apply `VR_*` overrides from a set of environment variables.
    ///
    /// Unknown `VR_*` keys are ignored. A malformed value is an error naming the
    /// variable. `NO_COLOR` disables color unless `VR_COLOR` is also set.
    pub(crate) fn apply_env<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut no_color = false;
        let mut color_set = false;

        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.as_ref().trim();

            if key == "NO_COLOR" {
                no_color = !value.is_empty();
                continue;
            }

            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };

            match name {
                "QUERY_TIMEOUT_MS" => {
                    self.query_timeout_ms = value
                        .parse()
                        .with_context(|| format!("{key} must be a whole number of milliseconds"))?;
                }
                "CONCURRENCY" => {
                    self.concurrency = value
                        .parse()
                        .with_context(|| format!("{key} must be a positive integer"))?;
                }
                "MOUNT_TABLE" => {
                    self.mount_table = value.to_string();
                }
                "INCLUDE_PSEUDO" => {
                    self.include_pseudo = parse_flag(value).with_context(|| format!("{key} must be yes or no"))?;
                }
                "COLOR" => {
                    self.color = ColorMode::try_from(value)
                        .map_err(|e| anyhow!(e))
                        .with_context(|| format!("{key} must be auto, always or never"))?;
                    color_set = true;
                }
                "OUTPUT" => {
                    self.output = OutputFormat::try_from(value)
                        .map_err(|e| anyhow!(e))
                        .with_context(|| format!("{key} must be table or json"))?;
                }
                "WARN_PERCENT" => {
                    self.warn_percent =
                        value.parse().with_context(|| format!("{key} must be a number"))?;
                }
                _ => {}
            }
        }

        if no_color && !color_set {
            self.color = ColorMode::Never;
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" | "" => Ok(false),
        _ => Err(anyhow!("expected yes/no, got {value:?}")),
    }
}
