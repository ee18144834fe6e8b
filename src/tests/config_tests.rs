use crate::config::{AppConfig, ColorMode, OutputFormat};

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn test_apply_env() {
    let mut config = AppConfig::default();
    config
        .apply_env(env(&[
            ("VR_QUERY_TIMEOUT_MS", "250"),
            ("VR_CONCURRENCY", "4"),
            ("VR_MOUNT_TABLE", "/tmp/mounts"),
            ("VR_INCLUDE_PSEUDO", "yes"),
            ("VR_COLOR", "always"),
            ("VR_OUTPUT", "JSON"),
            ("VR_WARN_PERCENT", "75.5"),
            ("VR_SOMETHING_ELSE", "ignored"),
            ("PATH", "/usr/bin"),
        ]))
        .unwrap();

    assert_eq!(config.query_timeout_ms, 250);
    assert_eq!(config.concurrency, 4);
    assert_eq!(config.mount_table, "/tmp/mounts");
    assert!(config.include_pseudo);
    assert_eq!(config.color, ColorMode::Always);
    assert_eq!(config.output, OutputFormat::Json);
    assert!((config.warn_percent - 75.5).abs() < f64::EPSILON);
    assert!(config.validate().is_ok());
}

#[test]
fn test_malformed_value_names_variable() {
    let mut config = AppConfig::default();
    let err = config.apply_env(env(&[("VR_CONCURRENCY", "lots")])).unwrap_err();
    assert!(format!("{err:#}").contains("VR_CONCURRENCY"));

    let err = config.apply_env(env(&[("VR_OUTPUT", "xml")])).unwrap_err();
    assert!(format!("{err:#}").contains("VR_OUTPUT"));
}

#[test]
fn test_no_color_respects_explicit_setting() {
    let mut config = AppConfig::default();
    config.apply_env(env(&[("NO_COLOR", "1")])).unwrap();
    assert_eq!(config.color, ColorMode::Never);

    let mut config = AppConfig::default();
    config.apply_env(env(&[("NO_COLOR", "1"), ("VR_COLOR", "always")])).unwrap();
    assert_eq!(config.color, ColorMode::Always);

    let mut config = AppConfig::default();
    config.apply_env(env(&[("NO_COLOR", "")])).unwrap();
    assert_eq!(config.color, ColorMode::Auto);
}

#[test]
fn test_default_config_validates() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.output, OutputFormat::Table);
}

#[test]
fn test_validate_rejects_out_of_range() {
    let config = AppConfig { concurrency: 0, ..AppConfig::default() };
    assert!(config.validate().is_err());

    let config = AppConfig { query_timeout_ms: 0, ..AppConfig::default() };
    assert!(config.validate().is_err());

    let config = AppConfig { warn_percent: 120.0, ..AppConfig::default() };
    assert!(config.validate().is_err());

    let config = AppConfig { mount_table: "  ".to_string(), ..AppConfig::default() };
    assert!(config.validate().is_err());
}
