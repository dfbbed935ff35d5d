use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ROUTELOG_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir.to_str(), Some("./data"));
    assert_eq!(cfg.export_dir.to_str(), Some("."));
    assert!(cfg.estimator_api_key.is_none());
    assert_eq!(
        cfg.estimator_base_url,
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(cfg.estimator_model, "gemini-2.0-flash");
    assert_eq!(cfg.estimator_timeout_secs, 20);
    assert_eq!(cfg.estimator_max_retries, 2);
    assert_eq!(cfg.estimator_retry_backoff_ms, 500);
}

#[test]
fn build_app_config_reads_api_key() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_API_KEY", "  secret-key  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.estimator_api_key.as_deref(), Some("secret-key"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.estimator_api_key.is_none());
}

#[test]
fn build_app_config_overrides_paths() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_DATA_DIR", "/var/lib/routelog");
    map.insert("ROUTELOG_EXPORT_DIR", "/tmp/exports");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir.to_str(), Some("/var/lib/routelog"));
    assert_eq!(cfg.export_dir.to_str(), Some("/tmp/exports"));
}

#[test]
fn build_app_config_timeout_override() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.estimator_timeout_secs, 45);
}

#[test]
fn build_app_config_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROUTELOG_ESTIMATOR_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ROUTELOG_ESTIMATOR_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_timeout_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROUTELOG_ESTIMATOR_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ROUTELOG_ESTIMATOR_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROUTELOG_ESTIMATOR_MAX_RETRIES"),
        "expected InvalidEnvVar(ROUTELOG_ESTIMATOR_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("ROUTELOG_ESTIMATOR_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"), "leaked key: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
