use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but malformed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but malformed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default. The estimator API key is optional here: a
/// missing key only matters once a lookup actually has to reach the estimator.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ROUTELOG_ENV", "development"))?;
    let log_level = or_default("ROUTELOG_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("ROUTELOG_DATA_DIR", "./data"));
    let export_dir = PathBuf::from(or_default("ROUTELOG_EXPORT_DIR", "."));

    let estimator_api_key = lookup("ROUTELOG_ESTIMATOR_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let estimator_base_url = or_default(
        "ROUTELOG_ESTIMATOR_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let estimator_model = or_default("ROUTELOG_ESTIMATOR_MODEL", "gemini-2.0-flash");

    let estimator_timeout_secs = parse_u64("ROUTELOG_ESTIMATOR_TIMEOUT_SECS", "20")?;
    if estimator_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ROUTELOG_ESTIMATOR_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let estimator_max_retries = parse_u32("ROUTELOG_ESTIMATOR_MAX_RETRIES", "2")?;
    let estimator_retry_backoff_ms = parse_u64("ROUTELOG_ESTIMATOR_RETRY_BACKOFF_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        export_dir,
        estimator_api_key,
        estimator_base_url,
        estimator_model,
        estimator_timeout_secs,
        estimator_max_retries,
        estimator_retry_backoff_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ROUTELOG_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
