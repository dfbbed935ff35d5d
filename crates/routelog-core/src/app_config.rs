use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub estimator_api_key: Option<String>,
    pub estimator_base_url: String,
    pub estimator_model: String,
    pub estimator_timeout_secs: u64,
    pub estimator_max_retries: u32,
    pub estimator_retry_backoff_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("export_dir", &self.export_dir)
            .field(
                "estimator_api_key",
                &self.estimator_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("estimator_base_url", &self.estimator_base_url)
            .field("estimator_model", &self.estimator_model)
            .field("estimator_timeout_secs", &self.estimator_timeout_secs)
            .field("estimator_max_retries", &self.estimator_max_retries)
            .field(
                "estimator_retry_backoff_ms",
                &self.estimator_retry_backoff_ms,
            )
            .finish()
    }
}
