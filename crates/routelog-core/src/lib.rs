//! Domain types and pure helpers shared by every routelog crate.
//!
//! Holds the history record shape, the Monday-aligned week arithmetic used to
//! partition the ledger, the estimator response parser, and environment-driven
//! configuration. Nothing in here performs network or file I/O.

pub mod app_config;
pub mod config;
pub mod distance;
pub mod record;
pub mod week;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{parse_distance, Distance};
pub use record::{HistoryRecord, LaborDay};
pub use week::{
    monday_of, parse_week_key, recent_week_keys, week_key_of, week_label, ENTRY_DATE_FORMAT,
    WEEK_KEY_FORMAT,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid week key '{key}': expected YYYY-MM-DD")]
    InvalidWeekKey { key: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
