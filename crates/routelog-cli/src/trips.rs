//! Trip command handlers: add, list, weeks, delete.
//!
//! These are called from `main` after config is loaded and the history has
//! been read from disk.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Context;
use routelog_core::AppConfig;
use routelog_estimator::{EstimatorClient, MAX_BACKOFF};
use routelog_ledger::DistanceResolver;
use routelog_store::RecordStore;

fn lock(store: &Mutex<RecordStore>) -> anyhow::Result<MutexGuard<'_, RecordStore>> {
    store
        .lock()
        .map_err(|_| anyhow::anyhow!("history lock poisoned"))
}

/// Builds the estimator client, or `None` when no API key is configured.
fn build_estimator(config: &AppConfig) -> anyhow::Result<Option<EstimatorClient>> {
    let Some(api_key) = config.estimator_api_key.as_deref() else {
        tracing::debug!("no estimator API key; only known routes can be resolved");
        return Ok(None);
    };
    let client = EstimatorClient::with_base_url(
        api_key,
        &config.estimator_model,
        config.estimator_timeout_secs,
        &config.estimator_base_url,
    )
    .context("failed to build estimator client")?
    .with_retry(
        config.estimator_max_retries,
        config.estimator_retry_backoff_ms,
    );
    Ok(Some(client))
}

/// Overall deadline for one lookup: every attempt may use the full per-call
/// timeout, plus the longest sleep between attempts. Saturates rather than
/// wrapping for absurd configured values.
fn resolution_deadline(config: &AppConfig) -> Duration {
    let retries = config.estimator_max_retries;
    let per_call = Duration::from_secs(config.estimator_timeout_secs);
    per_call
        .saturating_mul(retries.saturating_add(1))
        .saturating_add(MAX_BACKOFF.saturating_mul(retries))
}

/// Resolve a route, log it, and print the distance.
///
/// # Errors
///
/// Returns the resolver's user-facing message on validation, configuration,
/// or estimator failure. Nothing is logged in that case.
pub(crate) async fn run_add(
    config: &AppConfig,
    store: &Mutex<RecordStore>,
    origin: &str,
    destination: &str,
) -> anyhow::Result<()> {
    let resolver = DistanceResolver::new(build_estimator(config)?, resolution_deadline(config));

    match resolver.resolve(store, origin, destination).await {
        Ok(resolution) => {
            let record = &resolution.record;
            let source = if resolution.cache_hit {
                "from history"
            } else {
                "from estimator"
            };
            println!(
                "{} -> {}: {} ({source})",
                record.origin, record.destination, record.distance
            );
            println!("logged as {} on {} ({})", record.id, record.entry_date, record.weekday);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "resolution error detail");
            anyhow::bail!("{}", e.user_message())
        }
    }
}

/// Print the trips of one week, newest first.
///
/// # Errors
///
/// Returns an error if `week_key` is not a valid week key.
pub(crate) fn run_list(store: &Mutex<RecordStore>, week_key: &str) -> anyhow::Result<()> {
    let label = routelog_core::week_label(week_key)?;
    let store = lock(store)?;
    let records: Vec<_> = store.records_in_week(week_key).collect();

    println!("Week {week_key} ({label})");
    if records.is_empty() {
        println!("  no routes recorded");
        return Ok(());
    }
    for r in records {
        println!(
            "  {}  {:<10} {:<9} {} -> {}  {}",
            r.id, r.entry_date, r.weekday, r.origin, r.destination, r.distance
        );
    }
    Ok(())
}

/// Print recent weeks with trip counts.
///
/// # Errors
///
/// Returns an error if a week label cannot be rendered.
pub(crate) fn run_weeks(store: &Mutex<RecordStore>, count: usize) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let store = lock(store)?;
    let weeks = routelog_ledger::week_summaries(today, count, store.records())?;
    for w in weeks {
        println!("{}  {:<15} {} trips", w.week_key, w.label, w.trips);
    }
    Ok(())
}

/// Delete one trip. An unknown id is reported but is not an error.
///
/// # Errors
///
/// Returns an error if the updated history cannot be written.
pub(crate) fn run_delete(store: &Mutex<RecordStore>, id: uuid::Uuid) -> anyhow::Result<()> {
    let mut store = lock(store)?;
    let removed = store
        .remove(id)
        .context("record removed but history could not be saved")?;
    if removed {
        println!("deleted {id}");
    } else {
        println!("no record with id {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(api_key: Option<&str>) -> AppConfig {
        AppConfig {
            env: routelog_core::Environment::Test,
            log_level: "info".to_string(),
            data_dir: PathBuf::from("./data"),
            export_dir: PathBuf::from("."),
            estimator_api_key: api_key.map(str::to_string),
            estimator_base_url: "http://127.0.0.1:9".to_string(),
            estimator_model: "test-model".to_string(),
            estimator_timeout_secs: 20,
            estimator_max_retries: 2,
            estimator_retry_backoff_ms: 500,
        }
    }

    #[test]
    fn deadline_covers_all_attempts_and_backoff() {
        assert_eq!(
            resolution_deadline(&config(None)),
            Duration::from_secs(20 * 3 + 10 * 2)
        );
    }

    #[test]
    fn deadline_saturates_for_huge_timeout() {
        let mut cfg = config(None);
        cfg.estimator_timeout_secs = u64::MAX / 2;
        assert_eq!(resolution_deadline(&cfg), Duration::MAX);

        cfg.estimator_timeout_secs = u64::MAX;
        cfg.estimator_max_retries = u32::MAX;
        assert_eq!(resolution_deadline(&cfg), Duration::MAX);
    }

    #[test]
    fn no_api_key_means_no_estimator() {
        assert!(build_estimator(&config(None)).unwrap().is_none());
        assert!(build_estimator(&config(Some("k"))).unwrap().is_some());
    }
}
