//! Cache-first distance resolution.
//!
//! A route already in the history is answered from the most recent matching
//! record without contacting the estimator, even if that record is months old.
//! Only a miss reaches the estimator, and at most one such call is in flight
//! per resolver.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use routelog_core::{parse_distance, Distance, HistoryRecord};
use routelog_estimator::DistanceEstimator;
use routelog_store::RecordStore;

use crate::error::ResolveError;

/// Observable state of the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Idle,
    Resolving,
    Resolved { distance: Distance },
    Failed { message: String },
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The record that was appended to the history.
    pub record: HistoryRecord,
    /// `true` when the distance came from an earlier record.
    pub cache_hit: bool,
}

pub struct DistanceResolver<E> {
    estimator: Option<E>,
    timeout: Duration,
    state: Mutex<ResolutionState>,
}

impl<E: DistanceEstimator> DistanceResolver<E> {
    /// `estimator` is `None` when no API key is configured; cache hits still work.
    #[must_use]
    pub fn new(estimator: Option<E>, timeout: Duration) -> Self {
        Self {
            estimator,
            timeout,
            state: Mutex::new(ResolutionState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResolutionState {
        lock(&self.state).clone()
    }

    /// Last resolved distance; cleared by any failure.
    #[must_use]
    pub fn current_distance(&self) -> Option<Distance> {
        match &*lock(&self.state) {
            ResolutionState::Resolved { distance } => Some(distance.clone()),
            _ => None,
        }
    }

    /// Resolves a route dated today (local time).
    ///
    /// # Errors
    ///
    /// See [`resolve_on`](Self::resolve_on).
    pub async fn resolve(
        &self,
        store: &Mutex<RecordStore>,
        origin: &str,
        destination: &str,
    ) -> Result<Resolution, ResolveError> {
        let today = chrono::Local::now().date_naive();
        self.resolve_on(store, origin, destination, today).await
    }

    /// Resolves a route and appends the new record dated `today`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Validation`] if either field is blank; state untouched.
    /// - [`ResolveError::Busy`] while another lookup is in flight; state untouched.
    /// - [`ResolveError::Configuration`] on a miss without an estimator.
    /// - [`ResolveError::Estimator`], [`ResolveError::TimedOut`] or
    ///   [`ResolveError::Unparseable`] when the estimator cannot supply a number.
    ///
    /// No record is created on any error.
    pub async fn resolve_on(
        &self,
        store: &Mutex<RecordStore>,
        origin: &str,
        destination: &str,
        today: NaiveDate,
    ) -> Result<Resolution, ResolveError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(ResolveError::Validation);
        }

        let mut flight = self.begin()?;
        let outcome = self.run(store, origin, destination, today).await;
        flight.finish(&outcome);

        match &outcome {
            Ok(resolution) => tracing::info!(
                origin,
                destination,
                distance = %resolution.record.distance,
                cache_hit = resolution.cache_hit,
                "route resolved"
            ),
            Err(e) => tracing::warn!(origin, destination, error = %e, "route resolution failed"),
        }
        outcome
    }

    fn begin(&self) -> Result<InFlight<'_>, ResolveError> {
        let mut state = lock(&self.state);
        if *state == ResolutionState::Resolving {
            return Err(ResolveError::Busy);
        }
        *state = ResolutionState::Resolving;
        Ok(InFlight {
            state: &self.state,
            finished: false,
        })
    }

    async fn run(
        &self,
        store: &Mutex<RecordStore>,
        origin: &str,
        destination: &str,
        today: NaiveDate,
    ) -> Result<Resolution, ResolveError> {
        {
            let mut store = lock(store);
            let cached = store.find_cached(origin, destination).map(|hit| {
                HistoryRecord::new(&hit.origin, &hit.destination, hit.distance.clone(), today)
            });
            if let Some(record) = cached {
                persist(&mut store, record.clone());
                return Ok(Resolution {
                    record,
                    cache_hit: true,
                });
            }
        }

        let estimator = self
            .estimator
            .as_ref()
            .ok_or(ResolveError::Configuration)?;
        let reply = tokio::time::timeout(self.timeout, estimator.estimate(origin, destination))
            .await
            .map_err(|_| ResolveError::TimedOut(self.timeout))?
            .map_err(ResolveError::Estimator)?;
        let distance =
            parse_distance(&reply).ok_or_else(|| ResolveError::Unparseable { reply })?;

        let record = HistoryRecord::new(origin, destination, distance, today);
        persist(&mut lock(store), record.clone());
        Ok(Resolution {
            record,
            cache_hit: false,
        })
    }
}

/// Appends the record. A failed write is logged; the record stays in memory.
fn persist(store: &mut RecordStore, record: HistoryRecord) {
    let id = record.id;
    if let Err(e) = store.append(record) {
        tracing::warn!(%id, error = %e, "record kept in memory but history was not saved");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the resolver busy for one lookup. Dropping it without `finish`
/// (the lookup future was cancelled) returns the resolver to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<ResolutionState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(&mut self, outcome: &Result<Resolution, ResolveError>) {
        let next = match outcome {
            Ok(resolution) => ResolutionState::Resolved {
                distance: resolution.record.distance.clone(),
            },
            Err(e) => ResolutionState::Failed {
                message: e.user_message().to_string(),
            },
        };
        *lock(self.state) = next;
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.state) = ResolutionState::Idle;
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
