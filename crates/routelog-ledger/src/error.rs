use std::time::Duration;

use routelog_estimator::EstimatorError;
use thiserror::Error;

/// Why a distance lookup did not produce a record.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("origin and destination are both required")]
    Validation,

    #[error("a distance lookup is already in progress")]
    Busy,

    #[error("estimator API key is not configured (set ROUTELOG_ESTIMATOR_API_KEY)")]
    Configuration,

    #[error("estimator request failed: {0}")]
    Estimator(#[source] EstimatorError),

    #[error("estimator did not answer within {0:?}")]
    TimedOut(Duration),

    #[error("no distance found in estimator reply {reply:?}")]
    Unparseable { reply: String },
}

impl ResolveError {
    /// `true` for the estimator-side failures: call error, timeout, or a reply
    /// without a number.
    #[must_use]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ResolveError::Estimator(_)
                | ResolveError::TimedOut(_)
                | ResolveError::Unparseable { .. }
        )
    }

    /// Text for the single user-facing error slot.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::Validation => "Please enter both an origin and a destination.",
            ResolveError::Busy => "A distance lookup is already running. Wait for it to finish.",
            ResolveError::Configuration => {
                "The distance service is not configured: set ROUTELOG_ESTIMATOR_API_KEY."
            }
            ResolveError::Estimator(_)
            | ResolveError::TimedOut(_)
            | ResolveError::Unparseable { .. } => {
                "Could not calculate the distance. Please try again."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no routes recorded for week {week_key}")]
    EmptyWeek { week_key: String },
}
