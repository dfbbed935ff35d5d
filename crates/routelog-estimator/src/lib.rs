//! Client for the natural-language distance estimator.
//!
//! A single request per lookup: a fixed prompt naming both places goes out,
//! free-form text comes back. Interpreting that text is left to the caller.

pub mod client;
pub mod error;
pub mod types;

mod retry;

use std::future::Future;

pub use client::{distance_prompt, EstimatorClient};
pub use error::EstimatorError;
pub use retry::MAX_BACKOFF;

/// Anything that can answer "how far from `origin` to `destination`?" in prose.
pub trait DistanceEstimator: Send + Sync {
    /// Returns the estimator's raw reply.
    fn estimate(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<String, EstimatorError>> + Send;
}

impl DistanceEstimator for EstimatorClient {
    async fn estimate(&self, origin: &str, destination: &str) -> Result<String, EstimatorError> {
        self.ask_distance(origin, destination).await
    }
}
