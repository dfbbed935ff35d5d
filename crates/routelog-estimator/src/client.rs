//! HTTP client for the estimator's `generateContent` endpoint.
//!
//! Wraps `reqwest` with API key handling, a per-call timeout, and bounded
//! retries on transient failures. The reply is returned as plain text.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::EstimatorError;
use crate::retry::retry_with_backoff;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// The fixed question sent for every lookup.
#[must_use]
pub fn distance_prompt(origin: &str, destination: &str) -> String {
    format!(
        "What is the driving distance in kilometers between {origin} and {destination}? \
         Reply with only the number followed by km."
    )
}

/// Client for the distance estimator.
///
/// Use [`EstimatorClient::new`] for production or
/// [`EstimatorClient::with_base_url`] to point at a mock server in tests.
pub struct EstimatorClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl EstimatorClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, EstimatorError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`EstimatorError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, EstimatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("routelog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| EstimatorError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retries on transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Asks for the driving distance between two places and returns the
    /// estimator's raw reply.
    ///
    /// # Errors
    ///
    /// - [`EstimatorError::Http`] on network failure or timeout.
    /// - [`EstimatorError::RateLimited`] / [`EstimatorError::UnexpectedStatus`]
    ///   on a non-2xx reply (after retries, where applicable).
    /// - [`EstimatorError::Deserialize`] if the body has the wrong shape.
    /// - [`EstimatorError::EmptyResponse`] if no text came back.
    pub async fn ask_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<String, EstimatorError> {
        let prompt = distance_prompt(origin, destination);
        let text = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.generate(&prompt)
        })
        .await?;
        tracing::debug!(origin, destination, reply = %text, "estimator replied");
        Ok(text)
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    async fn generate(&self, prompt: &str) -> Result<String, EstimatorError> {
        let request = GenerateContentRequest::from_prompt(prompt.to_string());
        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(EstimatorError::RateLimited);
        }
        if !status.is_success() {
            return Err(EstimatorError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| EstimatorError::Deserialize {
                context: "generateContent".to_string(),
                source: e,
            })?;
        parsed.answer_text().ok_or(EstimatorError::EmptyResponse)
    }
}
