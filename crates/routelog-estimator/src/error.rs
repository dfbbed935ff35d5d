use thiserror::Error;

/// Errors returned by the estimator client.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the estimator.
    #[error("rate limited by estimator")]
    RateLimited,

    #[error("unexpected HTTP status {status} from estimator")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The estimator answered but produced no text.
    #[error("estimator returned no text")]
    EmptyResponse,

    #[error("invalid estimator base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
