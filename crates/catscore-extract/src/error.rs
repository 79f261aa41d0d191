use thiserror::Error;

/// Errors returned by the extraction client.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network or TLS failure, or a non-2xx status without an error envelope.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `{"error": {"message": ...}}`.
    #[error("extraction service error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The response body did not match the label contract.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required request field was empty.
    #[error("invalid extraction request: {0}")]
    InvalidRequest(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
