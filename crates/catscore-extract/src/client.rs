//! HTTP client for the label-extraction service.
//!
//! Sends the raw label text to `POST {base}/v1/labels/extract` and parses the
//! structured label out of the response. Error envelopes of the form
//! `{"error": {"message": ...}}` surface as [`ExtractError::Upstream`].

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ExtractError;
use crate::retry::retry_with_backoff;
use crate::types::{ExtractedLabel, ExtractionRequest};

const EXTRACT_PATH: &str = "v1/labels/extract";
const USER_AGENT: &str = "catscore/0.1 (label-scoring)";

/// Anything that can turn label text into an [`ExtractedLabel`].
pub trait LabelExtractor {
    fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<ExtractedLabel, ExtractError>> + Send;
}

/// Client for the extraction service.
///
/// Retries transient failures; see [`ExtractionClient::with_retry`].
pub struct ExtractionClient {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ExtractionClient {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            endpoint: endpoint_url(base_url)?,
            max_retries: 2,
            backoff_base_ms: 500,
        })
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One round-trip, no retries.
    async fn send_once(&self, request: &ExtractionRequest) -> Result<ExtractedLabel, ExtractError> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_err = response.error_for_status_ref().err();
        let body = response.text().await?;

        if let Some(message) = upstream_message(&body) {
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        if let Some(err) = status_err {
            return Err(ExtractError::Http(err));
        }

        serde_json::from_str(&body).map_err(|e| ExtractError::Deserialize {
            context: format!("extraction response for '{}'", request.product_name),
            source: e,
        })
    }
}

impl LabelExtractor for ExtractionClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractedLabel, ExtractError> {
        request.validate()?;
        tracing::debug!(
            product = %request.product_name,
            endpoint = %self.endpoint,
            "requesting label extraction"
        );
        let label = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.send_once(request)
        })
        .await?;
        tracing::debug!(
            product = %request.product_name,
            declared = label.nutrients.declared().count(),
            "label extracted"
        );
        Ok(label)
    }
}

/// Resolve the extraction endpoint under `base_url`, keeping any path prefix.
fn endpoint_url(base_url: &str) -> Result<Url, ExtractError> {
    let invalid = |reason: String| ExtractError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    base.join(EXTRACT_PATH).map_err(|e| invalid(e.to_string()))
}

/// Pull the message out of an error envelope, if the body is one.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value
        .get("error")?
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown error");
    Some(message.to_owned())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
