use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional YAML override for the reference-target table.
    pub targets_path: Option<PathBuf>,
    /// Base URL of the label-parsing service; extraction is disabled without it.
    pub extractor_url: Option<String>,
    pub extractor_api_key: Option<String>,
    pub extractor_timeout_secs: u64,
    pub extractor_max_retries: u32,
    pub extractor_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("targets_path", &self.targets_path)
            .field("extractor_url", &self.extractor_url)
            .field(
                "extractor_api_key",
                &self.extractor_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("extractor_timeout_secs", &self.extractor_timeout_secs)
            .field("extractor_max_retries", &self.extractor_max_retries)
            .field("extractor_backoff_base_ms", &self.extractor_backoff_base_ms)
            .finish()
    }
}

impl AppConfig {
    /// The extraction service URL, for commands that cannot run without it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `CATSCORE_EXTRACTOR_URL`
    /// was not set.
    pub fn require_extractor_url(&self) -> Result<&str, ConfigError> {
        self.extractor_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("CATSCORE_EXTRACTOR_URL".to_string()))
    }
}
