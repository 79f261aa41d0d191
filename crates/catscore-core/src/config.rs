use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Present-but-blank counts as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("CATSCORE_LOG_LEVEL", "info");
    let targets_path = optional("CATSCORE_TARGETS_PATH").map(PathBuf::from);
    let extractor_url = optional("CATSCORE_EXTRACTOR_URL");
    let extractor_api_key = optional("CATSCORE_EXTRACTOR_API_KEY");

    let extractor_timeout_secs = parse_u64("CATSCORE_EXTRACTOR_TIMEOUT_SECS", "30")?;
    if extractor_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATSCORE_EXTRACTOR_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let extractor_max_retries = parse_u32("CATSCORE_EXTRACTOR_MAX_RETRIES", "2")?;
    let extractor_backoff_base_ms = parse_u64("CATSCORE_EXTRACTOR_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        log_level,
        targets_path,
        extractor_url,
        extractor_api_key,
        extractor_timeout_secs,
        extractor_max_retries,
        extractor_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
