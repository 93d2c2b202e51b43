use crate::app_config::{AppConfig, DEFAULT_API_BASE};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base = or_default("SYNVO_API_BASE", DEFAULT_API_BASE);
    // A blank email reads as signed-out, same as an unset one.
    let user_email = lookup("SYNVO_USER_EMAIL")
        .ok()
        .filter(|email| !email.trim().is_empty());
    let user_name = lookup("SYNVO_USER_NAME").ok();
    let request_timeout_secs = parse_u64("SYNVO_REQUEST_TIMEOUT_SECS", "30")?;
    let page_size = parse_usize("SYNVO_PAGE_SIZE", "6")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SYNVO_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }
    let log_level = or_default("SYNVO_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_base,
        user_email,
        user_name,
        request_timeout_secs,
        page_size,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
